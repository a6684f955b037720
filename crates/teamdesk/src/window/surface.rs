//! The window surface the gesture state machine drives, and the pointer
//! input it consumes.

use super::cursor::CursorShape;
use super::geometry::{Point, WindowBounds};

/// A mouse (pointer) button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// The primary button (usually left).
    Primary,
    /// The secondary button (usually right).
    Secondary,
    /// The middle button or wheel press.
    Middle,
    /// Any other button, identified by platform index.
    Other(u16),
}

impl From<winit::event::MouseButton> for PointerButton {
    fn from(button: winit::event::MouseButton) -> Self {
        use winit::event::MouseButton;

        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Right => PointerButton::Secondary,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Back => PointerButton::Other(3),
            MouseButton::Forward => PointerButton::Other(4),
            MouseButton::Other(n) => PointerButton::Other(n),
        }
    }
}

/// One pointer event delivered to a window.
///
/// `position` is window-local and is used for edge classification;
/// `screen_position` is used for movement deltas so they stay stable while
/// the window itself moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// A button was pressed.
    Down {
        position: Point,
        screen_position: Point,
        button: PointerButton,
    },
    /// The pointer moved.
    Move {
        position: Point,
        screen_position: Point,
    },
    /// A button was released.
    Up { button: PointerButton },
    /// The window lost pointer capture (focus change, platform cancel).
    CaptureLost,
}

/// The window operations a gesture needs.
///
/// All methods take `&self`; platform windows expose these through interior
/// mutability. Implementations run on the UI thread.
pub trait GestureSurface {
    /// Current outer bounds in logical units.
    fn bounds(&self) -> WindowBounds;

    /// Move and/or resize the window.
    fn set_bounds(&self, bounds: WindowBounds);

    /// Route all pointer events to this window until released.
    fn capture_pointer(&self);

    /// End pointer capture.
    fn release_pointer(&self);

    /// Ask the platform to run an interactive move.
    ///
    /// Returns `true` when the platform took over the move. Returning `false`
    /// makes the gesture machine move the window itself from pointer deltas.
    fn begin_drag_move(&self) -> bool;

    /// Change the displayed cursor glyph.
    fn set_cursor(&self, cursor: CursorShape);
}
