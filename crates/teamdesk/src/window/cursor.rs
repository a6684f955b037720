//! Cursor glyphs shown over borderless window chrome.

use cursor_icon::CursorIcon;

/// The shape (icon) of the mouse cursor.
///
/// Only the glyphs the window chrome needs are listed; the platform decides
/// the exact appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// The default arrow cursor.
    #[default]
    Arrow,

    /// A move cursor, shown while the window is being dragged.
    Move,

    /// Resize cursor for horizontal resizing (east-west).
    ResizeHorizontal,

    /// Resize cursor for vertical resizing (north-south).
    ResizeVertical,
}

impl CursorShape {
    /// Convert to the platform-neutral cursor icon.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::Move => CursorIcon::Move,
            CursorShape::ResizeHorizontal => CursorIcon::EwResize,
            CursorShape::ResizeVertical => CursorIcon::NsResize,
        }
    }

    /// Check whether this is one of the resize glyphs.
    pub fn is_resize(self) -> bool {
        matches!(self, CursorShape::ResizeHorizontal | CursorShape::ResizeVertical)
    }
}

impl From<CursorShape> for CursorIcon {
    fn from(shape: CursorShape) -> Self {
        shape.to_cursor_icon()
    }
}
