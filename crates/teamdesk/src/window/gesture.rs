//! Drag-move and edge-resize for borderless windows.
//!
//! [`WindowGesture`] is a small state machine fed by pointer events. Each
//! gesture (press to release) is decided once, at pointer-down:
//!
//! - press inside the left, right or bottom resize border: `Resizing(edge)`
//! - primary press anywhere else: `Dragging`
//! - any other press: stays `Idle`
//!
//! While resizing, each pointer move recomputes the size from the bounds
//! captured at pointer-down. A move that would shrink the window below its
//! minimum leaves the bounds exactly as they were; the edge stops following
//! the pointer until the pointer comes back.
//!
//! Pointer-up and capture loss always return to `Idle`.
//!
//! ```
//! use teamdesk::window::{GestureConfig, GestureMode, WindowGesture};
//!
//! let gesture = WindowGesture::new(GestureConfig::default().with_min_size(320.0, 240.0));
//! assert_eq!(gesture.mode(), GestureMode::Idle);
//! ```

use serde::{Deserialize, Serialize};

use teamdesk_core::logging::targets;

use super::chrome::{DEFAULT_EDGE_THRESHOLD, FramelessChrome, ResizeEdge};
use super::cursor::CursorShape;
use super::geometry::{Point, WindowBounds};
use super::surface::{GestureSurface, PointerButton, PointerInput};

/// Tunables for the gesture state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Width of the resize band along the left, right and bottom edges.
    pub edge_threshold: f32,
    /// Smallest width a resize may produce.
    pub min_width: f32,
    /// Smallest height a resize may produce.
    pub min_height: f32,
    /// Screen area a manual drag keeps the window inside, if known.
    pub work_area: Option<WindowBounds>,
    /// How much of the window must stay inside `work_area`.
    pub min_visible: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            min_width: 320.0,
            min_height: 240.0,
            work_area: None,
            min_visible: 50.0,
        }
    }
}

impl GestureConfig {
    /// Set the edge threshold.
    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.max(0.0);
        self
    }

    /// Set the minimum size.
    pub fn with_min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width.max(0.0);
        self.min_height = height.max(0.0);
        self
    }

    /// Set the work area used to clamp manual drags.
    pub fn with_work_area(mut self, work_area: WindowBounds) -> Self {
        self.work_area = Some(work_area);
        self
    }
}

/// Which gesture is in progress, without its bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    /// No gesture; hovering only updates the cursor.
    Idle,
    /// The window is being moved.
    Dragging,
    /// The window is being resized from one edge.
    Resizing(ResizeEdge),
}

/// Full gesture state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No gesture in progress.
    Idle,
    /// Moving the window.
    Dragging {
        /// Screen position of the press.
        anchor: Point,
        /// Bounds at the press.
        origin: WindowBounds,
        /// Whether the platform is running the move.
        native: bool,
    },
    /// Resizing from `edge`.
    Resizing {
        /// The edge chosen at the press; fixed for the whole gesture.
        edge: ResizeEdge,
        /// Screen position of the press.
        anchor: Point,
        /// Bounds at the press.
        origin: WindowBounds,
    },
}

impl GestureState {
    /// The mode of this state.
    pub fn mode(&self) -> GestureMode {
        match self {
            GestureState::Idle => GestureMode::Idle,
            GestureState::Dragging { .. } => GestureMode::Dragging,
            GestureState::Resizing { edge, .. } => GestureMode::Resizing(*edge),
        }
    }

    /// True when no gesture is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }
}

/// Per-window pointer gesture controller.
///
/// Owned by exactly one window and driven on the UI thread.
#[derive(Debug, Clone)]
pub struct WindowGesture {
    chrome: FramelessChrome,
    config: GestureConfig,
    state: GestureState,
    cursor: CursorShape,
}

impl Default for WindowGesture {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl WindowGesture {
    /// Create an idle gesture controller.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            chrome: FramelessChrome::new().with_edge_threshold(config.edge_threshold),
            config,
            state: GestureState::Idle,
            cursor: CursorShape::Arrow,
        }
    }

    /// The current state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// The current mode.
    pub fn mode(&self) -> GestureMode {
        self.state.mode()
    }

    /// The configuration in use.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// The chrome used for edge classification.
    pub fn chrome(&self) -> &FramelessChrome {
        &self.chrome
    }

    /// The cursor glyph last applied to the surface.
    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Feed one pointer event and return the resulting mode.
    pub fn handle(&mut self, surface: &dyn GestureSurface, input: PointerInput) -> GestureMode {
        match input {
            PointerInput::Down {
                position,
                screen_position,
                button,
            } => self.pointer_down(surface, position, screen_position, button),
            PointerInput::Move {
                position,
                screen_position,
            } => self.pointer_move(surface, position, screen_position),
            PointerInput::Up { .. } | PointerInput::CaptureLost => self.end(surface),
        }
        self.mode()
    }

    /// Start a gesture.
    pub fn pointer_down(
        &mut self,
        surface: &dyn GestureSurface,
        position: Point,
        screen_position: Point,
        button: PointerButton,
    ) {
        match self.state {
            GestureState::Idle => {}
            // The platform ran the move and swallowed the release.
            GestureState::Dragging { native: true, .. } => self.end(surface),
            _ => {
                tracing::trace!(target: targets::GESTURE, ?button, "press ignored, gesture in progress");
                return;
            }
        }

        let origin = surface.bounds();
        match self.chrome.hit_test(position, origin.size()) {
            Some(edge) => {
                surface.capture_pointer();
                self.state = GestureState::Resizing {
                    edge,
                    anchor: screen_position,
                    origin,
                };
                self.apply_cursor(surface, edge.cursor());
                tracing::trace!(target: targets::GESTURE, ?edge, ?origin, "resize started");
            }
            None if button == PointerButton::Primary => {
                surface.capture_pointer();
                let native = surface.begin_drag_move();
                self.state = GestureState::Dragging {
                    anchor: screen_position,
                    origin,
                    native,
                };
                self.apply_cursor(surface, CursorShape::Move);
                tracing::trace!(target: targets::GESTURE, native, ?origin, "drag started");
            }
            None => {}
        }
    }

    /// Track pointer movement.
    pub fn pointer_move(&mut self, surface: &dyn GestureSurface, position: Point, screen_position: Point) {
        match self.state {
            GestureState::Idle => {
                let cursor = self.chrome.cursor_at(position, surface.bounds().size());
                self.apply_cursor(surface, cursor);
            }
            GestureState::Resizing {
                edge,
                anchor,
                origin,
            } => {
                let delta = screen_position - anchor;
                if let Some(bounds) = self.resized(edge, origin, delta, surface.bounds()) {
                    surface.set_bounds(bounds);
                }
            }
            GestureState::Dragging { native: true, .. } => {}
            GestureState::Dragging {
                anchor,
                origin,
                native: false,
            } => {
                let delta = screen_position - anchor;
                let mut bounds = origin.moved_to(Point::new(origin.left + delta.x, origin.top + delta.y));
                if let Some(work_area) = &self.config.work_area {
                    bounds = bounds.clamped_into(work_area, self.config.min_visible);
                }
                surface.set_bounds(bounds);
            }
        }
    }

    /// End the gesture, whatever it was.
    pub fn end(&mut self, surface: &dyn GestureSurface) {
        if !self.state.is_idle() {
            tracing::trace!(target: targets::GESTURE, mode = ?self.state.mode(), "gesture ended");
        }
        self.state = GestureState::Idle;
        surface.release_pointer();
        if self.cursor == CursorShape::Move {
            self.apply_cursor(surface, CursorShape::Arrow);
        }
    }

    /// Bounds after resizing `edge` by `delta`, or `None` to leave `current`
    /// untouched.
    fn resized(
        &self,
        edge: ResizeEdge,
        origin: WindowBounds,
        delta: Point,
        current: WindowBounds,
    ) -> Option<WindowBounds> {
        match edge {
            ResizeEdge::Left => {
                let width = origin.width - delta.x;
                (width >= self.config.min_width).then(|| WindowBounds {
                    left: origin.left + delta.x,
                    width,
                    ..current
                })
            }
            ResizeEdge::Right => {
                let width = origin.width + delta.x;
                (width >= self.config.min_width).then_some(WindowBounds { width, ..current })
            }
            ResizeEdge::Bottom => {
                let height = origin.height + delta.y;
                (height >= self.config.min_height).then_some(WindowBounds { height, ..current })
            }
        }
    }

    fn apply_cursor(&mut self, surface: &dyn GestureSurface, cursor: CursorShape) {
        if self.cursor != cursor {
            self.cursor = cursor;
            surface.set_cursor(cursor);
        }
    }
}
