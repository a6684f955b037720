//! Borderless window support.
//!
//! TeamDesk windows are drawn without native decorations, so moving and
//! resizing them is done by hand:
//!
//! - [`FramelessChrome`] classifies a window-local point as a resize edge or
//!   the draggable area
//! - [`WindowGesture`] turns pointer events into drag and resize operations
//! - [`GestureSurface`] is the window the gesture acts on; it is implemented
//!   for `winit::window::Window` and for every dialog window
//!
//! # Driving a gesture
//!
//! ```ignore
//! use teamdesk::window::{GestureConfig, PointerInput, WindowGesture};
//!
//! let mut gesture = WindowGesture::new(GestureConfig::default());
//!
//! // In the winit event loop:
//! gesture.handle(&window, PointerInput::Down {
//!     position,
//!     screen_position,
//!     button: button.into(),
//! });
//! ```

mod chrome;
mod cursor;
mod geometry;
mod gesture;
mod native;
mod surface;

pub use chrome::{DEFAULT_EDGE_THRESHOLD, FramelessChrome, ResizeEdge};
pub use cursor::CursorShape;
pub use geometry::{Point, Size, WindowBounds};
pub use gesture::{GestureConfig, GestureMode, GestureState, WindowGesture};
pub use surface::{GestureSurface, PointerButton, PointerInput};
