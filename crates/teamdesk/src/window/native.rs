//! [`GestureSurface`] for real `winit` windows.
//!
//! Positions and sizes cross this boundary in logical units; the window's
//! scale factor converts them to physical pixels.

use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::Window;

use teamdesk_core::logging::targets;

use super::cursor::CursorShape;
use super::geometry::WindowBounds;
use super::surface::GestureSurface;

impl GestureSurface for Window {
    fn bounds(&self) -> WindowBounds {
        let scale = self.scale_factor();
        let size: LogicalSize<f64> = self.inner_size().to_logical(scale);
        // Wayland does not report positions; treat the window as anchored at
        // the origin so relative gestures still work.
        let position: LogicalPosition<f64> = self
            .outer_position()
            .map(|p| p.to_logical(scale))
            .unwrap_or_else(|_| LogicalPosition::new(0.0, 0.0));

        WindowBounds::new(
            position.x as f32,
            position.y as f32,
            size.width as f32,
            size.height as f32,
        )
    }

    fn set_bounds(&self, bounds: WindowBounds) {
        self.set_outer_position(LogicalPosition::new(bounds.left as f64, bounds.top as f64));
        let _ = self.request_inner_size(LogicalSize::new(bounds.width as f64, bounds.height as f64));
    }

    // winit delivers pointer events to the pressed window until release on
    // every desktop backend, so capture is implicit.
    fn capture_pointer(&self) {
        tracing::trace!(target: targets::GESTURE, window = ?self.id(), "pointer captured");
    }

    fn release_pointer(&self) {
        tracing::trace!(target: targets::GESTURE, window = ?self.id(), "pointer released");
    }

    fn begin_drag_move(&self) -> bool {
        match self.drag_window() {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(target: targets::GESTURE, %err, "native drag unavailable, moving manually");
                false
            }
        }
    }

    fn set_cursor(&self, cursor: CursorShape) {
        Window::set_cursor(self, cursor.to_cursor_icon());
    }
}
