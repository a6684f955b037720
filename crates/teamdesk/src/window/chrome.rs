//! Borderless window chrome hit-testing.
//!
//! A TeamDesk window has no native decorations. The outer band of the client
//! area doubles as a resize border on the left, right and bottom edges. The
//! top edge is never a resize border; it belongs to the custom title strip,
//! which drags the window like the rest of the non-border area.
//!
//! ```
//! use teamdesk::window::{FramelessChrome, Point, ResizeEdge, Size};
//!
//! let chrome = FramelessChrome::new();
//! let size = Size::new(800.0, 600.0);
//!
//! assert_eq!(chrome.hit_test(Point::new(3.0, 300.0), size), Some(ResizeEdge::Left));
//! assert_eq!(chrome.hit_test(Point::new(400.0, 3.0), size), None);
//! ```

use winit::window::ResizeDirection;

use super::cursor::CursorShape;
use super::geometry::{Point, Size};

/// Default edge threshold in logical units.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 10.0;

/// A window edge that can be dragged to resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    /// The left edge; resizing keeps the right edge fixed.
    Left,
    /// The right edge.
    Right,
    /// The bottom edge.
    Bottom,
}

impl ResizeEdge {
    /// The cursor to show while hovering or dragging this edge.
    pub fn cursor(self) -> CursorShape {
        match self {
            ResizeEdge::Left | ResizeEdge::Right => CursorShape::ResizeHorizontal,
            ResizeEdge::Bottom => CursorShape::ResizeVertical,
        }
    }

    /// The equivalent winit resize direction.
    pub fn to_resize_direction(self) -> ResizeDirection {
        match self {
            ResizeEdge::Left => ResizeDirection::West,
            ResizeEdge::Right => ResizeDirection::East,
            ResizeEdge::Bottom => ResizeDirection::South,
        }
    }

    /// True for edges that change the width.
    pub fn is_horizontal(self) -> bool {
        matches!(self, ResizeEdge::Left | ResizeEdge::Right)
    }
}

/// Hit-test configuration for a borderless window.
#[derive(Debug, Clone, PartialEq)]
pub struct FramelessChrome {
    /// Border thickness for resize detection.
    edge_threshold: f32,
    /// Whether resize borders are active at all.
    resize_enabled: bool,
}

impl Default for FramelessChrome {
    fn default() -> Self {
        Self::new()
    }
}

impl FramelessChrome {
    /// Create chrome with the default edge threshold and resizing enabled.
    pub fn new() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            resize_enabled: true,
        }
    }

    /// Set the edge threshold.
    pub fn with_edge_threshold(mut self, threshold: f32) -> Self {
        self.edge_threshold = threshold.max(0.0);
        self
    }

    /// Enable or disable resize borders.
    pub fn with_resize_enabled(mut self, enabled: bool) -> Self {
        self.resize_enabled = enabled;
        self
    }

    /// Get the edge threshold.
    pub fn edge_threshold(&self) -> f32 {
        self.edge_threshold
    }

    /// Check if resize is enabled.
    pub fn is_resize_enabled(&self) -> bool {
        self.resize_enabled
    }

    /// Classify a window-local point.
    ///
    /// Edges are checked left, then right, then bottom, so the bottom corners
    /// resolve to the horizontal edge. Returns `None` for the draggable area.
    pub fn hit_test(&self, point: Point, window_size: Size) -> Option<ResizeEdge> {
        if !self.resize_enabled || self.edge_threshold <= 0.0 {
            return None;
        }

        let border = self.edge_threshold;
        if point.x < border {
            Some(ResizeEdge::Left)
        } else if point.x >= window_size.width - border {
            Some(ResizeEdge::Right)
        } else if point.y >= window_size.height - border {
            Some(ResizeEdge::Bottom)
        } else {
            None
        }
    }

    /// The cursor glyph for a window-local point.
    pub fn cursor_at(&self, point: Point, window_size: Size) -> CursorShape {
        self.hit_test(point, window_size)
            .map_or(CursorShape::Arrow, ResizeEdge::cursor)
    }
}
