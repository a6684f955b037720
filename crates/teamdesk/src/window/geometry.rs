//! Window geometry primitives.
//!
//! All values are logical (device-independent) units, origin at the top-left
//! of the primary screen for screen coordinates and at the top-left of the
//! window for window-local coordinates.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Outer bounds of a window: position of the top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowBounds {
    /// X position of the left edge.
    pub left: f32,
    /// Y position of the top edge.
    pub top: f32,
    /// Width of the window.
    pub width: f32,
    /// Height of the window.
    pub height: f32,
}

impl WindowBounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// X position of the right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Y position of the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Size of the window.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Position of the top-left corner.
    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Return these bounds moved so the top-left corner sits at `origin`.
    pub fn moved_to(self, origin: Point) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            ..self
        }
    }

    /// Check whether a screen point lies inside these bounds.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Adjust the position so at least `min_visible` units of the window stay
    /// inside `work_area`, and the top edge never leaves it (so the title
    /// strip is reachable).
    ///
    /// Only the position changes; the size is left alone.
    pub fn clamped_into(self, work_area: &WindowBounds, min_visible: f32) -> Self {
        let min_left = work_area.left - self.width + min_visible;
        let max_left = work_area.right() - min_visible;
        let max_top = work_area.bottom() - min_visible;

        Self {
            left: clamp_lenient(self.left, min_left, max_left),
            top: clamp_lenient(self.top, work_area.top, max_top),
            ..self
        }
    }
}

/// Like `f32::clamp`, but tolerates `min > max` by preferring `min`.
fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}
