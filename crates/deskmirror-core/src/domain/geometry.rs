//! Geometry primitives shared by every layer of deskmirror.
//!
//! Two coordinate spaces appear throughout the codebase:
//!
//! - **Virtual desktop space** – the unified 2D space spanning all attached
//!   displays, where each display occupies a rectangle offset by its
//!   top-left corner.  Coordinates may be negative (a display placed left
//!   of or above the primary).
//! - **Display-local space** – pixel coordinates relative to one display's
//!   own top-left corner, always in `[0, width) × [0, height)`.
//!
//! [`Rect`] carries the conversions between the two; they are exact inverse
//! translations, so no precision is lost crossing the boundary.

use serde::{Deserialize, Serialize};

/// A position in either virtual-desktop or display-local pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width × height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    ///
    /// A degenerate size carries no pixels; scale computations and
    /// coordinate conversions treat it as "nothing to map".
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A rectangular region in virtual desktop space.
///
/// `x` and `y` are the top-left corner; they may be negative for displays
/// positioned left of or above the primary display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the top-left corner in virtual desktop space.
    pub x: i32,
    /// Y coordinate of the top-left corner in virtual desktop space.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the top-left corner.
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the width × height of the rectangle.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Returns `true` if `point` (in virtual desktop space) lies inside
    /// this rectangle.  The right and bottom edges are exclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Converts a virtual-desktop position into this rectangle's local space.
    pub fn to_local(&self, global: Point) -> Point {
        Point::new(global.x - self.x, global.y - self.y)
    }

    /// Converts a local position into virtual desktop space.
    ///
    /// This is the single transform bridging "position inside the captured
    /// image" to "position the OS understands for synthetic input".
    pub fn to_virtual(&self, local: Point) -> Point {
        Point::new(self.x + local.x, self.y + local.y)
    }

    /// Clamps a local position into `[0, width-1] × [0, height-1]`.
    ///
    /// Returns the origin unchanged when the rectangle is degenerate.
    pub fn clip_local(&self, local: Point) -> Point {
        if self.width == 0 || self.height == 0 {
            return Point::default();
        }
        Point::new(
            local.x.clamp(0, self.width as i32 - 1),
            local.y.clamp(0, self.height as i32 - 1),
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Size ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_size_is_empty_when_width_is_zero() {
        assert!(Size::new(0, 1080).is_empty());
    }

    #[test]
    fn test_size_is_empty_when_height_is_zero() {
        assert!(Size::new(1920, 0).is_empty());
    }

    #[test]
    fn test_size_is_not_empty_for_positive_dimensions() {
        assert!(!Size::new(1, 1).is_empty());
    }

    // ── Rect bounds ───────────────────────────────────────────────────────────

    #[test]
    fn test_rect_right_and_bottom_are_exclusive_edges() {
        let rect = Rect::new(1920, 0, 1280, 1024);
        assert_eq!(rect.right(), 3200);
        assert_eq!(rect.bottom(), 1024);
    }

    #[test]
    fn test_rect_contains_interior_point() {
        let rect = Rect::new(0, 0, 1920, 1080);
        assert!(rect.contains(Point::new(960, 540)));
    }

    #[test]
    fn test_rect_contains_top_left_corner() {
        let rect = Rect::new(100, 200, 50, 50);
        assert!(rect.contains(Point::new(100, 200)));
    }

    #[test]
    fn test_rect_does_not_contain_exclusive_bottom_right_corner() {
        let rect = Rect::new(0, 0, 1920, 1080);
        assert!(!rect.contains(Point::new(1920, 1080)));
        assert!(rect.contains(Point::new(1919, 1079)));
    }

    #[test]
    fn test_rect_with_negative_origin_contains_negative_points() {
        // A display placed left of the primary.
        let rect = Rect::new(-1920, 0, 1920, 1080);
        assert!(rect.contains(Point::new(-1, 500)));
        assert!(!rect.contains(Point::new(0, 500)));
    }

    // ── Local/virtual conversions ─────────────────────────────────────────────

    #[test]
    fn test_to_virtual_is_pure_translation_by_top_left() {
        let rect = Rect::new(1920, 0, 1920, 1080);
        assert_eq!(rect.to_virtual(Point::new(10, 20)), Point::new(1930, 20));
    }

    #[test]
    fn test_to_local_inverts_to_virtual() {
        let rect = Rect::new(-1280, 720, 1280, 1024);
        let local = Point::new(333, 444);
        assert_eq!(rect.to_local(rect.to_virtual(local)), local);
    }

    // ── clip_local ────────────────────────────────────────────────────────────

    #[test]
    fn test_clip_local_clamps_out_of_range_coordinates() {
        let rect = Rect::new(0, 0, 1920, 1080);
        assert_eq!(rect.clip_local(Point::new(-5, 2000)), Point::new(0, 1079));
    }

    #[test]
    fn test_clip_local_passes_in_range_point_unchanged() {
        let rect = Rect::new(0, 0, 1920, 1080);
        assert_eq!(rect.clip_local(Point::new(10, 10)), Point::new(10, 10));
    }

    #[test]
    fn test_clip_local_on_degenerate_rect_returns_origin() {
        let rect = Rect::new(0, 0, 0, 0);
        assert_eq!(rect.clip_local(Point::new(50, 50)), Point::default());
    }
}
