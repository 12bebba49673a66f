//! Preview scale transform and bidirectional position conversion.
//!
//! The preview surface shows a captured frame scaled down (or up) to fit a
//! differently proportioned surface while preserving the frame's aspect
//! ratio.  The scaled image is centered, leaving letterbox margins on one
//! axis.  [`ScaleTransform`] holds the resulting scale factor and centering
//! offsets; [`CoordinateMapper`] owns the transform, recomputes it whenever
//! the frame or surface size changes, and converts positions in both
//! directions:
//!
//! ```text
//!   surface space  ──to_frame_space──▶  frame space   (clamped)
//!   frame space    ──to_surface_space▶  surface space (unclamped)
//! ```
//!
//! `to_frame_space` clamps into `[0, dim-1]` so that pointer events landing
//! in the letterbox margin still map to a valid pixel of the last known
//! frame.  `to_surface_space` is used only for indicator rendering and is
//! deliberately unclamped: the remote cursor may belong to a larger display
//! than the one currently previewed and legitimately land off-surface.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Size};

/// Scale factor and centering offset between frame and surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTransform {
    /// Uniform scale applied to the frame, `min(sw/fw, sh/fh)`.
    pub scale: f64,
    /// Horizontal offset of the scaled image's left edge, floored.
    pub offset_x: i32,
    /// Vertical offset of the scaled image's top edge, floored.
    pub offset_y: i32,
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0,
            offset_y: 0,
        }
    }
}

/// Maintains the [`ScaleTransform`] between the latest frame and the
/// current preview surface, and converts positions between the two spaces.
///
/// Both conversions are pure functions of the current transform; there is
/// no hidden state beyond it.
#[derive(Debug, Clone, Default)]
pub struct CoordinateMapper {
    transform: ScaleTransform,
    frame_size: Size,
    surface_size: Size,
}

impl CoordinateMapper {
    /// Creates a mapper with the identity transform and no frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current transform.
    pub fn transform(&self) -> ScaleTransform {
        self.transform
    }

    /// Returns the frame size of the last successful recompute.
    pub fn frame_size(&self) -> Size {
        self.frame_size
    }

    /// Recomputes scale and offsets from the given frame and surface sizes.
    ///
    /// No-op when `frame_size` is degenerate (zero in either dimension):
    /// the previous transform stays in effect until a real frame arrives.
    pub fn recompute(&mut self, frame_size: Size, surface_size: Size) {
        if frame_size.is_empty() {
            return;
        }

        let scale_x = surface_size.width as f64 / frame_size.width as f64;
        let scale_y = surface_size.height as f64 / frame_size.height as f64;
        let scale = scale_x.min(scale_y);

        let scaled_width = (frame_size.width as f64 * scale) as i32;
        let scaled_height = (frame_size.height as f64 * scale) as i32;

        self.transform = ScaleTransform {
            scale,
            offset_x: (surface_size.width as i32 - scaled_width) / 2,
            offset_y: (surface_size.height as i32 - scaled_height) / 2,
        };
        self.frame_size = frame_size;
        self.surface_size = surface_size;
    }

    /// Returns the size of the scaled image as rendered on the surface.
    pub fn scaled_size(&self) -> Size {
        Size::new(
            (self.frame_size.width as f64 * self.transform.scale) as u32,
            (self.frame_size.height as f64 * self.transform.scale) as u32,
        )
    }

    /// Converts a surface-space position to frame space.
    ///
    /// The result is clamped into `[0, width-1] × [0, height-1]`, so it is
    /// always a valid pixel coordinate of the last known frame — including
    /// for pointer positions in the letterbox margin or outside the surface
    /// entirely.  Returns the origin when no frame has been seen yet.
    pub fn to_frame_space(&self, surface_point: Point) -> Point {
        if self.frame_size.is_empty() {
            return Point::default();
        }

        let frame_x = ((surface_point.x - self.transform.offset_x) as f64 / self.transform.scale) as i32;
        let frame_y = ((surface_point.y - self.transform.offset_y) as f64 / self.transform.scale) as i32;

        Point::new(
            frame_x.clamp(0, self.frame_size.width as i32 - 1),
            frame_y.clamp(0, self.frame_size.height as i32 - 1),
        )
    }

    /// Converts a frame-space position to surface space.
    ///
    /// Not clamped: the result may land in the margin or off-surface when
    /// the position belongs to a display larger than the previewed frame.
    /// Returns the origin when no frame has been seen yet.
    pub fn to_surface_space(&self, frame_point: Point) -> Point {
        if self.frame_size.is_empty() {
            return Point::default();
        }

        Point::new(
            self.transform.offset_x + (frame_point.x as f64 * self.transform.scale) as i32,
            self.transform.offset_y + (frame_point.y as f64 * self.transform.scale) as i32,
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper_1080p_in_800x600() -> CoordinateMapper {
        let mut mapper = CoordinateMapper::new();
        mapper.recompute(Size::new(1920, 1080), Size::new(800, 600));
        mapper
    }

    // ── recompute ─────────────────────────────────────────────────────────────

    #[test]
    fn test_recompute_picks_smaller_axis_scale_and_centers_vertically() {
        // 1920x1080 frame in an 800x600 surface:
        // scale = min(800/1920, 600/1080) = 0.41666…, image = 800x450,
        // centered vertically with 75px letterbox bands.
        let mapper = mapper_1080p_in_800x600();
        let t = mapper.transform();

        assert!((t.scale - 800.0 / 1920.0).abs() < 1e-9);
        assert_eq!(t.offset_x, 0);
        assert_eq!(t.offset_y, 75);
        assert_eq!(mapper.scaled_size(), Size::new(800, 450));
    }

    #[test]
    fn test_recompute_centers_horizontally_for_tall_surface() {
        // A portrait surface letterboxes left/right instead.
        let mut mapper = CoordinateMapper::new();
        mapper.recompute(Size::new(1920, 1080), Size::new(600, 800));

        let t = mapper.transform();
        // scale = min(600/1920, 800/1080) = 0.3125, image = 600x337
        assert!((t.scale - 0.3125).abs() < 1e-9);
        assert_eq!(t.offset_x, 0);
        assert_eq!(t.offset_y, (800 - 337) / 2);
    }

    #[test]
    fn test_recompute_is_noop_for_degenerate_frame() {
        let mut mapper = mapper_1080p_in_800x600();
        let before = mapper.transform();

        mapper.recompute(Size::new(0, 1080), Size::new(640, 480));

        assert_eq!(mapper.transform(), before);
        assert_eq!(mapper.frame_size(), Size::new(1920, 1080));
    }

    #[test]
    fn test_recompute_with_matching_aspect_ratio_has_zero_offsets() {
        let mut mapper = CoordinateMapper::new();
        mapper.recompute(Size::new(1920, 1080), Size::new(960, 540));

        let t = mapper.transform();
        assert_eq!((t.offset_x, t.offset_y), (0, 0));
        assert!((t.scale - 0.5).abs() < 1e-9);
    }

    // ── to_frame_space ────────────────────────────────────────────────────────

    #[test]
    fn test_to_frame_space_maps_image_top_left_to_frame_origin() {
        let mapper = mapper_1080p_in_800x600();
        // Surface (0, 75) is the top-left corner of the rendered image.
        assert_eq!(mapper.to_frame_space(Point::new(0, 75)), Point::new(0, 0));
    }

    #[test]
    fn test_to_frame_space_clamps_letterbox_margin_to_valid_pixels() {
        let mapper = mapper_1080p_in_800x600();
        // A click in the top letterbox band clamps to row 0.
        let p = mapper.to_frame_space(Point::new(400, 10));
        assert_eq!(p.y, 0);
        assert!(p.x >= 0 && p.x < 1920);
    }

    #[test]
    fn test_to_frame_space_clamps_arbitrary_outside_points_into_bounds() {
        let mapper = mapper_1080p_in_800x600();
        for surface_point in [
            Point::new(-100, -100),
            Point::new(10_000, 10_000),
            Point::new(-5, 599),
            Point::new(799, -5),
        ] {
            let p = mapper.to_frame_space(surface_point);
            assert!(p.x >= 0 && p.x <= 1919, "x out of range: {p:?}");
            assert!(p.y >= 0 && p.y <= 1079, "y out of range: {p:?}");
        }
    }

    #[test]
    fn test_to_frame_space_without_frame_returns_origin() {
        let mapper = CoordinateMapper::new();
        assert_eq!(mapper.to_frame_space(Point::new(400, 300)), Point::default());
    }

    // ── to_surface_space ──────────────────────────────────────────────────────

    #[test]
    fn test_to_surface_space_is_not_clamped() {
        let mapper = mapper_1080p_in_800x600();
        // A frame point from a (hypothetical) larger display lands off-surface.
        let p = mapper.to_surface_space(Point::new(4000, 3000));
        assert!(p.x > 800 || p.y > 600);
    }

    #[test]
    fn test_to_surface_space_maps_frame_origin_to_image_offset() {
        let mapper = mapper_1080p_in_800x600();
        assert_eq!(mapper.to_surface_space(Point::new(0, 0)), Point::new(0, 75));
    }

    // ── round trip ────────────────────────────────────────────────────────────

    #[test]
    fn test_round_trip_within_one_pixel_for_interior_points() {
        let mapper = mapper_1080p_in_800x600();
        for frame_point in [
            Point::new(1, 1),
            Point::new(500, 500),
            Point::new(960, 540),
            Point::new(1918, 1078),
            Point::new(17, 923),
        ] {
            let back = mapper.to_frame_space(mapper.to_surface_space(frame_point));
            assert!(
                (back.x - frame_point.x).abs() <= 1 && (back.y - frame_point.y).abs() <= 1,
                "round trip drifted more than one pixel: {frame_point:?} -> {back:?}"
            );
        }
    }
}
