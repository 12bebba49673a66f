//! Remote-cursor indicator state.
//!
//! The preview overlays a small marker showing where the real OS cursor
//! currently sits on the captured display.  This type holds the marker's
//! last known position in frame space; the polling loop in the application
//! layer feeds it fresh global cursor readings.

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect, Size};

/// Last known position of the real cursor on the captured display,
/// in frame-space (display-local) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCursorIndicator {
    position: Point,
}

impl RemoteCursorIndicator {
    /// Creates an indicator at the center of a frame.
    ///
    /// Used once, when the first real frame arrives, so the marker starts
    /// somewhere sensible instead of at the origin.
    pub fn centered_in(frame_size: Size) -> Self {
        Self {
            position: Point::new(frame_size.width as i32 / 2, frame_size.height as i32 / 2),
        }
    }

    /// Returns the current frame-space position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Updates the indicator from a global cursor reading.
    ///
    /// When the cursor is inside `display_geometry` the position becomes
    /// the cursor's display-local coordinates and `true` is returned.  When
    /// the cursor sits on some other display the previous position is
    /// retained and `false` is returned — the marker shows where the cursor
    /// last was on this display, not where it went.
    pub fn update_from_global(&mut self, global: Point, display_geometry: &Rect) -> bool {
        if !display_geometry.contains(global) {
            return false;
        }
        self.position = display_geometry.to_local(global);
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
