//! Pointer input vocabulary.
//!
//! Two layers of the same events exist on purpose:
//!
//! - [`PointerGesture`] is what the preview surface receives, in *surface*
//!   coordinates — raw operator interaction with the widget.
//! - [`PointerIntent`] is what the input forwarder consumes, in *frame*
//!   (display-local) coordinates — the preview surface translates gestures
//!   into intents via its coordinate mapper, so everything past that point
//!   is already display-relative.
//!
//! Wheel amounts use the conventional notch unit: one detent of a typical
//! wheel is ±120, positive away from the operator.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// One wheel detent, in raw delta units.
pub const WHEEL_NOTCH: i32 = 120;

/// A physical pointer button.
///
/// `Other` covers buttons the forwarder has no mapping for (back/forward
/// thumb buttons and the like); they are dropped silently downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// Operator interaction with the preview surface, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerGesture {
    Move { position: Point },
    Press { position: Point, button: PointerButton },
    Release { position: Point, button: PointerButton },
    Wheel { position: Point, delta: i32 },
}

/// An action to reproduce on the captured display, in frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerIntent {
    Move { position: Point },
    Press { position: Point, button: PointerButton },
    Release { position: Point, button: PointerButton },
    Click { position: Point, button: PointerButton },
    Wheel { position: Point, delta: i32 },
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_notch_matches_conventional_detent() {
        assert_eq!(WHEEL_NOTCH, 120);
    }
}
