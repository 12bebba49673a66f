//! Capture-session state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::display::DisplayHandle;

/// State of one binding between the capture pipeline and a display.
///
/// A session is created when a display is bound and replaced wholesale when
/// the operator binds a different one.  The id ties log lines from the
/// scheduler, the forwarder, and the preview to the same binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSession {
    /// Unique id for this binding, used to correlate log lines.
    pub id: Uuid,
    /// The display this session captures from and injects into.
    pub bound_display: DisplayHandle,
    /// Clamped target frame rate.
    pub target_fps: u32,
    /// Measured frame rate; zero while capture is stopped.
    pub current_fps: u32,
    /// Whether the capture loop is ticking.
    pub running: bool,
}

impl CaptureSession {
    /// Creates a stopped session bound to `display`.
    pub fn new(display: DisplayHandle, target_fps: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            bound_display: display,
            target_fps,
            current_fps: 0,
            running: false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Rect;

    #[test]
    fn test_new_session_starts_stopped_with_zero_measured_fps() {
        let display = DisplayHandle::new(1, Rect::new(1920, 0, 1920, 1080));
        let session = CaptureSession::new(display, 40);

        assert!(!session.running);
        assert_eq!(session.current_fps, 0);
        assert_eq!(session.target_fps, 40);
        assert_eq!(session.bound_display, display);
    }

    #[test]
    fn test_each_session_gets_a_distinct_id() {
        let display = DisplayHandle::new(0, Rect::new(0, 0, 1280, 720));
        let a = CaptureSession::new(display, 40);
        let b = CaptureSession::new(display, 40);
        assert_ne!(a.id, b.id);
    }
}
