//! Target-FPS clamping, tick-interval derivation, and measured FPS.
//!
//! # How the capture rate works (for beginners)
//!
//! The operator picks a *target* frame rate; the scheduler derives a fixed
//! tick interval from it (`1000 / fps` whole milliseconds) and grabs one
//! frame per tick.  Separately, [`FpsWindow`] counts the frames actually
//! produced and reports a *measured* rate once per elapsed second — the
//! number shown in the status bar.  The two can differ: a slow platform
//! grab drags the measured rate below the target.

use std::time::Duration;

/// Lowest accepted target frame rate.
pub const MIN_TARGET_FPS: u32 = 1;

/// Highest accepted target frame rate.
pub const MAX_TARGET_FPS: u32 = 60;

/// Clamps a requested target frame rate into `[1, 60]`.
pub fn clamp_target_fps(requested: u32) -> u32 {
    requested.clamp(MIN_TARGET_FPS, MAX_TARGET_FPS)
}

/// Derives the capture tick interval from a (clamped) target frame rate.
///
/// Whole-millisecond division: 60 fps ticks every 16ms, 40 fps every 25ms.
pub fn capture_interval(target_fps: u32) -> Duration {
    let fps = clamp_target_fps(target_fps);
    Duration::from_millis(1000 / fps as u64)
}

/// Windowed frames-per-second measurement.
///
/// Feed it each produced frame with a millisecond timestamp; it reports a
/// rounded rate whenever at least one full second has elapsed since the
/// last report, then starts a fresh window.
#[derive(Debug, Clone, Default)]
pub struct FpsWindow {
    frame_count: u32,
    last_update_ms: u64,
}

impl FpsWindow {
    /// Creates a window that has not started measuring yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the counter and anchors the window at `now_ms`.
    ///
    /// Called when capture starts or restarts so frames from a previous run
    /// never leak into the new measurement.
    pub fn restart(&mut self, now_ms: u64) {
        self.frame_count = 0;
        self.last_update_ms = now_ms;
    }

    /// Records one produced frame.
    ///
    /// Returns `Some(measured_fps)` when a full second has elapsed since
    /// the window anchor, `None` otherwise.  The measured value is rounded
    /// to the nearest whole frame per second.
    pub fn record_frame(&mut self, now_ms: u64) -> Option<u32> {
        self.frame_count += 1;

        let elapsed_ms = now_ms.saturating_sub(self.last_update_ms);
        if elapsed_ms < 1000 {
            return None;
        }

        let fps = ((self.frame_count as u64 * 1000) as f64 / elapsed_ms as f64).round() as u32;
        self.frame_count = 0;
        self.last_update_ms = now_ms;
        Some(fps)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── clamp_target_fps ──────────────────────────────────────────────────────

    #[test]
    fn test_clamp_caps_excessive_fps_at_sixty() {
        assert_eq!(clamp_target_fps(200), 60);
    }

    #[test]
    fn test_clamp_raises_zero_fps_to_one() {
        assert_eq!(clamp_target_fps(0), 1);
    }

    #[test]
    fn test_clamp_passes_in_range_fps_unchanged() {
        assert_eq!(clamp_target_fps(40), 40);
        assert_eq!(clamp_target_fps(1), 1);
        assert_eq!(clamp_target_fps(60), 60);
    }

    // ── capture_interval ──────────────────────────────────────────────────────

    #[test]
    fn test_interval_uses_whole_millisecond_division() {
        assert_eq!(capture_interval(60), Duration::from_millis(16));
        assert_eq!(capture_interval(40), Duration::from_millis(25));
        assert_eq!(capture_interval(30), Duration::from_millis(33));
        assert_eq!(capture_interval(1), Duration::from_millis(1000));
    }

    #[test]
    fn test_interval_clamps_out_of_range_input() {
        assert_eq!(capture_interval(0), Duration::from_millis(1000));
        assert_eq!(capture_interval(1000), Duration::from_millis(16));
    }

    // ── FpsWindow ─────────────────────────────────────────────────────────────

    #[test]
    fn test_window_reports_nothing_before_a_full_second() {
        let mut window = FpsWindow::new();
        window.restart(0);

        for tick in 1..=20 {
            assert_eq!(window.record_frame(tick * 33), None);
        }
    }

    #[test]
    fn test_window_reports_thirty_for_thirty_frames_in_one_second() {
        let mut window = FpsWindow::new();
        window.restart(0);

        let mut reported = None;
        for tick in 1..=30u64 {
            if let Some(fps) = window.record_frame(tick * 33 + 10) {
                reported = Some(fps);
            }
        }

        // Frame 30 lands at t=1000ms: 30 frames / 1.0s rounds to 30.
        assert_eq!(reported, Some(30));
    }

    #[test]
    fn test_window_rounds_measured_rate_to_nearest_whole_fps() {
        let mut window = FpsWindow::new();
        window.restart(0);

        for _ in 0..39 {
            assert_eq!(window.record_frame(500), None);
        }
        // 40 frames over 1100ms = 36.36 fps, rounds to 36.
        assert_eq!(window.record_frame(1100), Some(36));
    }

    #[test]
    fn test_window_starts_fresh_after_each_report() {
        let mut window = FpsWindow::new();
        window.restart(0);

        for _ in 0..9 {
            window.record_frame(900);
        }
        assert_eq!(window.record_frame(1000), Some(10));

        // The next second counts only its own frames.
        for _ in 0..4 {
            assert_eq!(window.record_frame(1500), None);
        }
        assert_eq!(window.record_frame(2000), Some(5));
    }

    #[test]
    fn test_restart_discards_frames_from_previous_run() {
        let mut window = FpsWindow::new();
        window.restart(0);
        for _ in 0..50 {
            window.record_frame(400);
        }

        window.restart(5000);

        assert_eq!(window.record_frame(5500), None);
        assert_eq!(window.record_frame(6000), Some(2));
    }
}
