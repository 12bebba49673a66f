//! Integration tests for the capture pipeline.
//!
//! These tests exercise the application layer of deskmirror-app end-to-end:
//! `CaptureScheduler` + `FrameSource` + `PreviewSurface` + mock infrastructure.

use std::sync::Arc;

use deskmirror_app::application::capture_session::{CaptureEvent, CaptureScheduler, FrameSource};
use deskmirror_app::application::preview::PreviewSurface;
use deskmirror_app::infrastructure::display_registry::{DisplayRegistry, MockDisplayEnumerator};
use deskmirror_app::infrastructure::frame_grab::MockFrameGrabber;
use deskmirror_core::{Point, Size};

fn make_scheduler(should_fail_grab: bool) -> CaptureScheduler {
    let registry = DisplayRegistry::new(Arc::new(MockDisplayEnumerator::dual_1080p()));
    let grabber = Arc::new(MockFrameGrabber {
        should_fail: should_fail_grab,
        ..Default::default()
    });
    CaptureScheduler::new(FrameSource::new(grabber, registry), 40)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_frames_flow_from_scheduler_into_preview() {
    // Bind, start, tick; the published frame must reach the preview and
    // activate it with a centered cursor indicator.
    let mut scheduler = make_scheduler(false);
    let mut rx = scheduler.subscribe();
    let mut preview = PreviewSurface::new(Size::new(800, 600));

    assert!(scheduler.bind(0));
    scheduler.start(0);
    scheduler.tick_at(25);

    while let Ok(event) = rx.try_recv() {
        if let CaptureEvent::Frame(frame) = event {
            preview.on_frame(frame);
        }
    }

    assert!(preview.capture_active());
    assert!(preview.is_cursor_polling());
    assert_eq!(preview.latest_frame().size(), Size::new(1920, 1080));
    // Frame center (960, 540) maps to the surface center (400, 300).
    assert_eq!(preview.indicator_surface_position(), Some(Point::new(400, 300)));
}

#[test]
fn test_one_second_of_ticks_yields_measured_fps() {
    let mut scheduler = make_scheduler(false);
    scheduler.bind(0);
    scheduler.set_target_fps(40, 0);
    scheduler.start(0);

    // 40 evenly spaced ticks ending exactly at the 1s mark.
    for tick in 1..=40u64 {
        scheduler.tick_at(tick * 25);
    }

    assert_eq!(scheduler.current_fps(), 40);
}

#[test]
fn test_failed_grabs_deactivate_preview_but_pipeline_keeps_ticking() {
    // A grab failure publishes the empty frame; the preview drops to the
    // "no image" state and stops cursor polling, but the scheduler keeps
    // running so frames resume once the platform recovers.
    let mut scheduler = make_scheduler(true);
    let mut rx = scheduler.subscribe();
    let mut preview = PreviewSurface::new(Size::new(800, 600));

    scheduler.bind(0);
    scheduler.start(0);
    scheduler.tick_at(25);

    while let Ok(event) = rx.try_recv() {
        if let CaptureEvent::Frame(frame) = event {
            preview.on_frame(frame);
        }
    }

    assert!(!preview.capture_active());
    assert!(!preview.is_cursor_polling());
    assert!(scheduler.is_running());
}

#[test]
fn test_reselecting_display_stops_capture_until_restarted() {
    let mut scheduler = make_scheduler(false);
    scheduler.bind(0);
    scheduler.start(0);

    assert!(scheduler.bind(1));
    assert!(!scheduler.is_running(), "selecting another display must stop capture");
    assert_eq!(scheduler.bound_display().map(|d| d.index), Some(1));

    scheduler.start(0);
    assert!(scheduler.is_running());
}

#[test]
fn test_rate_change_mid_run_takes_effect_without_stopping() {
    let mut scheduler = make_scheduler(false);
    scheduler.bind(0);
    scheduler.start(0);

    scheduler.set_target_fps(10, 2_000);

    assert!(scheduler.is_running());
    assert_eq!(scheduler.interval(), std::time::Duration::from_millis(100));

    // The restarted window measures cleanly at the new rate.
    for tick in 1..=10u64 {
        scheduler.tick_at(2_000 + tick * 100);
    }
    assert_eq!(scheduler.current_fps(), 10);
}

#[test]
fn test_second_display_frames_match_its_geometry() {
    // Display 1 sits at x=1920; the grabbed frame still covers its full
    // 1920×1080 area in local pixels.
    let mut scheduler = make_scheduler(false);
    let mut rx = scheduler.subscribe();

    scheduler.bind(1);
    scheduler.start(0);
    scheduler.tick_at(25);

    let mut sizes = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let CaptureEvent::Frame(frame) = event {
            sizes.push(frame.size());
        }
    }
    assert_eq!(sizes, vec![Size::new(1920, 1080)]);
}
