//! CaptureSessionUseCase: binds a display and drives the frame pipeline.
//!
//! Two collaborators live here:
//!
//! - [`FrameSource`] wraps a [`PlatformFrameGrabber`] and the display
//!   registry.  It resolves a display index to a geometry at bind time and
//!   produces one [`Frame`] per request.  It never fails outward: an
//!   unbound source or a failed platform grab yields the *empty* frame,
//!   which the preview renders as "no screen image available".
//! - [`CaptureScheduler`] owns the timing model: the clamped target frame
//!   rate, the derived tick interval, the running flag, and the windowed
//!   FPS measurement.  Each tick grabs one frame and publishes it to the
//!   subscribers along with FPS updates.
//!
//! # Why ticks take a timestamp (for beginners)
//!
//! `tick_at(now_ms)` receives the current time instead of reading the
//! clock itself.  The binary passes real elapsed milliseconds; tests pass
//! synthetic timestamps, so the FPS arithmetic can be verified without
//! sleeping through wall-clock seconds.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use deskmirror_core::{
    capture_interval, clamp_target_fps, CaptureSession, DisplayHandle, FpsWindow, Frame, Rect,
};

use crate::infrastructure::display_registry::DisplayRegistry;

/// Error type for platform screen capture operations.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The platform API call to grab the screen failed.
    #[error("platform error while grabbing screen: {0}")]
    Platform(String),
}

/// Trait for grabbing one still frame of a display region.
///
/// Each supported OS provides an implementation in the infrastructure layer.
pub trait PlatformFrameGrabber: Send + Sync {
    /// Grabs the pixels of `region` (in virtual desktop space) as a BGRA frame.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Platform`] if the OS capture call fails.
    fn grab(&self, region: &Rect) -> Result<Frame, CaptureError>;
}

/// Events published by the [`CaptureScheduler`] to its subscribers.
#[derive(Debug, Clone)]
pub enum CaptureEvent {
    /// A new frame was produced (possibly the empty frame after a failed grab).
    Frame(Frame),
    /// The measured frame rate changed.
    FpsUpdated(u32),
}

// ── Frame source ──────────────────────────────────────────────────────────────

/// Produces frames of the currently bound display.
pub struct FrameSource {
    grabber: Arc<dyn PlatformFrameGrabber>,
    registry: DisplayRegistry,
    bound: Option<DisplayHandle>,
}

impl FrameSource {
    /// Creates an unbound source.
    pub fn new(grabber: Arc<dyn PlatformFrameGrabber>, registry: DisplayRegistry) -> Self {
        Self {
            grabber,
            registry,
            bound: None,
        }
    }

    /// Binds the source to the display at `index`.
    ///
    /// Returns `true` on success.  On failure (index out of range or the
    /// registry cannot enumerate) the previous binding — if any — stays in
    /// effect and `false` is returned.
    pub fn bind(&mut self, index: i32) -> bool {
        match self.registry.resolve(index) {
            Ok(handle) => {
                info!("frame source bound to {handle}");
                self.bound = Some(handle);
                true
            }
            Err(e) => {
                warn!("cannot bind display {index}: {e}");
                false
            }
        }
    }

    /// Returns the currently bound display, if any.
    pub fn bound_display(&self) -> Option<DisplayHandle> {
        self.bound
    }

    /// Grabs one frame of the bound display.
    ///
    /// Returns the empty frame when the source is unbound or the platform
    /// grab fails; capture errors are logged, never propagated.
    pub fn capture_once(&self) -> Frame {
        let Some(handle) = self.bound else {
            return Frame::empty();
        };

        match self.grabber.grab(&handle.geometry) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("frame grab failed on display {}: {e}", handle.index);
                Frame::empty()
            }
        }
    }
}

// ── Capture scheduler ─────────────────────────────────────────────────────────

/// Drives the capture loop: target rate, running state, FPS measurement,
/// and frame publication.
pub struct CaptureScheduler {
    source: FrameSource,
    session: Option<CaptureSession>,
    target_fps: u32,
    fps_window: FpsWindow,
    subscribers: Vec<mpsc::UnboundedSender<CaptureEvent>>,
}

impl CaptureScheduler {
    /// Creates a stopped scheduler around `source`.
    ///
    /// `target_fps` is clamped into the accepted range immediately.
    pub fn new(source: FrameSource, target_fps: u32) -> Self {
        Self {
            source,
            session: None,
            target_fps: clamp_target_fps(target_fps),
            fps_window: FpsWindow::new(),
            subscribers: Vec::new(),
        }
    }

    /// Registers a subscriber and returns its event receiver.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CaptureEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    /// Binds the scheduler to the display at `index`.
    ///
    /// Selecting a *different* display while capture runs stops capture
    /// first; the operator restarts it explicitly.  On success a fresh
    /// session is created; on failure the previous binding and session
    /// stay untouched and `false` is returned.
    pub fn bind(&mut self, index: i32) -> bool {
        let rebinding = self
            .source
            .bound_display()
            .is_some_and(|d| d.index != index);
        if rebinding && self.is_running() {
            info!("display reselected while capturing; stopping capture");
            self.stop();
        }

        if !self.source.bind(index) {
            return false;
        }

        // A new binding means a new session; measured FPS starts from zero.
        if let Some(bound) = self.source.bound_display() {
            let session = CaptureSession::new(bound, self.target_fps);
            debug!("capture session {} created for {}", session.id, bound);
            self.session = Some(session);
        }
        true
    }

    /// Returns the currently bound display, if any.
    pub fn bound_display(&self) -> Option<DisplayHandle> {
        self.source.bound_display()
    }

    /// Changes the target frame rate, clamping into the accepted range.
    ///
    /// When capture is running it is stopped and restarted so the new tick
    /// interval takes effect immediately; `now_ms` anchors the restarted
    /// FPS window.
    pub fn set_target_fps(&mut self, requested: u32, now_ms: u64) {
        let fps = clamp_target_fps(requested);
        if fps != requested {
            debug!("target fps {requested} clamped to {fps}");
        }

        let was_running = self.is_running();
        if was_running {
            self.stop();
        }

        self.target_fps = fps;
        if let Some(session) = &mut self.session {
            session.target_fps = fps;
        }

        if was_running {
            self.start(now_ms);
        }
    }

    /// Returns the clamped target frame rate.
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Returns the tick interval derived from the target frame rate.
    pub fn interval(&self) -> std::time::Duration {
        capture_interval(self.target_fps)
    }

    /// Starts capture.
    ///
    /// No-op when already running or when no display is bound.  Restarts
    /// the FPS window so frames from a previous run never count.
    pub fn start(&mut self, now_ms: u64) {
        let Some(session) = &mut self.session else {
            warn!("start requested with no display bound");
            return;
        };
        if session.running {
            return;
        }

        session.running = true;
        self.fps_window.restart(now_ms);
        info!(
            "capture started on {} at {} fps target",
            session.bound_display, session.target_fps
        );
    }

    /// Stops capture.  Idempotent; the measured rate drops to zero.
    pub fn stop(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };
        if !session.running {
            return;
        }

        session.running = false;
        session.current_fps = 0;
        info!("capture stopped on {}", session.bound_display);
        Self::publish(&mut self.subscribers, CaptureEvent::FpsUpdated(0));
    }

    /// Returns `true` while the capture loop is ticking.
    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.running)
    }

    /// Returns the measured frame rate; zero while stopped.
    pub fn current_fps(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.current_fps)
    }

    /// Performs one capture tick at the given timestamp.
    ///
    /// No-op while stopped.  Grabs one frame, publishes it, records it in
    /// the FPS window, and publishes a rate update once per elapsed second.
    pub fn tick_at(&mut self, now_ms: u64) {
        if !self.is_running() {
            return;
        }

        let frame = self.source.capture_once();
        Self::publish(&mut self.subscribers, CaptureEvent::Frame(frame));

        if let Some(fps) = self.fps_window.record_frame(now_ms) {
            if let Some(session) = &mut self.session {
                session.current_fps = fps;
            }
            debug!("measured capture rate: {fps} fps");
            Self::publish(&mut self.subscribers, CaptureEvent::FpsUpdated(fps));
        }
    }

    /// Sends `event` to every live subscriber, dropping closed channels.
    fn publish(subscribers: &mut Vec<mpsc::UnboundedSender<CaptureEvent>>, event: CaptureEvent) {
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
