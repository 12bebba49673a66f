//! PreviewUseCase: preview surface state and gesture translation.
//!
//! The [`PreviewSurface`] is the UI-facing side of the pipeline.  It keeps
//! the latest frame, maintains the scale transform between that frame and
//! the current surface size, tracks the remote-cursor indicator, and turns
//! raw surface gestures into frame-space [`PointerIntent`]s for the input
//! forwarder.
//!
//! # Indicator lifecycle
//!
//! The indicator does not exist until the first non-empty frame arrives;
//! it is then placed at the frame's center and the 50ms cursor polling
//! begins.  An empty frame (grab failure or unbound source) stops polling
//! — there is nothing meaningful to overlay on "no image" — but keeps the
//! indicator's last position for when frames resume.

use std::time::Duration;

use tracing::debug;

use deskmirror_core::{
    CoordinateMapper, Frame, Point, PointerGesture, PointerIntent, Rect, RemoteCursorIndicator,
    Size,
};

/// How often the real cursor's global position is sampled for the overlay.
pub const CURSOR_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Trait for reading the real cursor's global position.
///
/// Each supported OS provides an implementation in the infrastructure layer.
pub trait PlatformPointerLocator: Send + Sync {
    /// Returns the cursor position in virtual desktop space, or `None`
    /// when the platform cannot report one.
    fn global_position(&self) -> Option<Point>;
}

/// UI-facing preview state: latest frame, transform, and cursor overlay.
pub struct PreviewSurface {
    latest_frame: Frame,
    mapper: CoordinateMapper,
    surface_size: Size,
    indicator: Option<RemoteCursorIndicator>,
    cursor_polling: bool,
}

impl PreviewSurface {
    /// Creates an empty preview of the given surface size.
    pub fn new(surface_size: Size) -> Self {
        Self {
            latest_frame: Frame::empty(),
            mapper: CoordinateMapper::new(),
            surface_size,
            indicator: None,
            cursor_polling: false,
        }
    }

    /// Applies a surface resize; the transform follows immediately.
    pub fn set_surface_size(&mut self, surface_size: Size) {
        self.surface_size = surface_size;
        self.mapper.recompute(self.latest_frame.size(), surface_size);
    }

    /// Returns the current surface size.
    pub fn surface_size(&self) -> Size {
        self.surface_size
    }

    /// Accepts the next frame from the capture pipeline.
    ///
    /// An empty frame stops cursor polling.  The first real frame places
    /// the indicator at the frame center and starts polling; later frames
    /// leave an existing indicator alone.
    pub fn on_frame(&mut self, frame: Frame) {
        if frame.is_empty() {
            self.latest_frame = frame;
            self.cursor_polling = false;
            return;
        }

        self.mapper.recompute(frame.size(), self.surface_size);
        if self.indicator.is_none() {
            debug!("first frame received; starting cursor polling");
            self.indicator = Some(RemoteCursorIndicator::centered_in(frame.size()));
            self.cursor_polling = true;
        }
        self.latest_frame = frame;
    }

    /// Returns the latest frame for rendering.
    pub fn latest_frame(&self) -> &Frame {
        &self.latest_frame
    }

    /// Returns the current scale mapper.
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Returns `true` while a real image is on screen.
    pub fn capture_active(&self) -> bool {
        !self.latest_frame.is_empty()
    }

    /// Returns `true` while the cursor overlay is being refreshed.
    pub fn is_cursor_polling(&self) -> bool {
        self.cursor_polling
    }

    /// Samples the real cursor and updates the indicator.
    ///
    /// No-op while polling is off.  A cursor sitting on another display
    /// leaves the indicator where it last was on this one.
    pub fn poll_remote_cursor(
        &mut self,
        locator: &dyn PlatformPointerLocator,
        display_geometry: &Rect,
    ) {
        if !self.cursor_polling {
            return;
        }
        let Some(indicator) = &mut self.indicator else {
            return;
        };
        if let Some(global) = locator.global_position() {
            indicator.update_from_global(global, display_geometry);
        }
    }

    /// Returns where to draw the indicator, in surface coordinates.
    ///
    /// Unclamped on purpose: the marker can legitimately sit in the
    /// letterbox margin when the tracked display is larger than the frame
    /// shown.  `None` before the first frame.
    pub fn indicator_surface_position(&self) -> Option<Point> {
        self.indicator
            .map(|i| self.mapper.to_surface_space(i.position()))
    }

    /// Translates one surface gesture into the intents to forward.
    ///
    /// Returns nothing while no image is shown — gestures on the "no
    /// image" placeholder must not reach the real display.  A press
    /// produces a move intent first so the button lands at the right spot.
    pub fn handle_gesture(&self, gesture: PointerGesture) -> Vec<PointerIntent> {
        if !self.capture_active() {
            return Vec::new();
        }

        match gesture {
            PointerGesture::Move { position } => vec![PointerIntent::Move {
                position: self.mapper.to_frame_space(position),
            }],
            PointerGesture::Press { position, button } => {
                let frame_position = self.mapper.to_frame_space(position);
                vec![
                    PointerIntent::Move { position: frame_position },
                    PointerIntent::Press { position: frame_position, button },
                ]
            }
            PointerGesture::Release { position, button } => vec![PointerIntent::Release {
                position: self.mapper.to_frame_space(position),
                button,
            }],
            PointerGesture::Wheel { position, delta } => vec![PointerIntent::Wheel {
                position: self.mapper.to_frame_space(position),
                delta,
            }],
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
