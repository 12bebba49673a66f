//! ForwardInputUseCase: turns pointer intents into synthetic OS input.
//!
//! This use case receives [`PointerIntent`]s already expressed in frame
//! (display-local) coordinates, translates them into virtual-desktop
//! positions using the bound display's geometry, and delegates to a
//! [`PlatformPointerInjector`] for the actual OS calls.
//!
//! Two behaviours matter for correctness:
//!
//! - **Press implies position.**  Before any press the cursor is moved to
//!   the press position, so the button event lands where the operator
//!   clicked on the preview even if no move gesture preceded it.
//! - **Failures never escalate.**  A rejected OS injection call is logged
//!   and dropped.  The next intent is processed normally; one misbehaving
//!   injection must not take down the capture loop.

use std::sync::Arc;

use thiserror::Error;
use tracing::{trace, warn};

use deskmirror_core::{DisplayHandle, Point, PointerButton, PointerIntent, Rect};

/// Error type for pointer injection operations.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The platform API call to inject input failed.
    #[error("platform error while injecting input: {0}")]
    Platform(String),
}

/// Trait for injecting synthetic pointer input on the current platform.
///
/// Positions are absolute virtual-desktop coordinates.  [`PointerButton::Other`]
/// never reaches an implementation — the use case drops it beforehand.
pub trait PlatformPointerInjector: Send + Sync {
    /// Moves the OS cursor to an absolute position.
    fn inject_move(&self, position: Point) -> Result<(), InjectionError>;

    /// Presses or releases a pointer button at the given position.
    fn inject_button(
        &self,
        button: PointerButton,
        pressed: bool,
        position: Point,
    ) -> Result<(), InjectionError>;

    /// Turns the wheel by `delta` raw units (±120 per notch) at the position.
    fn inject_wheel(&self, delta: i32, position: Point) -> Result<(), InjectionError>;
}

/// Filters duplicate consecutive cursor positions to avoid injecting the
/// same move twice.
#[derive(Default)]
struct DedupFilter {
    last_position: Option<Point>,
}

impl DedupFilter {
    fn should_send_move(&mut self, position: Point) -> bool {
        if self.last_position == Some(position) {
            return false;
        }
        self.last_position = Some(position);
        true
    }

    fn reset(&mut self) {
        self.last_position = None;
    }
}

/// The Forward Input use case.
///
/// Holds the bound display's geometry and dispatches intents to the
/// platform injector.
pub struct InputInjector {
    injector: Arc<dyn PlatformPointerInjector>,
    geometry: Option<Rect>,
    dedup: DedupFilter,
}

impl InputInjector {
    /// Creates an unbound injector.
    pub fn new(injector: Arc<dyn PlatformPointerInjector>) -> Self {
        Self {
            injector,
            geometry: None,
            dedup: DedupFilter::default(),
        }
    }

    /// Binds the injector to a display; intents now target its geometry.
    ///
    /// Also clears the dedup state, since "same position" on a different
    /// display is a different virtual-desktop position.
    pub fn bind(&mut self, display: &DisplayHandle) {
        self.geometry = Some(display.geometry);
        self.dedup.reset();
    }

    /// Converts a frame-space position to an absolute virtual-desktop one.
    ///
    /// The position is clamped into the display first so a degenerate
    /// mapping can never inject outside the bound display.  Identity when
    /// no display is bound.
    pub fn to_virtual_desktop(&self, frame_point: Point) -> Point {
        match &self.geometry {
            Some(geometry) => geometry.to_virtual(geometry.clip_local(frame_point)),
            None => frame_point,
        }
    }

    /// Dispatches one intent to the platform injector.
    ///
    /// Injection failures are logged and swallowed; unmapped buttons are
    /// dropped silently.
    pub fn handle(&mut self, intent: PointerIntent) {
        match intent {
            PointerIntent::Move { position } => self.move_to(position),
            PointerIntent::Press { position, button } => self.press(position, button),
            PointerIntent::Release { position, button } => self.release(position, button),
            PointerIntent::Click { position, button } => {
                self.press(position, button);
                self.release(position, button);
            }
            PointerIntent::Wheel { position, delta } => self.wheel(position, delta),
        }
    }

    /// Resets internal state (e.g., after rebinding or a capture restart).
    pub fn reset(&mut self) {
        self.dedup.reset();
    }

    fn move_to(&mut self, frame_point: Point) {
        let position = self.to_virtual_desktop(frame_point);
        if !self.dedup.should_send_move(position) {
            return;
        }
        if let Err(e) = self.injector.inject_move(position) {
            warn!("pointer move injection failed: {e}");
        }
    }

    fn press(&mut self, frame_point: Point, button: PointerButton) {
        if button == PointerButton::Other {
            trace!("dropping press of unmapped pointer button");
            return;
        }
        // Position the cursor before the button event so the press lands
        // where the operator clicked even without a preceding move.
        self.move_to(frame_point);

        let position = self.to_virtual_desktop(frame_point);
        if let Err(e) = self.injector.inject_button(button, true, position) {
            warn!("button press injection failed: {e}");
        }
    }

    fn release(&mut self, frame_point: Point, button: PointerButton) {
        if button == PointerButton::Other {
            trace!("dropping release of unmapped pointer button");
            return;
        }
        let position = self.to_virtual_desktop(frame_point);
        if let Err(e) = self.injector.inject_button(button, false, position) {
            warn!("button release injection failed: {e}");
        }
    }

    fn wheel(&mut self, frame_point: Point, delta: i32) {
        let position = self.to_virtual_desktop(frame_point);
        if let Err(e) = self.injector.inject_wheel(delta, position) {
            warn!("wheel injection failed: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
