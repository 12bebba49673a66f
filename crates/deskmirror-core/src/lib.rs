//! # deskmirror-core
//!
//! Shared library for deskmirror containing the pure domain entities:
//! geometry primitives, the preview scale transform, the captured-frame
//! value type, FPS measurement, and capture-session state.
//!
//! This crate is used by the application crate.  It has zero dependencies
//! on OS APIs, UI frameworks, or timers — everything here is deterministic
//! and testable without a display attached.
//!
//! # Architecture overview (for beginners)
//!
//! Deskmirror lets an operator watch a live snapshot of one display among
//! several attached to the local machine, and forward pointer input (move,
//! click, wheel) back onto that display.  It is a single-machine, same-process
//! control loop — no network, no remote host.
//!
//! The domain split is:
//!
//! - **`domain::geometry`** – points, sizes, and rectangles in the two
//!   coordinate spaces the app juggles: the *virtual desktop* (all displays
//!   unified, each offset by its top-left corner) and *display-local* pixels.
//!
//! - **`domain::transform`** – the aspect-preserving scale + centering offset
//!   between a variable-size preview surface and a fixed-size captured frame,
//!   plus the bidirectional position conversions built on it.
//!
//! - **`domain::fps`** – target-FPS clamping, tick-interval derivation, and
//!   the windowed frames-per-second measurement.
//!
//! - **`domain::frame`**, **`domain::cursor`**, **`domain::session`**,
//!   **`domain::input`** – plain-data entities shared between the capture
//!   scheduler, the preview surface, and the input forwarder.

// Rust will look for the module in src/domain/mod.rs.
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `deskmirror_core::CoordinateMapper` instead of the full path.
pub use domain::cursor::RemoteCursorIndicator;
pub use domain::display::DisplayHandle;
pub use domain::fps::{capture_interval, clamp_target_fps, FpsWindow, MAX_TARGET_FPS, MIN_TARGET_FPS};
pub use domain::frame::{Frame, BYTES_PER_PIXEL};
pub use domain::geometry::{Point, Rect, Size};
pub use domain::input::{PointerButton, PointerGesture, PointerIntent, WHEEL_NOTCH};
pub use domain::session::CaptureSession;
pub use domain::transform::{CoordinateMapper, ScaleTransform};
