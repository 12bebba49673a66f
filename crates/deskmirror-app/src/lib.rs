//! deskmirror-app library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does deskmirror do? (for beginners)
//!
//! Deskmirror shows a live preview of one display attached to the local
//! machine and forwards pointer input performed on that preview back onto
//! the display it mirrors.  Everything happens on one machine in one
//! process — there is no network and no remote host.
//!
//! The application:
//!
//! 1. Enumerates the attached displays and lets the operator pick one.
//! 2. Grabs a still frame of the selected display on a fixed timer and
//!    publishes it to the preview.
//! 3. Scales each frame to fit the preview surface, preserving aspect
//!    ratio, and overlays a marker at the real OS cursor's position.
//! 4. Translates clicks, moves, and wheel turns on the preview into
//!    display-local positions and injects them as synthetic OS input
//!    (`SendInput` on Windows, XTest on Linux, CoreGraphics on macOS).

/// Application layer: capture scheduling, input forwarding, preview state.
pub mod application;

/// Infrastructure layer: OS adapters, configuration, and UI bridge.
pub mod infrastructure;
