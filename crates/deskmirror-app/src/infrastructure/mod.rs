//! Infrastructure layer: OS adapters and outer-edge plumbing.
//!
//! Everything that touches the operating system or the filesystem lives
//! here, behind the traits consumed by the application layer:
//!
//! - [`display_registry`] – enumerating attached displays and resolving
//!   indices to geometries.
//! - [`frame_grab`] – capturing a display region as a pixel frame.
//! - [`input_injection`] – synthesizing pointer input.
//! - [`pointer`] – reading the real cursor's global position.
//! - [`storage`] – TOML configuration persistence.
//! - [`ui_bridge`] – shared state snapshots for a UI front end.

pub mod display_registry;
pub mod frame_grab;
pub mod input_injection;
pub mod pointer;
pub mod storage;
pub mod ui_bridge;
