//! Platform-specific pointer injection implementations.
//!
//! The correct implementation is selected at compile time via
//! `#[cfg(target_os = ...)]` and re-exported as `NativePointerInjector`:
//!
//! | Module    | OS      | API used                                   |
//! |-----------|---------|--------------------------------------------|
//! | `windows` | Windows | `SetCursorPos` + `SendInput`               |
//! | `linux`   | Linux   | XTest fake motion/button events            |
//! | `macos`   | macOS   | `CGEvent` posted to the HID event tap      |
//!
//! The [`mock`] module is always compiled for tests.

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// Re-export the Windows injector as `NativePointerInjector` on Windows.
#[cfg(target_os = "windows")]
pub use windows::WindowsPointerInjector as NativePointerInjector;

#[cfg(target_os = "linux")]
pub mod linux;

/// Re-export the Linux injector as `NativePointerInjector` on Linux.
#[cfg(target_os = "linux")]
pub use linux::LinuxXTestInjector as NativePointerInjector;

#[cfg(target_os = "macos")]
pub mod macos;

/// Re-export the macOS injector as `NativePointerInjector` on macOS.
#[cfg(target_os = "macos")]
pub use macos::MacosPointerInjector as NativePointerInjector;

/// On platforms without a native injector the mock stands in so the
/// binary still builds; injected input goes nowhere.
#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
pub use mock::MockPointerInjector as NativePointerInjector;
