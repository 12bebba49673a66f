//! Platform-specific display enumeration and index resolution.
//!
//! The registry answers three questions the rest of the app keeps asking:
//! which displays exist, what geometry does display *N* have, and which
//! display contains a given virtual-desktop point.
//!
//! # Why indices and not ids?
//!
//! Displays are addressed by their position in the OS enumeration order.
//! That order is stable only until the topology changes (a monitor is
//! plugged or unplugged), so resolved [`DisplayHandle`]s are treated as
//! session-scoped snapshots: every query re-enumerates rather than caching
//! a list that could go stale.
//!
//! # Platform implementations
//!
//! Each platform implements [`PlatformDisplayEnumerator`]; the correct one
//! is selected at compile time via `#[cfg(target_os = ...)]` and
//! re-exported as `NativeDisplayEnumerator`:
//!
//! | Module    | OS      | API used                                     |
//! |-----------|---------|----------------------------------------------|
//! | `windows` | Windows | `EnumDisplayMonitors` + `GetMonitorInfoW`    |
//! | `linux`   | Linux   | `XOpenDisplay` + `XDisplayWidth` (Xlib)      |
//! | `macos`   | macOS   | `CGGetActiveDisplayList` + `CGDisplayBounds` |
//!
//! A [`MockDisplayEnumerator`] is always compiled (not guarded by `#[cfg]`)
//! so tests on any platform can run without a physical display.

use std::sync::Arc;

use thiserror::Error;

use deskmirror_core::{DisplayHandle, Point, Rect};

/// Error type for display registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested display index does not exist.
    ///
    /// Raised for negative indices and for indices at or past the end of
    /// the enumeration, including after a monitor was unplugged.
    #[error("display index {0} is out of range")]
    OutOfRange(i32),

    /// The platform API call to enumerate displays failed.
    #[error("platform API error while enumerating displays: {0}")]
    Platform(String),
}

/// Trait for enumerating display geometries on the current platform.
///
/// Implementations return the geometry of each attached display in the
/// OS enumeration order, positioned in virtual desktop space.
pub trait PlatformDisplayEnumerator: Send + Sync {
    /// Returns the geometry of every attached display, in order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Platform`] if the OS API call fails.
    fn enumerate(&self) -> Result<Vec<Rect>, RegistryError>;
}

/// The display registry: index resolution on top of a platform enumerator.
#[derive(Clone)]
pub struct DisplayRegistry {
    enumerator: Arc<dyn PlatformDisplayEnumerator>,
}

impl DisplayRegistry {
    /// Creates a registry backed by the given enumerator.
    pub fn new(enumerator: Arc<dyn PlatformDisplayEnumerator>) -> Self {
        Self { enumerator }
    }

    /// Returns a handle for every attached display, in enumeration order.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError::Platform`] from the enumerator.
    pub fn list_displays(&self) -> Result<Vec<DisplayHandle>, RegistryError> {
        let geometries = self.enumerator.enumerate()?;
        Ok(geometries
            .into_iter()
            .enumerate()
            .map(|(i, geometry)| DisplayHandle::new(i as i32, geometry))
            .collect())
    }

    /// Resolves `index` to a display handle.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::OutOfRange`] for negative indices and for
    /// indices past the current enumeration, and propagates platform
    /// errors from the enumerator.
    pub fn resolve(&self, index: i32) -> Result<DisplayHandle, RegistryError> {
        if index < 0 {
            return Err(RegistryError::OutOfRange(index));
        }
        let geometries = self.enumerator.enumerate()?;
        geometries
            .get(index as usize)
            .map(|geometry| DisplayHandle::new(index, *geometry))
            .ok_or(RegistryError::OutOfRange(index))
    }

    /// Returns the display whose geometry contains `point`, if any.
    ///
    /// Used by the cursor-polling loop to decide whether the real cursor
    /// is currently on the mirrored display.
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError::Platform`] from the enumerator.
    pub fn display_at(&self, point: Point) -> Result<Option<DisplayHandle>, RegistryError> {
        Ok(self
            .list_displays()?
            .into_iter()
            .find(|handle| handle.geometry.contains(point)))
    }
}

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

/// Re-export the Windows enumerator as `NativeDisplayEnumerator` on Windows.
///
/// This alias lets the rest of the codebase reference `NativeDisplayEnumerator`
/// without knowing the OS at compile time — only this module contains the
/// platform-conditional logic.
#[cfg(target_os = "windows")]
pub use windows::WindowsDisplayEnumerator as NativeDisplayEnumerator;

// ── Linux implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
pub mod linux;

/// Re-export the Linux enumerator as `NativeDisplayEnumerator` on Linux.
#[cfg(target_os = "linux")]
pub use linux::LinuxDisplayEnumerator as NativeDisplayEnumerator;

// ── macOS implementation ──────────────────────────────────────────────────────

#[cfg(target_os = "macos")]
pub mod macos;

/// Re-export the macOS enumerator as `NativeDisplayEnumerator` on macOS.
#[cfg(target_os = "macos")]
pub use macos::MacosDisplayEnumerator as NativeDisplayEnumerator;

// ── Fallback for unsupported platforms ────────────────────────────────────────

/// On platforms without a native enumerator the mock stands in so the
/// binary still builds and runs against a synthetic display list.
#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
pub use self::MockDisplayEnumerator as NativeDisplayEnumerator;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A mock enumerator that returns a configurable list of geometries.
///
/// Used in unit tests and on unsupported platforms.  Makes no OS calls —
/// the display list is provided at construction time.
#[derive(Default)]
pub struct MockDisplayEnumerator {
    /// The fixed list of display geometries this enumerator returns.
    pub geometries: Vec<Rect>,
    /// When `true`, `enumerate` fails with a `Platform` error.
    pub should_fail: bool,
}

impl MockDisplayEnumerator {
    /// Creates a mock with one synthetic display, so the binary can still
    /// start on platforms where this type stands in for the native one.
    pub fn new() -> Self {
        Self::single_1080p()
    }

    /// Creates a mock with a single 1920×1080 display at the origin.
    pub fn single_1080p() -> Self {
        Self {
            geometries: vec![Rect::new(0, 0, 1920, 1080)],
            should_fail: false,
        }
    }

    /// Creates a mock with two 1920×1080 displays side by side.
    ///
    /// Display 0 sits at the origin; display 1 starts at x=1920,
    /// immediately to its right.
    pub fn dual_1080p() -> Self {
        Self {
            geometries: vec![Rect::new(0, 0, 1920, 1080), Rect::new(1920, 0, 1920, 1080)],
            should_fail: false,
        }
    }
}

impl PlatformDisplayEnumerator for MockDisplayEnumerator {
    /// Returns the geometries provided at construction time.
    fn enumerate(&self) -> Result<Vec<Rect>, RegistryError> {
        if self.should_fail {
            return Err(RegistryError::Platform("mock failure".to_string()));
        }
        Ok(self.geometries.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
