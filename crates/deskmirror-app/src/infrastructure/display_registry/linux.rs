//! Linux display enumeration via the X11 Xlib API.
//!
//! Queries the X display server and reports one geometry per X screen.
//! If the `DISPLAY` environment variable is not set or Xlib is unavailable
//! the enumeration fails with a `Platform` error.
//!
//! # Implementation notes
//!
//! This uses the plain Xlib screen API, which is always available without
//! Xrandr.  Classic multi-screen X setups report each screen with its own
//! size; the common single-screen case reports one geometry spanning the
//! whole desktop.  Per-output geometry within a single screen needs Xrandr
//! and can be added later without changing the trait.

use super::{PlatformDisplayEnumerator, RegistryError};
use deskmirror_core::Rect;

/// Linux X11 implementation of [`PlatformDisplayEnumerator`].
pub struct LinuxDisplayEnumerator;

impl LinuxDisplayEnumerator {
    /// Creates a new `LinuxDisplayEnumerator`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinuxDisplayEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformDisplayEnumerator for LinuxDisplayEnumerator {
    fn enumerate(&self) -> Result<Vec<Rect>, RegistryError> {
        enumerate_via_xlib()
    }
}

/// Enumerates X screens using `XOpenDisplay` and `XScreenCount`.
///
/// # Errors
///
/// Returns [`RegistryError::Platform`] if the X11 display cannot be opened
/// or reports zero screens.
fn enumerate_via_xlib() -> Result<Vec<Rect>, RegistryError> {
    use x11::xlib;

    // SAFETY: XOpenDisplay is called with a null display name, meaning
    // "use $DISPLAY".  The returned pointer must be freed by XCloseDisplay.
    let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };

    if display.is_null() {
        let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
        return Err(RegistryError::Platform(format!(
            "XOpenDisplay failed; DISPLAY={display_env}"
        )));
    }

    // SAFETY: `display` is a valid non-null pointer returned by XOpenDisplay.
    let screen_count = unsafe { xlib::XScreenCount(display) };

    let mut geometries = Vec::with_capacity(screen_count as usize);

    for screen_num in 0..screen_count {
        // SAFETY: screen_num is in [0, screen_count).
        let width = unsafe { xlib::XDisplayWidth(display, screen_num) } as u32;
        let height = unsafe { xlib::XDisplayHeight(display, screen_num) } as u32;

        // Xlib does not expose per-screen offsets without Xrandr; classic
        // multi-screen setups are independent desktops at the origin.
        geometries.push(Rect::new(0, 0, width, height));
    }

    // SAFETY: `display` was successfully opened above and is not used after this.
    unsafe { xlib::XCloseDisplay(display) };

    if geometries.is_empty() {
        return Err(RegistryError::Platform(
            "X11 reported zero screens".to_string(),
        ));
    }

    Ok(geometries)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Smoke-test: with a DISPLAY available this must succeed and return at
    /// least one geometry.  Without DISPLAY the error path is expected.
    #[test]
    fn test_linux_display_enumerator_smoke() {
        let enumerator = LinuxDisplayEnumerator::new();
        let result = enumerator.enumerate();

        if std::env::var("DISPLAY").is_ok() {
            let geometries = result.expect("enumerate must succeed when DISPLAY is set");
            assert!(!geometries.is_empty(), "must return at least one display");
            assert!(geometries.iter().all(|g| !g.size().is_empty()));
        } else {
            assert!(result.is_err(), "enumerate must fail when DISPLAY is not set");
        }
    }
}
