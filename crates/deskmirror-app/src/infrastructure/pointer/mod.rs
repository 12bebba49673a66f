//! Platform-specific global cursor position readers.
//!
//! The preview's overlay marker follows the real OS cursor; these adapters
//! answer "where is the cursor right now, in virtual desktop space?" for
//! the 50ms polling loop.  A reading can legitimately be unavailable (no
//! display connection, headless session), which the trait expresses as
//! `None` rather than an error — the overlay simply keeps its last
//! position until the next successful sample.
//!
//! | Implementation           | OS      | API used                     |
//! |--------------------------|---------|------------------------------|
//! | `WindowsPointerLocator`  | Windows | `GetCursorPos`               |
//! | `LinuxPointerLocator`    | Linux   | `XQueryPointer` (Xlib)       |
//! | `MacosPointerLocator`    | macOS   | `CGEvent` location           |
//!
//! The [`MockPointerLocator`] is always compiled for tests.

use deskmirror_core::Point;

use crate::application::preview::PlatformPointerLocator;

// ── Windows implementation ────────────────────────────────────────────────────

/// Windows cursor reader using `GetCursorPos`.
#[cfg(target_os = "windows")]
pub struct WindowsPointerLocator;

#[cfg(target_os = "windows")]
impl WindowsPointerLocator {
    /// Creates a new `WindowsPointerLocator`.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "windows")]
impl Default for WindowsPointerLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "windows")]
impl PlatformPointerLocator for WindowsPointerLocator {
    fn global_position(&self) -> Option<Point> {
        use windows::Win32::Foundation::POINT;
        use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

        let mut point = POINT::default();
        // SAFETY: `point` is a valid out-parameter on the stack.
        unsafe { GetCursorPos(&mut point) }
            .ok()
            .map(|_| Point::new(point.x, point.y))
    }
}

#[cfg(target_os = "windows")]
pub use self::WindowsPointerLocator as NativePointerLocator;

// ── Linux implementation ──────────────────────────────────────────────────────

/// Linux cursor reader using Xlib's `XQueryPointer` on the root window.
#[cfg(target_os = "linux")]
pub struct LinuxPointerLocator;

#[cfg(target_os = "linux")]
impl LinuxPointerLocator {
    /// Creates a new `LinuxPointerLocator`.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "linux")]
impl Default for LinuxPointerLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "linux")]
impl PlatformPointerLocator for LinuxPointerLocator {
    fn global_position(&self) -> Option<Point> {
        use x11::xlib;

        // SAFETY: null display name means "use $DISPLAY"; closed below.
        let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            return None;
        }

        let mut root_return = 0;
        let mut child_return = 0;
        let mut root_x = 0;
        let mut root_y = 0;
        let mut win_x = 0;
        let mut win_y = 0;
        let mut mask = 0;

        // SAFETY: `display` is valid and every argument is a stack
        // out-parameter; root coordinates are virtual-desktop pixels.
        let found = unsafe {
            xlib::XQueryPointer(
                display,
                xlib::XDefaultRootWindow(display),
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };

        // SAFETY: `display` was successfully opened above.
        unsafe { xlib::XCloseDisplay(display) };

        (found != 0).then(|| Point::new(root_x, root_y))
    }
}

#[cfg(target_os = "linux")]
pub use self::LinuxPointerLocator as NativePointerLocator;

// ── macOS implementation ──────────────────────────────────────────────────────

/// macOS cursor reader using a fresh `CGEvent`'s location.
#[cfg(target_os = "macos")]
pub struct MacosPointerLocator;

#[cfg(target_os = "macos")]
impl MacosPointerLocator {
    /// Creates a new `MacosPointerLocator`.
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "macos")]
impl Default for MacosPointerLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "macos")]
impl PlatformPointerLocator for MacosPointerLocator {
    fn global_position(&self) -> Option<Point> {
        use core_graphics::event::CGEvent;
        use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState).ok()?;
        let event = CGEvent::new(source).ok()?;
        let location = event.location();
        Some(Point::new(location.x as i32, location.y as i32))
    }
}

#[cfg(target_os = "macos")]
pub use self::MacosPointerLocator as NativePointerLocator;

// ── Fallback for unsupported platforms ────────────────────────────────────────

/// On platforms without a native reader the mock stands in; it always
/// reports no position, so the overlay simply never moves.
#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
pub use self::MockPointerLocator as NativePointerLocator;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A mock locator returning a fixed, updatable position.
#[derive(Default)]
pub struct MockPointerLocator {
    /// The position returned by `global_position`; `None` simulates an
    /// unavailable reading.
    pub position: std::sync::Mutex<Option<Point>>,
}

impl MockPointerLocator {
    /// Creates a locator that reports no position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a locator pinned at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position: std::sync::Mutex::new(Some(position)),
        }
    }

    /// Moves the simulated cursor.
    pub fn set(&self, position: Point) {
        *self.position.lock().unwrap() = Some(position);
    }
}

impl PlatformPointerLocator for MockPointerLocator {
    fn global_position(&self) -> Option<Point> {
        *self.position.lock().unwrap()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_locator_reports_configured_position() {
        let locator = MockPointerLocator::at(Point::new(10, 20));
        assert_eq!(locator.global_position(), Some(Point::new(10, 20)));
    }

    #[test]
    fn test_mock_locator_without_position_reports_none() {
        let locator = MockPointerLocator::new();
        assert_eq!(locator.global_position(), None);
    }

    #[test]
    fn test_mock_locator_set_updates_reading() {
        let locator = MockPointerLocator::new();
        locator.set(Point::new(5, 5));
        assert_eq!(locator.global_position(), Some(Point::new(5, 5)));
    }
}
