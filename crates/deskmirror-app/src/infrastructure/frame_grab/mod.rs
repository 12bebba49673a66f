//! Platform-specific screen capture implementations.
//!
//! Each platform implements the application layer's
//! [`PlatformFrameGrabber`](crate::application::capture_session::PlatformFrameGrabber)
//! trait; the correct one is selected at compile time via
//! `#[cfg(target_os = ...)]` and re-exported as `NativeFrameGrabber`:
//!
//! | Module    | OS      | API used                                |
//! |-----------|---------|-----------------------------------------|
//! | `windows` | Windows | GDI `BitBlt` from the desktop DC        |
//! | `linux`   | Linux   | `XGetImage` on the root window (Xlib)   |
//! | `macos`   | macOS   | `CGDisplayCreateImage`                  |
//!
//! A [`MockFrameGrabber`] is always compiled so tests can exercise the
//! capture pipeline without a display attached.

use std::sync::Mutex;

use deskmirror_core::{Frame, Rect, BYTES_PER_PIXEL};

use crate::application::capture_session::{CaptureError, PlatformFrameGrabber};

#[cfg(target_os = "windows")]
pub mod windows;

/// Re-export the Windows grabber as `NativeFrameGrabber` on Windows.
#[cfg(target_os = "windows")]
pub use windows::WindowsFrameGrabber as NativeFrameGrabber;

#[cfg(target_os = "linux")]
pub mod linux;

/// Re-export the Linux grabber as `NativeFrameGrabber` on Linux.
#[cfg(target_os = "linux")]
pub use linux::LinuxFrameGrabber as NativeFrameGrabber;

#[cfg(target_os = "macos")]
pub mod macos;

/// Re-export the macOS grabber as `NativeFrameGrabber` on macOS.
#[cfg(target_os = "macos")]
pub use macos::MacosFrameGrabber as NativeFrameGrabber;

/// On platforms without a native grabber the mock stands in so the binary
/// still builds; it produces flat-colored frames.
#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
pub use self::MockFrameGrabber as NativeFrameGrabber;

// ── Mock implementation (always compiled for tests) ───────────────────────────

/// A mock grabber producing flat-colored frames sized to the request.
///
/// The grab counter lets tests assert how many captures a scheduler
/// actually performed.
#[derive(Default)]
pub struct MockFrameGrabber {
    /// Byte value written into every pixel channel of produced frames.
    pub fill: u8,
    /// When `true`, every grab fails with a `Platform` error.
    pub should_fail: bool,
    /// Number of successful grabs performed so far.
    pub grab_count: Mutex<u32>,
}

impl MockFrameGrabber {
    /// Creates a mock producing mid-gray frames.
    pub fn new() -> Self {
        Self {
            fill: 0x80,
            ..Default::default()
        }
    }
}

impl PlatformFrameGrabber for MockFrameGrabber {
    /// Returns a frame matching the requested region's size.
    fn grab(&self, region: &Rect) -> Result<Frame, CaptureError> {
        if self.should_fail {
            return Err(CaptureError::Platform("mock failure".to_string()));
        }
        let size = region.size();
        let data = vec![self.fill; size.width as usize * size.height as usize * BYTES_PER_PIXEL];
        *self.grab_count.lock().unwrap() += 1;
        Ok(Frame::new(size, data))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
