//! Windows display enumeration via `EnumDisplayMonitors`.
//!
//! Walks every monitor on the virtual desktop and reads its bounding
//! rectangle with `GetMonitorInfoW`.  Monitor rectangles are already in
//! virtual desktop coordinates, including negative origins for monitors
//! placed left of or above the primary.

use super::{PlatformDisplayEnumerator, RegistryError};
use deskmirror_core::Rect;

use windows::Win32::Foundation::{BOOL, LPARAM, RECT, TRUE};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO,
};

/// Windows implementation of [`PlatformDisplayEnumerator`].
pub struct WindowsDisplayEnumerator;

impl WindowsDisplayEnumerator {
    /// Creates a new `WindowsDisplayEnumerator`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsDisplayEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformDisplayEnumerator for WindowsDisplayEnumerator {
    fn enumerate(&self) -> Result<Vec<Rect>, RegistryError> {
        let mut geometries: Vec<Rect> = Vec::new();

        // SAFETY: the callback only runs during this call; the LPARAM
        // points at `geometries`, which outlives the call.
        let ok = unsafe {
            EnumDisplayMonitors(
                HDC::default(),
                None,
                Some(enum_monitor_callback),
                LPARAM(&mut geometries as *mut Vec<Rect> as isize),
            )
        };

        if !ok.as_bool() {
            return Err(RegistryError::Platform(
                "EnumDisplayMonitors failed".to_string(),
            ));
        }
        if geometries.is_empty() {
            return Err(RegistryError::Platform(
                "EnumDisplayMonitors returned no monitors".to_string(),
            ));
        }
        Ok(geometries)
    }
}

/// Per-monitor callback invoked by `EnumDisplayMonitors`.
unsafe extern "system" fn enum_monitor_callback(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    let geometries = &mut *(lparam.0 as *mut Vec<Rect>);

    let mut info = MONITORINFO {
        cbSize: std::mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };
    if GetMonitorInfoW(monitor, &mut info).as_bool() {
        let r = info.rcMonitor;
        geometries.push(Rect::new(
            r.left,
            r.top,
            (r.right - r.left) as u32,
            (r.bottom - r.top) as u32,
        ));
    }
    TRUE
}
