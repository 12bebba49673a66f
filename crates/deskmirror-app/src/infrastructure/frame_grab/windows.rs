//! Windows screen capture via GDI `BitBlt`.
//!
//! Copies the requested virtual-desktop region from the screen DC into a
//! 32-bit top-down DIB section, then lifts the DIB's pixels out as a BGRA
//! frame.  GDI stores 32-bit DIB pixels as B, G, R, X — the byte order the
//! frame type carries.

use deskmirror_core::{Frame, Rect, BYTES_PER_PIXEL};

use crate::application::capture_session::{CaptureError, PlatformFrameGrabber};

use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC,
    SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HGDIOBJ, SRCCOPY,
};

/// Windows GDI implementation of [`PlatformFrameGrabber`].
pub struct WindowsFrameGrabber;

impl WindowsFrameGrabber {
    /// Creates a new `WindowsFrameGrabber`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsFrameGrabber {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformFrameGrabber for WindowsFrameGrabber {
    fn grab(&self, region: &Rect) -> Result<Frame, CaptureError> {
        let size = region.size();
        let pixel_count = size.width as usize * size.height as usize;

        // SAFETY: every handle acquired below is released before returning;
        // the DIB pointer stays valid until DeleteObject on the bitmap.
        unsafe {
            let screen_dc = GetDC(None);
            if screen_dc.is_invalid() {
                return Err(CaptureError::Platform("GetDC failed".to_string()));
            }

            let mem_dc = CreateCompatibleDC(screen_dc);
            if mem_dc.is_invalid() {
                ReleaseDC(None, screen_dc);
                return Err(CaptureError::Platform("CreateCompatibleDC failed".to_string()));
            }

            // Negative height requests a top-down DIB so row 0 is the top
            // of the screen, matching the frame layout.
            let info = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: size.width as i32,
                    biHeight: -(size.height as i32),
                    biPlanes: 1,
                    biBitCount: (BYTES_PER_PIXEL * 8) as u16,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };

            let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
            let bitmap = match CreateDIBSection(mem_dc, &info, DIB_RGB_COLORS, &mut bits, None, 0) {
                Ok(b) => b,
                Err(e) => {
                    DeleteDC(mem_dc);
                    ReleaseDC(None, screen_dc);
                    return Err(CaptureError::Platform(format!("CreateDIBSection failed: {e}")));
                }
            };

            let previous = SelectObject(mem_dc, bitmap);
            let blt = BitBlt(
                mem_dc,
                0,
                0,
                size.width as i32,
                size.height as i32,
                screen_dc,
                region.x,
                region.y,
                SRCCOPY,
            );

            let frame = if blt.is_ok() && !bits.is_null() {
                let pixels =
                    std::slice::from_raw_parts(bits as *const u8, pixel_count * BYTES_PER_PIXEL);
                Ok(Frame::new(size, pixels.to_vec()))
            } else {
                Err(CaptureError::Platform("BitBlt failed".to_string()))
            };

            SelectObject(mem_dc, previous);
            DeleteObject(HGDIOBJ(bitmap.0));
            DeleteDC(mem_dc);
            ReleaseDC(None, screen_dc);

            frame
        }
    }
}
