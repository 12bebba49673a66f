//! macOS screen capture via Core Graphics.
//!
//! Finds the display whose bounds match the requested region and captures
//! it with `CGDisplayCreateImage`, then repacks the image rows into a
//! tightly packed BGRA buffer.

use deskmirror_core::{Frame, Rect, BYTES_PER_PIXEL};

use crate::application::capture_session::{CaptureError, PlatformFrameGrabber};

use core_graphics::display::CGDisplay;

/// macOS Core Graphics implementation of [`PlatformFrameGrabber`].
pub struct MacosFrameGrabber;

impl MacosFrameGrabber {
    /// Creates a new `MacosFrameGrabber`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacosFrameGrabber {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformFrameGrabber for MacosFrameGrabber {
    fn grab(&self, region: &Rect) -> Result<Frame, CaptureError> {
        let display = find_display(region)?;

        let image = display
            .image()
            .ok_or_else(|| CaptureError::Platform("CGDisplayCreateImage failed".to_string()))?;

        let width = image.width() as u32;
        let height = image.height() as u32;
        let bytes_per_row = image.bytes_per_row();
        let raw = image.data();
        let raw = raw.bytes();

        let row_bytes = width as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(row_bytes * height as usize);
        for row in 0..height as usize {
            let start = row * bytes_per_row;
            data.extend_from_slice(&raw[start..start + row_bytes]);
        }

        Ok(Frame::new(deskmirror_core::Size::new(width, height), data))
    }
}

/// Resolves the Core Graphics display whose bounds match `region`.
fn find_display(region: &Rect) -> Result<CGDisplay, CaptureError> {
    let ids = CGDisplay::active_displays()
        .map_err(|code| CaptureError::Platform(format!("CGGetActiveDisplayList error {code}")))?;

    ids.into_iter()
        .map(CGDisplay::new)
        .find(|d| {
            let b = d.bounds();
            b.origin.x as i32 == region.x && b.origin.y as i32 == region.y
        })
        .ok_or_else(|| {
            CaptureError::Platform(format!(
                "no display with bounds at {},{}",
                region.x, region.y
            ))
        })
}
