//! macOS display enumeration via Core Graphics.
//!
//! Uses `CGGetActiveDisplayList` to list active displays and
//! `CGDisplayBounds` for each display's rectangle in the global (virtual
//! desktop) coordinate space.

use super::{PlatformDisplayEnumerator, RegistryError};
use deskmirror_core::Rect;

use core_graphics::display::CGDisplay;

/// macOS implementation of [`PlatformDisplayEnumerator`].
pub struct MacosDisplayEnumerator;

impl MacosDisplayEnumerator {
    /// Creates a new `MacosDisplayEnumerator`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacosDisplayEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformDisplayEnumerator for MacosDisplayEnumerator {
    fn enumerate(&self) -> Result<Vec<Rect>, RegistryError> {
        let display_ids = CGDisplay::active_displays()
            .map_err(|code| RegistryError::Platform(format!("CGGetActiveDisplayList error {code}")))?;

        if display_ids.is_empty() {
            return Err(RegistryError::Platform(
                "Core Graphics reported zero displays".to_string(),
            ));
        }

        let geometries = display_ids
            .into_iter()
            .map(|id| {
                let bounds = CGDisplay::new(id).bounds();
                Rect::new(
                    bounds.origin.x as i32,
                    bounds.origin.y as i32,
                    bounds.size.width as u32,
                    bounds.size.height as u32,
                )
            })
            .collect();

        Ok(geometries)
    }
}
