//! Display handle: an enumerated display plus its geometry snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// One attached display as reported by the platform enumerator.
///
/// `index` is the position in the OS enumeration order, which is treated as
/// stable for the duration of a session only.  A handle becomes stale when
/// the display topology changes (monitor added or removed); callers must
/// re-resolve by index before reusing one across a session boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayHandle {
    /// Position in the OS enumeration order at the time of the query.
    pub index: i32,
    /// Position and size in virtual desktop space.
    pub geometry: Rect,
}

impl DisplayHandle {
    /// Creates a new handle.
    pub fn new(index: i32, geometry: Rect) -> Self {
        Self { index, geometry }
    }
}

impl fmt::Display for DisplayHandle {
    /// Renders the selector label, e.g. `Display 1 - 1920x1080 at 1920,0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Display {} - {}x{} at {},{}",
            self.index, self.geometry.width, self.geometry.height, self.geometry.x, self.geometry.y
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
