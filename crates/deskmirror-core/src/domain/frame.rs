//! Captured-frame value type.
//!
//! A [`Frame`] is an immutable BGRA pixel buffer plus its dimensions at
//! capture time.  Frames are never mutated after creation — the pipeline
//! replaces them wholesale (frame source → capture scheduler → preview
//! surface).  The pixel data sits behind an `Arc` so publishing the same
//! frame to several subscribers clones a pointer, not the buffer.
//!
//! An *empty* frame (zero dimensions, no pixels) is the in-band
//! representation of "no image": produced when the source is unbound or a
//! platform grab fails, and rendered downstream as the "no screen image
//! available" state instead of raising an error.

use super::geometry::Size;
use std::sync::Arc;

/// Bytes per BGRA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// One captured still image of a display's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    size: Size,
    data: Arc<[u8]>,
}

impl Frame {
    /// Creates a frame from tightly packed BGRA pixel data.
    ///
    /// The caller is expected to supply `width * height * 4` bytes; the
    /// frame stores whatever it is given and never reinterprets it.
    pub fn new(size: Size, data: Vec<u8>) -> Self {
        Self {
            size,
            data: data.into(),
        }
    }

    /// Creates the empty "no image" frame.
    pub fn empty() -> Self {
        Self {
            size: Size::default(),
            data: Arc::from(Vec::new()),
        }
    }

    /// Returns the frame dimensions at capture time.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns `true` when this is the "no image" frame.
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Returns the raw BGRA pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_has_zero_size_and_no_data() {
        let frame = Frame::empty();
        assert!(frame.is_empty());
        assert_eq!(frame.size(), Size::default());
        assert!(frame.data().is_empty());
    }

    #[test]
    fn test_frame_with_dimensions_is_not_empty() {
        let size = Size::new(2, 2);
        let frame = Frame::new(size, vec![0u8; 2 * 2 * BYTES_PER_PIXEL]);
        assert!(!frame.is_empty());
        assert_eq!(frame.size(), size);
        assert_eq!(frame.data().len(), 16);
    }

    #[test]
    fn test_frame_clone_shares_pixel_data() {
        let frame = Frame::new(Size::new(1, 1), vec![1, 2, 3, 4]);
        let copy = frame.clone();
        assert!(Arc::ptr_eq(&frame.data, &copy.data));
    }
}
