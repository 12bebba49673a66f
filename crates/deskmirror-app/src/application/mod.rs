//! Application layer: the use cases of deskmirror.
//!
//! Each module here holds one use case built purely on the domain types
//! from `deskmirror-core` plus platform traits implemented in the
//! infrastructure layer:
//!
//! - [`capture_session`] – bind a display, tick the capture timer, publish
//!   frames and the measured frame rate.
//! - [`forward_input`] – translate frame-space pointer intents into
//!   virtual-desktop positions and inject them as OS input.
//! - [`preview`] – preview surface state: latest frame, scale transform,
//!   remote-cursor indicator, and gesture translation.

pub mod capture_session;
pub mod forward_input;
pub mod preview;
