//! Pure domain entities with no OS dependencies.

pub mod cursor;
pub mod display;
pub mod fps;
pub mod frame;
pub mod geometry;
pub mod input;
pub mod session;
pub mod transform;
