//! Pure domain types with minimal dependencies
//!
//! Types here know nothing about input devices, settings or the host
//! renderer, so every other module can depend on them.

pub mod geometry;
pub mod handle;

pub use geometry::*;
pub use handle::*;
