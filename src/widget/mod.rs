//! Overlay elements that depend on the ruler geometry

pub mod guides;
pub mod toolbar;
