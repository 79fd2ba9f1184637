//! Core application module
//!
//! This module contains:
//! - The overlay controller that owns all ruler state
//! - The headless driver that feeds it events and reports frames

pub mod app;
pub mod overlay;
