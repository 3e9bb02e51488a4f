//! Foundation module - shared utilities and value types
//!
//! Small building blocks used throughout the crate:
//! - Integer geometry (points, sizes, damage rectangles)
//! - Logging utilities

pub mod geometry;
pub mod logging;
