//! Host platform layer
//!
//! Implementations of [`crate::sim::Scene`]. Only a headless host ships
//! here; a windowed engine binding would sit alongside it.

pub mod collision;
pub mod headless;

pub use collision::{sd_box, sd_circle, shapes_overlap};
pub use headless::{Body, HeadlessScene};
