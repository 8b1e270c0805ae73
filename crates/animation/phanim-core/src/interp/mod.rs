//! Interpolation: per-kind lerp and the easing ("rate") functions that shape
//! normalized progress before it is fed to the lerp.

pub mod easing;
pub mod functions;

pub use easing::{normalized_progress, Easing};
