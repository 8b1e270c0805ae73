//! Easing functions applied to normalized progress.
//!
//! Smooth-step references: <https://en.wikipedia.org/wiki/Smoothstep>.

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    Sine,
    /// Rises to 1 at the midpoint and falls back to 0.
    SinePulse,
    #[default]
    CubicSmoothStep,
    QuinticSmoothStep,
}

impl Easing {
    pub const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::Sine,
        Easing::SinePulse,
        Easing::CubicSmoothStep,
        Easing::QuinticSmoothStep,
    ];

    /// Map `x` in [0,1] to an interpolation factor.
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Easing::Linear => x,
            Easing::Sine => (1.0 - (PI * x).cos()) * 0.5,
            Easing::SinePulse => (PI * x).sin(),
            Easing::CubicSmoothStep => x * x * (3.0 - 2.0 * x),
            Easing::QuinticSmoothStep => x * x * x * (x * (6.0 * x - 15.0) + 10.0),
        }
    }

    /// Whether the curve ends where it started (pulse) instead of at 1.
    #[inline]
    pub fn returns_to_start(self) -> bool {
        matches!(self, Easing::SinePulse)
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Sine => "sine",
            Easing::SinePulse => "sine_pulse",
            Easing::CubicSmoothStep => "cubic_smooth_step",
            Easing::QuinticSmoothStep => "quintic_smooth_step",
        }
    }

    /// Normalize `elapsed` against `duration` and ease the result.
    #[inline]
    pub fn rate(self, elapsed: f32, duration: f32) -> Result<f32> {
        normalized_progress(elapsed, duration).map(|x| self.apply(x))
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `clamp(elapsed / duration, 0, 1)`. A zero, negative or NaN duration is rejected.
#[inline]
pub fn normalized_progress(elapsed: f32, duration: f32) -> Result<f32> {
    if duration.is_nan() || duration <= 0.0 {
        return Err(EngineError::DegenerateDuration { duration });
    }
    Ok((elapsed / duration).clamp(0.0, 1.0))
}
