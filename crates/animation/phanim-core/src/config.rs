//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::arena::DEFAULT_INIT_CAP;
use crate::error::Result;
use crate::interp::Easing;
use crate::value::Color;

/// Sizing hints and authoring defaults. Every field is optional in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// First capacity of each registry arena (objects, records, value boxes).
    pub initial_capacity: usize,
    /// Easing assigned to new records.
    pub default_easing: Easing,
    /// Thickness of lines created through `Engine::line`.
    pub line_thickness: f32,
    /// Font size of text created through `Engine::text`.
    pub font_size: f32,
    /// Color of text created through `Engine::text`.
    pub text_color: Color,
    pub background: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INIT_CAP,
            default_easing: Easing::default(),
            line_thickness: 3.0,
            font_size: 25.0,
            text_color: Color::WHITE,
            background: Color::BLACK,
        }
    }
}

impl Config {
    /// Parse a JSON document; missing keys take their default.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(text)?;
        log::debug!("config: loaded {cfg:?}");
        Ok(cfg)
    }
}
