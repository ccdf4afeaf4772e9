use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::element::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH};

/// Per-user drawing defaults, persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolSettings {
    pub line_width: f32,
    pub font_size: f32,
    pub font_family: String,
    pub text_color: Color,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_STROKE_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            text_color: Color::BLACK,
        }
    }
}
