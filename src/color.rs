//! Colors shared by the active color state, presets and drawable objects.
//!
//! The model keeps straight (unmultiplied) sRGBA bytes so a color written to
//! a project file reads back bit for bit. [`egui::Color32`] is premultiplied
//! and only appears at paint time, through `From<Color> for Color32`.
//!
//! On disk colors are CSS-style strings (`#rrggbb`, `#rrggbbaa` or
//! `transparent`) so saved projects stay readable.

use egui::Color32;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

/// Unmultiplied sRGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const GRAY: Self = Self::from_gray(160);
    pub const LIGHT_GRAY: Self = Self::from_gray(220);
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    pub const DARK_RED: Self = Self::from_rgb(0x8b, 0, 0);
    pub const GREEN: Self = Self::from_rgb(0, 255, 0);
    pub const DARK_GREEN: Self = Self::from_rgb(0, 0x64, 0);
    pub const BLUE: Self = Self::from_rgb(0, 0, 255);
    pub const LIGHT_BLUE: Self = Self::from_rgb(0xad, 0xd8, 0xe6);
    pub const YELLOW: Self = Self::from_rgb(255, 255, 0);
    pub const GOLD: Self = Self::from_rgb(255, 215, 0);
    pub const BROWN: Self = Self::from_rgb(165, 42, 42);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub const fn from_rgba_unmultiplied(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn from_gray(l: u8) -> Self {
        Self([l, l, l, 255])
    }

    pub const fn to_array(self) -> [u8; 4] {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        self.0[3]
    }

    pub fn to_color32(self) -> Color32 {
        let [r, g, b, a] = self.0;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

impl From<Color> for Color32 {
    fn from(color: Color) -> Self {
        color.to_color32()
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_css(*self))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_css(&raw).ok_or_else(|| D::Error::custom(format!("invalid color `{raw}`")))
    }
}

/// A stroke/fill color pair.
///
/// Used for the editor's active colors, for color presets and as the color
/// view of a drawable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub stroke: Color,
    pub fill: Color,
}

impl ColorPair {
    pub const fn new(stroke: Color, fill: Color) -> Self {
        Self { stroke, fill }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            stroke: Color::BLACK,
            fill: Color::TRANSPARENT,
        }
    }
}

/// Partial update for a [`ColorPair`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorPatch {
    pub stroke: Option<Color>,
    pub fill: Option<Color>,
}

impl ColorPatch {
    pub fn stroke(color: Color) -> Self {
        Self {
            stroke: Some(color),
            fill: None,
        }
    }

    pub fn fill(color: Color) -> Self {
        Self {
            stroke: None,
            fill: Some(color),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stroke.is_none() && self.fill.is_none()
    }

    /// Merge this patch into `pair`.
    pub fn apply_to(&self, pair: &mut ColorPair) {
        if let Some(stroke) = self.stroke {
            pair.stroke = stroke;
        }
        if let Some(fill) = self.fill {
            pair.fill = fill;
        }
    }
}

impl From<ColorPair> for ColorPatch {
    fn from(pair: ColorPair) -> Self {
        Self {
            stroke: Some(pair.stroke),
            fill: Some(pair.fill),
        }
    }
}

/// Formats a color as `#rrggbb`, `#rrggbbaa` or `transparent`.
pub fn to_css(color: Color) -> String {
    let [r, g, b, a] = color.to_array();
    match a {
        0 => "transparent".to_owned(),
        255 => format!("#{r:02x}{g:02x}{b:02x}"),
        _ => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
    }
}

/// Parses the color notations found in saved projects and preferences.
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`, `rgba(r, g, b, a)`
/// (alpha in `0.0..=1.0`) and `transparent`.
pub fn parse_css(raw: &str) -> Option<Color> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("transparent") {
        return Some(Color::TRANSPARENT);
    }
    if let Some(hex) = raw.strip_prefix('#') {
        return parse_hex_digits(hex);
    }
    let lower = raw.to_ascii_lowercase();
    let (body, has_alpha) = if let Some(body) = lower.strip_prefix("rgba(") {
        (body, true)
    } else if let Some(body) = lower.strip_prefix("rgb(") {
        (body, false)
    } else {
        return None;
    };
    let parts: Vec<&str> = body.strip_suffix(')')?.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<u8>().ok();
    match (parts.as_slice(), has_alpha) {
        ([r, g, b], false) => Some(Color::from_rgb(channel(r)?, channel(g)?, channel(b)?)),
        ([r, g, b, a], true) => {
            let alpha = a.parse::<f32>().ok()?.clamp(0.0, 1.0);
            Some(Color::from_rgba_unmultiplied(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (alpha * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}

fn parse_hex_digits(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some(Color::from_rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Some(Color::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}
