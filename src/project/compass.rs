use egui::Vec2;
use serde::{Deserialize, Serialize};

/// How much of the compass overlay is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompassMode {
    /// Rings with the 24 mountains and the trigrams.
    #[default]
    Full,
    /// Only the cardinal directions.
    Simple,
}

/// State of the compass overlay.
///
/// A missing `locked` flag in older project files deserializes as `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassState {
    pub visible: bool,
    pub mode: CompassMode,
    /// Degrees, clockwise from north.
    pub rotation: f32,
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub locked: bool,
}

pub const DEFAULT_COMPASS_RADIUS: f32 = 200.0;
const MIN_COMPASS_RADIUS: f32 = 20.0;

impl Default for CompassState {
    fn default() -> Self {
        Self {
            visible: false,
            mode: CompassMode::Full,
            rotation: 0.0,
            opacity: 0.8,
            x: 400.0,
            y: 300.0,
            radius: DEFAULT_COMPASS_RADIUS,
            locked: true,
        }
    }
}

impl CompassState {
    pub fn apply_patch(&mut self, patch: &CompassPatch) {
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation.rem_euclid(360.0);
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(radius) = patch.radius {
            self.radius = radius.max(MIN_COMPASS_RADIUS);
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
    }

    /// Drag the compass. Ignored while locked; returns whether it moved.
    pub fn drag(&mut self, delta: Vec2) -> bool {
        if self.locked || delta == Vec2::ZERO {
            return false;
        }
        self.x += delta.x;
        self.y += delta.y;
        true
    }

    /// Rotate the compass by `degrees`. Ignored while locked.
    pub fn rotate_by(&mut self, degrees: f32) -> bool {
        if self.locked {
            return false;
        }
        self.rotation = (self.rotation + degrees).rem_euclid(360.0);
        true
    }
}

/// Partial update of the compass state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompassPatch {
    pub visible: Option<bool>,
    pub mode: Option<CompassMode>,
    pub rotation: Option<f32>,
    pub opacity: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub radius: Option<f32>,
    pub locked: Option<bool>,
}
