use serde::{Deserialize, Serialize};

/// The background floorplan image and its placement.
///
/// `image_src` is whatever the image provider hands over (usually a data
/// URL); decoding and drawing it is the renderer's business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Floorplan {
    pub image_src: Option<String>,
    /// Degrees, clockwise.
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for Floorplan {
    fn default() -> Self {
        Self {
            image_src: None,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl Floorplan {
    pub fn has_image(&self) -> bool {
        self.image_src.is_some()
    }

    pub fn apply_patch(&mut self, patch: &FloorplanPatch) {
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation.rem_euclid(360.0);
        }
        if let Some(scale) = patch.scale {
            self.scale = scale.max(MIN_SCALE);
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
    }
}

const MIN_SCALE: f32 = 0.01;

/// Partial update of the floorplan transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloorplanPatch {
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub opacity: Option<f32>,
    pub x: Option<f32>,
    pub y: Option<f32>,
}
