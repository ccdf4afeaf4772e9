use log::debug;

use crate::color::{Color, ColorPair, ColorPatch};

/// Hard ceiling on stored presets; adds beyond it are ignored.
pub const MAX_PRESETS: usize = 8;

pub fn default_presets() -> Vec<ColorPair> {
    vec![
        ColorPair::new(Color::BLACK, Color::TRANSPARENT),
        ColorPair::new(Color::from_rgb(0xe5, 0x39, 0x35), Color::from_rgba_unmultiplied(0xe5, 0x39, 0x35, 0x40)),
        ColorPair::new(Color::from_rgb(0x1e, 0x88, 0xe5), Color::from_rgba_unmultiplied(0x1e, 0x88, 0xe5, 0x40)),
        ColorPair::new(Color::from_rgb(0x43, 0xa0, 0x47), Color::from_rgba_unmultiplied(0x43, 0xa0, 0x47, 0x40)),
    ]
}

/// The bounded list of stroke/fill presets and the currently active one.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPresets {
    presets: Vec<ColorPair>,
    active: Option<usize>,
}

impl Default for ColorPresets {
    fn default() -> Self {
        Self::from_list(default_presets())
    }
}

impl ColorPresets {
    /// Build from a stored list, keeping at most [`MAX_PRESETS`] entries.
    pub fn from_list(mut presets: Vec<ColorPair>) -> Self {
        presets.truncate(MAX_PRESETS);
        Self {
            presets,
            active: None,
        }
    }

    pub fn list(&self) -> &[ColorPair] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.presets.len() >= MAX_PRESETS
    }

    pub fn get(&self, index: usize) -> Option<ColorPair> {
        self.presets.get(index).copied()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Append a preset. Returns false when the list is already full.
    pub fn add(&mut self, preset: ColorPair) -> bool {
        if self.is_full() {
            debug!("Color preset list is full, ignoring new preset");
            return false;
        }
        self.presets.push(preset);
        true
    }

    /// Merge `patch` into the preset at `index`. Out of bounds is a no-op.
    pub fn update(&mut self, index: usize, patch: ColorPatch) -> bool {
        match self.presets.get_mut(index) {
            Some(preset) => {
                patch.apply_to(preset);
                true
            }
            None => false,
        }
    }

    /// Mark the preset at `index` as active and return its colors.
    pub fn select(&mut self, index: usize) -> Option<ColorPair> {
        let preset = self.get(index)?;
        self.active = Some(index);
        Some(preset)
    }

    /// Delete the preset at `index`. The active marker follows its preset
    /// when later entries shift down, and is cleared if its preset is removed.
    pub fn remove(&mut self, index: usize) -> Option<ColorPair> {
        if index >= self.presets.len() {
            return None;
        }
        let removed = self.presets.remove(index);
        self.active = match self.active {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        Some(removed)
    }

    /// Forget the active marker, e.g. once custom colors diverge.
    pub fn clear_active(&mut self) {
        self.active = None;
    }
}
