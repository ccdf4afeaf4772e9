use eframe::Storage;

use super::persistence::{
    self, ACTIVE_COLORS_KEY, AUTO_SAVE_KEY, COLOR_PRESETS_KEY, Expect, SHORTCUTS_KEY,
    TOOL_SETTINGS_KEY,
};
use crate::color::ColorPair;
use crate::keybindings::Shortcuts;
use crate::presets::{ColorPresets, default_presets};
use crate::tool::ToolSettings;

/// Auto-save is on unless the user turned it off.
pub const DEFAULT_AUTO_SAVE: bool = true;

/// The preference slices that survive a reload.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub shortcuts: Shortcuts,
    pub auto_save: bool,
    pub tool_settings: ToolSettings,
    pub active_colors: ColorPair,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            shortcuts: Shortcuts::default(),
            auto_save: DEFAULT_AUTO_SAVE,
            tool_settings: ToolSettings::default(),
            active_colors: ColorPair::default(),
        }
    }
}

impl Preferences {
    /// Load every slice, substituting defaults for anything missing or corrupt.
    pub fn load(storage: &dyn Storage) -> Self {
        Self {
            shortcuts: persistence::read_or_else(
                storage,
                SHORTCUTS_KEY,
                Expect::Object,
                Shortcuts::default,
            )
            .with_defaults(),
            auto_save: persistence::read_bool_or(storage, AUTO_SAVE_KEY, DEFAULT_AUTO_SAVE),
            tool_settings: persistence::read_object_or_default(storage, TOOL_SETTINGS_KEY),
            active_colors: persistence::read_object_or_default(storage, ACTIVE_COLORS_KEY),
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        persistence::write_json(storage, SHORTCUTS_KEY, &self.shortcuts);
        persistence::write_json(storage, AUTO_SAVE_KEY, &self.auto_save);
        persistence::write_json(storage, TOOL_SETTINGS_KEY, &self.tool_settings);
        persistence::write_json(storage, ACTIVE_COLORS_KEY, &self.active_colors);
    }
}

impl ColorPresets {
    /// Load the stored preset list, or the built-in defaults.
    pub fn load(storage: &dyn Storage) -> Self {
        Self::from_list(persistence::read_or_else(
            storage,
            COLOR_PRESETS_KEY,
            Expect::Array,
            default_presets,
        ))
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        persistence::write_json(storage, COLOR_PRESETS_KEY, self.list());
    }
}
