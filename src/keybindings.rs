//! Customizable keyboard shortcuts.
//!
//! Shortcuts are stored as human-readable strings such as `"Ctrl+Z"` so the
//! persisted preference stays editable; they are parsed into
//! [`egui::KeyboardShortcut`] when the shell dispatches input.

use std::collections::BTreeMap;

use egui::{Key, KeyboardShortcut, Modifiers};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Editor actions that can be bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutAction {
    Undo,
    Redo,
    Delete,
    Clone,
    ClearSelection,
    SelectTool,
    RectangleTool,
    EllipseTool,
    LineTool,
    ArrowTool,
    TextTool,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 11] = [
        ShortcutAction::Undo,
        ShortcutAction::Redo,
        ShortcutAction::Delete,
        ShortcutAction::Clone,
        ShortcutAction::ClearSelection,
        ShortcutAction::SelectTool,
        ShortcutAction::RectangleTool,
        ShortcutAction::EllipseTool,
        ShortcutAction::LineTool,
        ShortcutAction::ArrowTool,
        ShortcutAction::TextTool,
    ];

    fn default_binding(self) -> &'static str {
        match self {
            ShortcutAction::Undo => "Ctrl+Z",
            ShortcutAction::Redo => "Ctrl+Y",
            ShortcutAction::Delete => "Delete",
            ShortcutAction::Clone => "Ctrl+D",
            ShortcutAction::ClearSelection => "Escape",
            ShortcutAction::SelectTool => "V",
            ShortcutAction::RectangleTool => "R",
            ShortcutAction::EllipseTool => "E",
            ShortcutAction::LineTool => "L",
            ShortcutAction::ArrowTool => "A",
            ShortcutAction::TextTool => "T",
        }
    }
}

/// Action → key string map.
///
/// Stored entries naming an action this build does not know are skipped on
/// load, so the remaining user bindings survive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Shortcuts(BTreeMap<ShortcutAction, String>);

impl<'de> Deserialize<'de> for Shortcuts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = BTreeMap::<String, String>::deserialize(deserializer)?;
        let bindings = stored
            .into_iter()
            .filter_map(|(name, binding)| {
                match serde_json::from_value::<ShortcutAction>(serde_json::Value::String(name)) {
                    Ok(action) => Some((action, binding)),
                    Err(err) => {
                        debug!("Skipping stored shortcut: {err}");
                        None
                    }
                }
            })
            .collect();
        Ok(Self(bindings))
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self(
            ShortcutAction::ALL
                .iter()
                .map(|action| (*action, action.default_binding().to_owned()))
                .collect(),
        )
    }
}

impl Shortcuts {
    /// Binding for `action`, falling back to the built-in default.
    pub fn binding(&self, action: ShortcutAction) -> &str {
        self.0
            .get(&action)
            .map_or(action.default_binding(), String::as_str)
    }

    pub fn set(&mut self, action: ShortcutAction, binding: impl Into<String>) {
        self.0.insert(action, binding.into());
    }

    /// Parsed shortcut for `action`, if its binding is valid.
    pub fn shortcut(&self, action: ShortcutAction) -> Option<KeyboardShortcut> {
        parse_shortcut(self.binding(action))
    }

    /// Fill in defaults for actions missing from a stored map.
    pub fn with_defaults(mut self) -> Self {
        for action in ShortcutAction::ALL {
            self.0
                .entry(action)
                .or_insert_with(|| action.default_binding().to_owned());
        }
        self
    }
}

/// Parse `"Ctrl+Shift+Z"`-style strings. `Ctrl` and `Cmd` both map to the
/// platform command modifier.
pub fn parse_shortcut(binding: &str) -> Option<KeyboardShortcut> {
    let mut parts: Vec<&str> = binding.split('+').map(str::trim).collect();
    let key = Key::from_name(parts.pop()?)?;
    let mut modifiers = Modifiers::NONE;
    for part in parts {
        modifiers = modifiers
            | match part.to_ascii_lowercase().as_str() {
                "ctrl" | "cmd" | "command" => Modifiers::COMMAND,
                "shift" => Modifiers::SHIFT,
                "alt" | "option" => Modifiers::ALT,
                _ => return None,
            };
    }
    Some(KeyboardShortcut::new(modifiers, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shortcut_with_modifiers() {
        let shortcut = parse_shortcut("Ctrl+Shift+Z").unwrap();
        assert_eq!(shortcut.logical_key, Key::Z);
        assert!(shortcut.modifiers.command);
        assert!(shortcut.modifiers.shift);
    }

    #[test]
    fn test_parse_shortcut_rejects_unknown_modifier() {
        assert!(parse_shortcut("Hyper+Z").is_none());
    }

    #[test]
    fn test_missing_actions_fall_back_to_defaults() {
        let stored: Shortcuts = serde_json::from_str(r#"{"undo":"Ctrl+U"}"#).unwrap();
        let shortcuts = stored.with_defaults();
        assert_eq!(shortcuts.binding(ShortcutAction::Undo), "Ctrl+U");
        assert_eq!(shortcuts.binding(ShortcutAction::Redo), "Ctrl+Y");
    }

    #[test]
    fn test_unknown_actions_do_not_discard_known_bindings() {
        let stored: Shortcuts =
            serde_json::from_str(r#"{"undo":"Ctrl+U","teleport":"Ctrl+T","delete":"X"}"#).unwrap();
        let shortcuts = stored.with_defaults();
        assert_eq!(shortcuts.binding(ShortcutAction::Undo), "Ctrl+U");
        assert_eq!(shortcuts.binding(ShortcutAction::Delete), "X");
        assert_eq!(shortcuts.binding(ShortcutAction::Redo), "Ctrl+Y");
    }
}
