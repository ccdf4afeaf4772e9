//! Key/value persistence for preferences and presets.
//!
//! Values are JSON strings stored through [`eframe::Storage`], which is backed
//! by a file on native and `localStorage` on the web. Reads never fail:
//! missing, unparsable or wrongly-shaped values are replaced by a default.
//! Writes never fail either: serialization problems are logged and skipped,
//! leaving the in-memory state authoritative.

use std::collections::HashMap;

use eframe::Storage;
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Prefix shared by every key this crate writes.
pub const KEY_PREFIX: &str = "floorplan.";

pub const SHORTCUTS_KEY: &str = "floorplan.shortcuts";
pub const AUTO_SAVE_KEY: &str = "floorplan.autoSave";
pub const TOOL_SETTINGS_KEY: &str = "floorplan.toolSettings";
pub const ACTIVE_COLORS_KEY: &str = "floorplan.activeColors";
pub const COLOR_PRESETS_KEY: &str = "floorplan.colorPresets";
pub const AUTOSAVE_PROJECT_KEY: &str = "floorplan.autosaveProject";

/// Errors that can occur while decoding a stored value
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no value stored under `{0}`")]
    Missing(String),

    #[error("malformed value under `{key}`: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value under `{key}` is not {expected}")]
    WrongShape { key: String, expected: &'static str },
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// The JSON shape a stored value must have before it is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Object,
    Array,
    Bool,
    Any,
}

impl Expect {
    fn matches(self, value: &serde_json::Value) -> bool {
        match self {
            Expect::Object => value.is_object(),
            Expect::Array => value.is_array(),
            Expect::Bool => value.is_boolean(),
            Expect::Any => true,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Expect::Object => "an object",
            Expect::Array => "an array",
            Expect::Bool => "a boolean",
            Expect::Any => "a value",
        }
    }
}

/// Read and decode the value under `key`.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
    expect: Expect,
) -> PersistenceResult<T> {
    let raw = storage
        .get_string(key)
        .ok_or_else(|| PersistenceError::Missing(key.to_owned()))?;
    let malformed = |source| PersistenceError::Malformed {
        key: key.to_owned(),
        source,
    };
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(malformed)?;
    if !expect.matches(&value) {
        return Err(PersistenceError::WrongShape {
            key: key.to_owned(),
            expected: expect.describe(),
        });
    }
    serde_json::from_value(value).map_err(malformed)
}

/// Read the value under `key`, falling back to `default()` on any problem.
pub fn read_or_else<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
    expect: Expect,
    default: impl FnOnce() -> T,
) -> T {
    match read_json(storage, key, expect) {
        Ok(value) => value,
        Err(PersistenceError::Missing(_)) => {
            debug!("No stored value for {key}, using default");
            default()
        }
        Err(err) => {
            warn!("Discarding stored preference: {err}");
            default()
        }
    }
}

/// Read a JSON object under `key`, falling back to `T::default()`.
pub fn read_object_or_default<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    read_or_else(storage, key, Expect::Object, T::default)
}

/// Read a boolean flag under `key`, falling back to `default` when it is
/// missing or not a JSON boolean.
pub fn read_bool_or(storage: &dyn Storage, key: &str, default: bool) -> bool {
    read_or_else(storage, key, Expect::Bool, || default)
}

/// Serialize `value` under `key`. Failures are logged and swallowed.
pub fn write_json<T: Serialize + ?Sized>(storage: &mut dyn Storage, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => storage.set_string(key, json),
        Err(err) => warn!("Failed to serialize preference {key}: {err}"),
    }
}

/// In-memory [`Storage`], for headless use and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {}
}
