//! The versioned project file.

mod compass;
mod feng_shui;
mod floorplan;

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Deserializer, Serialize};

pub use compass::{CompassMode, CompassPatch, CompassState, DEFAULT_COMPASS_RADIUS};
pub use feng_shui::{BlackStars, DirectedStars, FengShuiParams, MAX_STAR, MIN_STAR, PurpleStars};
pub use floorplan::{Floorplan, FloorplanPatch};

use crate::element::DrawableObject;
use crate::error::{ProjectError, ProjectResult};

/// Format version written into new project files.
pub const PROJECT_VERSION: &str = "1.0";

/// Major versions this build can read.
const SUPPORTED_MAJOR: &str = "1";

/// Everything a saved project contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    #[serde(deserialize_with = "version_string")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub floorplan: Floorplan,
    #[serde(default)]
    pub objects: Vec<DrawableObject>,
    #[serde(default)]
    pub feng_shui: FengShuiParams,
    #[serde(default)]
    pub compass: CompassState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

/// Older files store the version as a number.
fn version_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawVersion {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawVersion::deserialize(deserializer)? {
        RawVersion::Text(text) => text,
        RawVersion::Number(number) => number.to_string(),
    })
}

impl Default for ProjectData {
    fn default() -> Self {
        Self {
            version: PROJECT_VERSION.to_owned(),
            name: None,
            floorplan: Floorplan::default(),
            objects: Vec::new(),
            feng_shui: FengShuiParams::default(),
            compass: CompassState::default(),
            timestamp: None,
        }
    }
}

impl ProjectData {
    /// Parse a project file, rejecting unknown major versions.
    pub fn from_json(json: &str) -> ProjectResult<Self> {
        let project: Self = serde_json::from_str(json)?;
        let major = project.version.split('.').next().unwrap_or_default();
        if major != SUPPORTED_MAJOR {
            return Err(ProjectError::UnsupportedVersion(project.version));
        }
        Ok(project)
    }

    pub fn to_json(&self) -> ProjectResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read_from(path: impl AsRef<Path>) -> ProjectResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let project = Self::from_json(&json)?;
        info!("Read project from {}", path.display());
        Ok(project)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> ProjectResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Wrote project to {}", path.display());
        Ok(())
    }
}
