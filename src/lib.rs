#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod command;
pub mod components;
pub mod document;
pub mod element;
pub mod error;
pub mod id_generator;
pub mod keybindings;
pub mod panels;
pub mod presets;
pub mod project;
pub mod renderer;
pub mod selection;
pub mod state;
pub mod tool;
pub mod util;

pub use app::FloorplanApp;
pub use color::{Color, ColorPair, ColorPatch};
pub use command::{Command, History};
pub use document::{Document, LayerDirection, Snapshot};
pub use element::{DrawableObject, ObjectId, ObjectPatch, Shape};
pub use error::{ProjectError, ProjectResult};
pub use presets::ColorPresets;
pub use project::ProjectData;
pub use renderer::Renderer;
pub use selection::Selection;
pub use state::{EditorContext, EditorMode, MemoryStorage};
pub use tool::{ToolSettings, ToolType};
