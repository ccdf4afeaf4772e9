mod context;
mod editor_state;
pub mod persistence;
mod preferences;

pub use context::{EditorContext, LOADED_PROJECT_ENTRY, NEW_PROJECT_ENTRY, default_project_name};
pub use editor_state::{EditorMode, GestureState};
pub use persistence::{MemoryStorage, PersistenceError, PersistenceResult};
pub use preferences::{DEFAULT_AUTO_SAVE, Preferences};
