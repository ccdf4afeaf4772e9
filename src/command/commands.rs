use egui::Vec2;

use crate::document::{Document, LayerDirection};
use crate::element::{CLONE_OFFSET, DrawableObject, ObjectId, ObjectPatch};

/// Mutations of the document that are recorded in the undo history.
///
/// Transient drag moves are not commands: they go straight to the document
/// and the whole gesture is recorded once when it is committed.
#[derive(Debug, Clone)]
pub enum Command {
    AddObject(DrawableObject),
    UpdateObject {
        id: ObjectId,
        patch: ObjectPatch,
    },
    UpdateObjects {
        ids: Vec<ObjectId>,
        patch: ObjectPatch,
    },
    MoveObjects {
        ids: Vec<ObjectId>,
        delta: Vec2,
    },
    RemoveObject(ObjectId),
    RemoveObjects(Vec<ObjectId>),
    MoveLayer {
        id: ObjectId,
        direction: LayerDirection,
    },
    CloneObjects(Vec<ObjectId>),
    ClearAll,
}

/// What an executed command did, for the history log and for follow-up
/// bookkeeping (selection of clones, removal of deleted ids).
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub description: String,
    pub created: Vec<ObjectId>,
}

impl Applied {
    fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            created: Vec::new(),
        }
    }
}

impl Command {
    /// Execute the command against the document.
    ///
    /// Returns `None` when the command is a no-op that must not produce a
    /// history entry (empty id list, zero delta, unknown id, layer boundary).
    pub fn execute(self, document: &mut Document) -> Option<Applied> {
        match self {
            Command::AddObject(object) => {
                let kind = object.kind();
                document.push(object);
                Some(Applied::new(format!("Added {kind}")))
            }

            Command::UpdateObject { id, patch } => {
                let label = document
                    .get(&id)
                    .map_or("item", |o| o.kind().name());
                document.patch(&id, &patch);
                Some(Applied::new(format!("Updated {label}")))
            }

            Command::UpdateObjects { ids, patch } => {
                if ids.is_empty() {
                    return None;
                }
                document.patch_many(&ids, &patch);
                Some(Applied::new(format!("Updated {} items", ids.len())))
            }

            Command::MoveObjects { ids, delta } => {
                if ids.is_empty() || delta == Vec2::ZERO {
                    return None;
                }
                document.translate(&ids, delta);
                Some(Applied::new(format!("Moved {} items", ids.len())))
            }

            Command::RemoveObject(id) => {
                let removed = document.remove(&id)?;
                Some(Applied::new(format!("Deleted {}", removed.kind())))
            }

            Command::RemoveObjects(ids) => {
                match document.remove_many(&ids) {
                    0 => None,
                    count => Some(Applied::new(format!("Deleted {count} items"))),
                }
            }

            Command::MoveLayer { id, direction } => document
                .move_layer(&id, direction)
                .then(|| Applied::new(format!("Moved layer {}", direction.name()))),

            Command::CloneObjects(ids) => {
                let created = document.duplicate(&ids, CLONE_OFFSET);
                if created.is_empty() {
                    return None;
                }
                Some(Applied {
                    description: format!("Cloned {} items", created.len()),
                    created,
                })
            }

            Command::ClearAll => {
                if document.is_empty() {
                    return None;
                }
                document.clear();
                Some(Applied::new("Cleared all objects"))
            }
        }
    }
}
