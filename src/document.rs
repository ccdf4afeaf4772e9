use std::collections::HashSet;

use egui::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::element::{DrawableObject, ObjectId, ObjectPatch};

/// Direction for [`Document::move_layer`]. `Up` is toward the end of the
/// sequence, which is drawn on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerDirection {
    Up,
    Down,
}

impl LayerDirection {
    pub fn name(self) -> &'static str {
        match self {
            LayerDirection::Up => "up",
            LayerDirection::Down => "down",
        }
    }
}

/// The ordered collection of drawable objects. Index 0 is the bottom-most.
///
/// A `Document` is also the unit of undo history: snapshots are plain clones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    objects: Vec<DrawableObject>,
}

/// An immutable copy of the document taken for undo/redo.
pub type Snapshot = Document;

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from loaded objects. Duplicate ids (anywhere in the
    /// tree) are replaced so that every id in the document stays unique.
    pub fn from_objects(objects: Vec<DrawableObject>) -> Self {
        let mut taken = HashSet::new();
        let mut document = Self::new();
        for mut object in objects {
            let mut ids = HashSet::new();
            object.collect_ids(&mut ids);
            if !ids.is_disjoint(&taken) {
                warn!("Duplicate object id {} in loaded data, assigning new ids", object.id());
                object.renew_ids(&mut taken);
            } else {
                taken.extend(ids);
            }
            document.objects.push(object);
        }
        document
    }

    pub fn objects(&self) -> &[DrawableObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: &ObjectId) -> Option<&DrawableObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut DrawableObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    pub fn index_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id() == id)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// Every id in use, including those of nested children.
    pub fn ids(&self) -> HashSet<ObjectId> {
        let mut ids = HashSet::new();
        for object in &self.objects {
            object.collect_ids(&mut ids);
        }
        ids
    }

    /// Append an object on top. If any of its ids already exists in the
    /// document, the object receives fresh ids instead.
    pub fn push(&mut self, mut object: DrawableObject) -> ObjectId {
        let mut taken = self.ids();
        let mut incoming = HashSet::new();
        object.collect_ids(&mut incoming);
        if !incoming.is_disjoint(&taken) {
            warn!("Object id {} already in use, assigning a new one", object.id());
            object.renew_ids(&mut taken);
        }
        let id = object.id().clone();
        self.objects.push(object);
        id
    }

    pub fn remove(&mut self, id: &ObjectId) -> Option<DrawableObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    /// Remove every object whose id is in `ids`, returning how many were removed.
    pub fn remove_many(&mut self, ids: &[ObjectId]) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| !ids.contains(o.id()));
        before - self.objects.len()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Merge `patch` into the object with `id`. Returns false if no such object.
    pub fn patch(&mut self, id: &ObjectId, patch: &ObjectPatch) -> bool {
        match self.get_mut(id) {
            Some(object) => {
                object.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Merge `patch` into every object whose id is in `ids`.
    pub fn patch_many(&mut self, ids: &[ObjectId], patch: &ObjectPatch) -> usize {
        let mut count = 0;
        for object in self.objects.iter_mut().filter(|o| ids.contains(o.id())) {
            object.apply_patch(patch);
            count += 1;
        }
        count
    }

    /// Translate every object whose id is in `ids`.
    pub fn translate(&mut self, ids: &[ObjectId], delta: Vec2) -> usize {
        let mut count = 0;
        for object in self.objects.iter_mut().filter(|o| ids.contains(o.id())) {
            object.translate(delta);
            count += 1;
        }
        count
    }

    /// Swap the object with its neighbor in `direction`. Returns false at the
    /// boundary or when `id` is unknown.
    pub fn move_layer(&mut self, id: &ObjectId, direction: LayerDirection) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let neighbor = match direction {
            LayerDirection::Up if index + 1 < self.objects.len() => index + 1,
            LayerDirection::Down if index > 0 => index - 1,
            _ => return false,
        };
        self.objects.swap(index, neighbor);
        true
    }

    /// Append offset copies of the objects in `ids`, in document order, and
    /// return the new ids. Copies get ids disjoint from every existing id.
    pub fn duplicate(&mut self, ids: &[ObjectId], offset: Vec2) -> Vec<ObjectId> {
        let mut taken = self.ids();
        let copies: Vec<DrawableObject> = self
            .objects
            .iter()
            .filter(|o| ids.contains(o.id()))
            .map(|o| {
                let mut copy = o.duplicate(&mut taken);
                copy.translate(offset);
                copy
            })
            .collect();
        let new_ids = copies.iter().map(|c| c.id().clone()).collect();
        self.objects.extend(copies);
        new_ids
    }
}
