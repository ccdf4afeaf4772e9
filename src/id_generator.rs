use std::collections::HashSet;

use uuid::Uuid;

use crate::element::{ObjectId, ShapeKind};

/// Generate a fresh identifier for an object of the given kind.
pub fn generate_id(kind: ShapeKind) -> ObjectId {
    ObjectId::new(format!("{}-{}", kind.name(), Uuid::new_v4().simple()))
}

/// Generate an identifier that is not in `taken`, and reserve it.
pub fn generate_unique_id(kind: ShapeKind, taken: &mut HashSet<ObjectId>) -> ObjectId {
    loop {
        let id = generate_id(kind);
        if taken.insert(id.clone()) {
            return id;
        }
    }
}
