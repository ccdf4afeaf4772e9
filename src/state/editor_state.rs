//! Editor mode and the in-flight drag gesture.
//!
//! A drag gesture is a small state machine:
//!
//! ```text
//!            first transient move      commit_snapshot, or any recorded
//!                                      mutation, undo or redo
//!   ┌──────┐ ───────────────────► ┌──────────┐ ───────────────► ┌──────┐
//!   │ Idle │                      │ Dragging │  (one step kept) │ Idle │
//!   └──────┘ ◄─────────────────── └──────────┘                  └──────┘
//!                 load / reset (gesture dropped)
//! ```
//!
//! While `Dragging`, the document snapshot taken before the first move is
//! held so that the whole gesture can be recorded as one history step.

use crate::document::Snapshot;

/// What the user is doing with the project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorMode {
    /// Drawing and arranging objects.
    #[default]
    Edit,
    /// Read-only presentation.
    View,
    /// Positioning and rotating the compass overlay.
    Compass,
}

impl EditorMode {
    pub fn name(self) -> &'static str {
        match self {
            EditorMode::Edit => "Edit",
            EditorMode::View => "View",
            EditorMode::Compass => "Compass",
        }
    }

    /// Mode to continue in after a project is loaded or reset: a viewer
    /// stays a viewer, everything else returns to editing.
    pub fn after_project_change(self) -> Self {
        match self {
            EditorMode::View => EditorMode::View,
            EditorMode::Edit | EditorMode::Compass => EditorMode::Edit,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        /// Document before the first transient move of the gesture.
        before: Box<Snapshot>,
    },
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging { .. })
    }

    /// Begin a gesture unless one is already running.
    pub fn begin(&mut self, before: impl FnOnce() -> Snapshot) {
        if let GestureState::Idle = self {
            *self = GestureState::Dragging {
                before: Box::new(before()),
            };
        }
    }

    /// End the gesture, returning the snapshot taken when it began.
    pub fn finish(&mut self) -> Option<Snapshot> {
        match std::mem::take(self) {
            GestureState::Dragging { before } => Some(*before),
            GestureState::Idle => None,
        }
    }
}
