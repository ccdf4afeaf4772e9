//! The editing engine: the single owner of the document and everything that
//! has to stay consistent with it.
//!
//! `EditorContext` is the only mutation surface. UI code (pointer handling,
//! panels, the renderer) reads through the accessors and changes state by
//! calling the operations below, each of which runs to completion before the
//! next can start.
//!
//! # History
//!
//! Every document mutation except [`EditorContext::move_by_delta_transient`]
//! is recorded as one undo step together with a short description in the
//! action log. A drag gesture is a run of transient moves closed by
//! [`EditorContext::commit_snapshot`], which records the whole gesture as a
//! single step. Starting any other mutation (or undo/redo) while a gesture is
//! open commits it first.
//!
//! # Example
//!
//! ```rust
//! use floorplan_editor::EditorContext;
//! use floorplan_editor::element::factory;
//! use egui::{pos2, vec2};
//!
//! let mut editor = EditorContext::new();
//! editor.add_object(factory::rectangle(pos2(10.0, 10.0), vec2(50.0, 30.0)));
//! assert_eq!(editor.objects().len(), 1);
//!
//! editor.undo();
//! assert!(editor.objects().is_empty());
//! ```

use std::path::Path;

use eframe::Storage;
use egui::Vec2;
use log::{debug, info, warn};

use super::editor_state::{EditorMode, GestureState};
use super::persistence::{self, AUTOSAVE_PROJECT_KEY, Expect, PersistenceError};
use super::preferences::Preferences;
use crate::color::{ColorPair, ColorPatch};
use crate::command::{Command, History};
use crate::document::{Document, LayerDirection};
use crate::element::{DrawableObject, ObjectId, ObjectPatch, Shape};
use crate::error::ProjectResult;
use crate::keybindings::{ShortcutAction, Shortcuts};
use crate::presets::ColorPresets;
use crate::project::{
    CompassPatch, CompassState, FengShuiParams, Floorplan, FloorplanPatch, PROJECT_VERSION,
    ProjectData,
};
use crate::selection::Selection;
use crate::tool::{ToolSettings, ToolType};
use crate::util::time;

pub const NEW_PROJECT_ENTRY: &str = "New Project";
pub const LOADED_PROJECT_ENTRY: &str = "Loaded Project";

/// Name given to projects created by [`EditorContext::reset`].
pub fn default_project_name() -> String {
    format!("Floorplan {}", time::today_iso())
}

fn fresh_feng_shui() -> FengShuiParams {
    let mut params = FengShuiParams::default();
    params.purples.calculated_at = Some(time::current_year());
    params
}

#[derive(Debug)]
pub struct EditorContext {
    document: Document,
    history: History,
    selection: Selection,
    gesture: GestureState,
    active_colors: ColorPair,
    presets: ColorPresets,
    preferences: Preferences,
    tool: ToolType,
    mode: EditorMode,
    project_name: String,
    floorplan: Floorplan,
    feng_shui: FengShuiParams,
    compass: CompassState,
    cleared_all: bool,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorContext {
    /// A fresh editor with default preferences and an empty project.
    pub fn new() -> Self {
        Self::with_preferences(Preferences::default(), ColorPresets::default())
    }

    /// A fresh editor whose preferences and presets come from `storage`.
    pub fn from_storage(storage: &dyn Storage) -> Self {
        Self::with_preferences(Preferences::load(storage), ColorPresets::load(storage))
    }

    fn with_preferences(preferences: Preferences, presets: ColorPresets) -> Self {
        Self {
            document: Document::new(),
            history: History::with_entry(NEW_PROJECT_ENTRY),
            selection: Selection::new(),
            gesture: GestureState::Idle,
            active_colors: preferences.active_colors,
            presets,
            preferences,
            tool: ToolType::Select,
            mode: EditorMode::Edit,
            project_name: default_project_name(),
            floorplan: Floorplan::default(),
            feng_shui: fresh_feng_shui(),
            compass: CompassState::default(),
            cleared_all: false,
        }
    }

    // ---------------------------------------------------------------------
    // Read access

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn objects(&self) -> &[DrawableObject] {
        self.document.objects()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> &[ObjectId] {
        self.selection.ids()
    }

    pub fn active_colors(&self) -> ColorPair {
        self.active_colors
    }

    pub fn presets(&self) -> &ColorPresets {
        &self.presets
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn tool_settings(&self) -> &ToolSettings {
        &self.preferences.tool_settings
    }

    pub fn tool(&self) -> ToolType {
        self.tool
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn floorplan(&self) -> &Floorplan {
        &self.floorplan
    }

    pub fn feng_shui(&self) -> &FengShuiParams {
        &self.feng_shui
    }

    pub fn compass(&self) -> &CompassState {
        &self.compass
    }

    /// Whether "clear all" was the last bulk operation since the project
    /// was opened.
    pub fn cleared_all(&self) -> bool {
        self.cleared_all
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.gesture.is_dragging()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Topmost object under `pos`, in document coordinates.
    pub fn object_at(&self, pos: egui::Pos2) -> Option<&DrawableObject> {
        self.objects().iter().rev().find(|o| o.hit_test(pos))
    }

    // ---------------------------------------------------------------------
    // Object store

    /// Run a recorded command: commit any open drag, snapshot, execute, and
    /// record the step when the command changed something.
    fn execute(&mut self, command: Command) -> Option<crate::command::Applied> {
        self.commit_snapshot();
        let before = self.document.clone();
        let applied = command.execute(&mut self.document)?;
        self.history.record(before, applied.description.as_str());
        Some(applied)
    }

    /// Append an object on top of the stack.
    pub fn add_object(&mut self, object: DrawableObject) {
        if self.execute(Command::AddObject(object)).is_some() {
            self.cleared_all = false;
        }
    }

    /// Stamp the active colors and tool settings onto a freshly drawn object.
    pub fn styled(&self, mut object: DrawableObject) -> DrawableObject {
        let settings = &self.preferences.tool_settings;
        object.set_colors(self.active_colors);
        object.stroke_width = settings.line_width;
        if let Shape::Text {
            font_size,
            font_family,
            ..
        } = &mut object.shape
        {
            *font_size = settings.font_size;
            font_family.clone_from(&settings.font_family);
            object.fill = settings.text_color;
        }
        object
    }

    pub fn update_object(&mut self, id: &ObjectId, patch: ObjectPatch) {
        self.execute(Command::UpdateObject {
            id: id.clone(),
            patch,
        });
    }

    pub fn update_objects(&mut self, ids: &[ObjectId], patch: ObjectPatch) {
        self.execute(Command::UpdateObjects {
            ids: ids.to_vec(),
            patch,
        });
    }

    pub fn move_by_delta(&mut self, ids: &[ObjectId], delta: Vec2) {
        self.execute(Command::MoveObjects {
            ids: ids.to_vec(),
            delta,
        });
    }

    /// Move objects without recording history, for live drag feedback.
    /// Objects with `draggable` cleared stay put. Must be followed by
    /// [`EditorContext::commit_snapshot`] when the gesture ends.
    pub fn move_by_delta_transient(&mut self, ids: &[ObjectId], delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let movable: Vec<ObjectId> = ids
            .iter()
            .filter(|id| self.document.get(id).is_some_and(|object| object.draggable))
            .cloned()
            .collect();
        if movable.is_empty() {
            return;
        }
        let document = &self.document;
        self.gesture.begin(|| document.clone());
        self.document.translate(&movable, delta);
    }

    /// Record the open drag gesture as one "Moved items" step. Does nothing
    /// when no gesture is open.
    pub fn commit_snapshot(&mut self) {
        if let Some(before) = self.gesture.finish() {
            self.history.record(before, "Moved items");
        }
    }

    pub fn remove_object(&mut self, id: &ObjectId) {
        if self.execute(Command::RemoveObject(id.clone())).is_some() {
            self.selection
                .retain_existing(&self.document, &mut self.active_colors);
        }
    }

    /// Remove every selected object as one undo step.
    pub fn delete_selected(&mut self) {
        let ids = self.selection.ids().to_vec();
        if self.execute(Command::RemoveObjects(ids)).is_some() {
            self.selection
                .retain_existing(&self.document, &mut self.active_colors);
        }
    }

    pub fn move_layer(&mut self, id: &ObjectId, direction: LayerDirection) {
        self.execute(Command::MoveLayer {
            id: id.clone(),
            direction,
        });
    }

    /// Duplicate objects on top of the stack. The copies become the
    /// selection and the select tool is activated. Returns the new ids.
    pub fn clone_objects(&mut self, ids: &[ObjectId]) -> Vec<ObjectId> {
        let Some(applied) = self.execute(Command::CloneObjects(ids.to_vec())) else {
            return Vec::new();
        };
        self.selection
            .select_many(&applied.created, &self.document, &mut self.active_colors);
        self.tool = ToolType::Select;
        applied.created
    }

    /// Remove every object as one undo step.
    pub fn clear_all(&mut self) {
        if self.execute(Command::ClearAll).is_some() {
            self.selection.clear(&mut self.active_colors);
            self.cleared_all = true;
        }
    }

    // ---------------------------------------------------------------------
    // History

    pub fn undo(&mut self) {
        self.commit_snapshot();
        if self.history.undo(&mut self.document) {
            debug!("Undo, {} steps left", self.history.past_len());
            self.selection
                .retain_existing(&self.document, &mut self.active_colors);
        }
    }

    pub fn redo(&mut self) {
        self.commit_snapshot();
        if self.history.redo(&mut self.document) {
            debug!("Redo, {} steps left", self.history.future_len());
            self.selection
                .retain_existing(&self.document, &mut self.active_colors);
        }
    }

    // ---------------------------------------------------------------------
    // Selection and colors

    /// Select exactly one object, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<&ObjectId>) {
        self.selection
            .select(id, &self.document, &mut self.active_colors);
    }

    pub fn toggle_selection(&mut self, id: &ObjectId) {
        self.selection
            .toggle(id, &self.document, &mut self.active_colors);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.active_colors);
    }

    /// Change the active colors. With a selection, the resulting stroke and
    /// fill are applied to every selected object as one undo step.
    pub fn set_colors(&mut self, patch: ColorPatch) {
        if patch.is_empty() {
            return;
        }
        patch.apply_to(&mut self.active_colors);
        self.presets.clear_active();
        self.propagate_colors();
    }

    fn propagate_colors(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let ids = self.selection.ids().to_vec();
        self.execute(Command::UpdateObjects {
            ids,
            patch: ObjectPatch::colors(self.active_colors),
        });
    }

    pub fn add_color_preset(&mut self, preset: ColorPair) {
        self.presets.add(preset);
    }

    pub fn update_color_preset(&mut self, index: usize, patch: ColorPatch) {
        self.presets.update(index, patch);
    }

    /// Make a preset the active colors, recoloring the selection if any.
    pub fn select_color_preset(&mut self, index: usize) {
        let Some(preset) = self.presets.select(index) else {
            return;
        };
        self.active_colors = preset;
        self.propagate_colors();
    }

    pub fn remove_color_preset(&mut self, index: usize) {
        self.presets.remove(index);
    }

    // ---------------------------------------------------------------------
    // Tools, mode, preferences

    pub fn set_tool(&mut self, tool: ToolType) {
        self.tool = tool;
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.commit_snapshot();
        self.mode = mode;
    }

    pub fn set_tool_settings(&mut self, settings: ToolSettings) {
        self.preferences.tool_settings = settings;
    }

    pub fn set_auto_save(&mut self, enabled: bool) {
        self.preferences.auto_save = enabled;
    }

    pub fn set_shortcut(&mut self, action: ShortcutAction, binding: impl Into<String>) {
        self.preferences.shortcuts.set(action, binding);
    }

    pub fn shortcuts(&self) -> &Shortcuts {
        &self.preferences.shortcuts
    }

    /// Write preferences and presets. Never fails; problems are logged.
    pub fn persist(&mut self, storage: &mut dyn Storage) {
        self.preferences.active_colors = self.persisted_colors();
        self.preferences.save(storage);
        self.presets.save(storage);
    }

    /// The colors to remember across sessions: the user's own choice, not
    /// the anchor colors borrowed from a selection.
    fn persisted_colors(&self) -> ColorPair {
        self.selection.color_snapshot().unwrap_or(self.active_colors)
    }

    // ---------------------------------------------------------------------
    // Floorplan, compass, feng shui

    /// Use a new background image; its placement starts from defaults.
    pub fn set_floorplan_image(&mut self, src: impl Into<String>) {
        self.floorplan = Floorplan {
            image_src: Some(src.into()),
            ..Floorplan::default()
        };
    }

    pub fn update_floorplan(&mut self, patch: FloorplanPatch) {
        self.floorplan.apply_patch(&patch);
    }

    pub fn clear_floorplan(&mut self) {
        self.floorplan = Floorplan::default();
    }

    pub fn update_compass(&mut self, patch: CompassPatch) {
        self.compass.apply_patch(&patch);
    }

    /// Drag the compass overlay; ignored while it is locked.
    pub fn move_compass(&mut self, delta: Vec2) -> bool {
        self.compass.drag(delta)
    }

    /// Rotate the compass overlay; ignored while it is locked.
    pub fn rotate_compass(&mut self, degrees: f32) -> bool {
        self.compass.rotate_by(degrees)
    }

    pub fn set_compass_locked(&mut self, locked: bool) {
        self.compass.locked = locked;
    }

    pub fn toggle_compass_visible(&mut self) {
        self.compass.visible = !self.compass.visible;
    }

    /// Replace the chart inputs. Star numbers are clamped into 1..=9.
    pub fn update_feng_shui(&mut self, params: FengShuiParams) {
        self.feng_shui = params.normalized();
    }

    /// Preview the annual stars `offset` years away from the computed year.
    pub fn set_annual_offset(&mut self, offset: i32) {
        self.feng_shui.purples.offset = offset;
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    // ---------------------------------------------------------------------
    // Project lifecycle

    /// Replace the whole project with `project`.
    ///
    /// History restarts at "Loaded Project", selection and drag state are
    /// dropped, the annual star preview returns to its base year and a
    /// missing project name keeps the current one.
    pub fn load_project(&mut self, project: ProjectData) {
        let ProjectData {
            name,
            floorplan,
            objects,
            mut feng_shui,
            compass,
            ..
        } = project;
        feng_shui.purples.offset = 0;

        self.document = Document::from_objects(objects);
        self.floorplan = floorplan;
        self.feng_shui = feng_shui;
        self.compass = compass;
        if let Some(name) = name {
            self.project_name = name;
        }
        self.restart(LOADED_PROJECT_ENTRY);
        info!(
            "Loaded project '{}' with {} objects",
            self.project_name,
            self.document.len()
        );
    }

    /// Start a brand-new empty project.
    pub fn reset(&mut self) {
        self.document = Document::new();
        self.floorplan = Floorplan::default();
        self.feng_shui = fresh_feng_shui();
        self.compass = CompassState::default();
        self.project_name = default_project_name();
        self.tool = ToolType::Select;
        self.restart(NEW_PROJECT_ENTRY);
        info!("Started new project '{}'", self.project_name);
    }

    fn restart(&mut self, entry: &str) {
        self.history.reset(entry);
        self.selection.reset();
        self.gesture = GestureState::Idle;
        self.cleared_all = false;
        self.mode = self.mode.after_project_change();
    }

    /// Capture the current project for saving.
    pub fn to_project(&self) -> ProjectData {
        ProjectData {
            version: PROJECT_VERSION.to_owned(),
            name: Some(self.project_name.clone()),
            floorplan: self.floorplan.clone(),
            objects: self.document.objects().to_vec(),
            feng_shui: self.feng_shui,
            compass: self.compass.clone(),
            timestamp: Some(time::timestamp_millis()),
        }
    }

    pub fn save_project(&self, path: impl AsRef<Path>) -> ProjectResult<()> {
        self.to_project().write_to(path)
    }

    pub fn open_project(&mut self, path: impl AsRef<Path>) -> ProjectResult<()> {
        let project = ProjectData::read_from(path)?;
        self.load_project(project);
        Ok(())
    }

    /// Store the current project in `storage` when auto-save is enabled.
    pub fn autosave(&self, storage: &mut dyn Storage) {
        if self.preferences.auto_save {
            persistence::write_json(storage, AUTOSAVE_PROJECT_KEY, &self.to_project());
        }
    }

    /// Load the auto-saved project, if there is a readable one.
    pub fn restore_autosave(&mut self, storage: &dyn Storage) -> bool {
        match persistence::read_json::<ProjectData>(storage, AUTOSAVE_PROJECT_KEY, Expect::Object) {
            Ok(project) => {
                self.load_project(project);
                true
            }
            Err(PersistenceError::Missing(_)) => false,
            Err(err) => {
                warn!("Ignoring auto-saved project: {err}");
                false
            }
        }
    }
}
