use floorplan_editor::element::factory;
use floorplan_editor::error::ProjectError;
use floorplan_editor::project::{
    CompassMode, CompassPatch, FengShuiParams, FloorplanPatch, PROJECT_VERSION, ProjectData,
};
use floorplan_editor::state::{
    EditorContext, EditorMode, LOADED_PROJECT_ENTRY, MemoryStorage, NEW_PROJECT_ENTRY,
};
use floorplan_editor::util::time;
use egui::{pos2, vec2};

const SAVED_PROJECT: &str = r##"{
    "version": "1.0",
    "name": "Ground floor",
    "floorplan": {"imageSrc": "data:image/png;base64,AAAA", "rotation": 90, "scale": 1.5, "opacity": 0.5, "x": 10, "y": 20},
    "objects": [
        {
            "id": "rect-1",
            "position": {"x": 5.0, "y": 5.0},
            "stroke": "#ff0000",
            "fill": "transparent",
            "shape": {"type": "rectangle", "width": 50.0, "height": 20.0}
        }
    ],
    "fengShui": {
        "blacks": {"start": 3},
        "reds": {"start": 7, "reversed": true},
        "blues": {"start": 2},
        "purples": {"start": 9, "calculated_at": 2024, "offset": 4}
    },
    "compass": {"visible": true, "mode": "simple", "rotation": 45, "opacity": 0.7, "x": 300, "y": 200, "radius": 150}
}"##;

fn editor_with_history() -> EditorContext {
    let mut editor = EditorContext::new();
    editor.add_object(factory::rectangle(pos2(0.0, 0.0), vec2(10.0, 10.0)));
    editor.add_object(factory::ellipse(pos2(20.0, 20.0), vec2(5.0, 5.0)));
    let id = editor.objects()[0].id().clone();
    editor.select(Some(&id));
    editor.undo();
    editor
}

#[test]
fn test_saved_project_parses() {
    let project = ProjectData::from_json(SAVED_PROJECT).unwrap();
    assert_eq!(project.name.as_deref(), Some("Ground floor"));
    assert_eq!(project.objects.len(), 1);
    assert_eq!(project.floorplan.scale, 1.5);
    assert_eq!(project.compass.mode, CompassMode::Simple);
    assert!(project.timestamp.is_none());
}

#[test]
fn test_missing_lock_flag_defaults_to_locked() {
    let project = ProjectData::from_json(SAVED_PROJECT).unwrap();
    assert!(project.compass.locked);

    let unlocked = SAVED_PROJECT.replace(r#""radius": 150"#, r#""radius": 150, "locked": false"#);
    let project = ProjectData::from_json(&unlocked).unwrap();
    assert!(!project.compass.locked);
}

#[test]
fn test_numeric_version_is_accepted() {
    let json = SAVED_PROJECT.replace(r#""version": "1.0""#, r#""version": 1"#);
    let project = ProjectData::from_json(&json).unwrap();
    assert_eq!(project.version, "1");
}

#[test]
fn test_future_major_version_is_rejected() {
    let json = SAVED_PROJECT.replace(r#""version": "1.0""#, r#""version": "2.0""#);
    let err = ProjectData::from_json(&json).unwrap_err();
    assert!(matches!(err, ProjectError::UnsupportedVersion(version) if version == "2.0"));
}

#[test]
fn test_garbage_is_a_json_error() {
    assert!(matches!(ProjectData::from_json("{"), Err(ProjectError::Json(_))));
}

#[test]
fn test_load_replaces_everything() {
    let mut editor = editor_with_history();
    editor.clear_all();
    let project = ProjectData::from_json(SAVED_PROJECT).unwrap();

    editor.load_project(project);

    assert_eq!(editor.project_name(), "Ground floor");
    assert_eq!(editor.objects().len(), 1);
    assert_eq!(editor.objects()[0].id().as_str(), "rect-1");
    assert_eq!(editor.floorplan().rotation, 90.0);
    assert!(editor.compass().visible);
    assert_eq!(editor.feng_shui().reds.start, 7);
    assert!(editor.feng_shui().reds.reversed);

    assert_eq!(editor.history().log().collect::<Vec<_>>(), vec![LOADED_PROJECT_ENTRY]);
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert_eq!(editor.history().undo_count(), 0);
    assert!(editor.selected_ids().is_empty());
    assert!(editor.selection().color_snapshot().is_none());
    assert!(!editor.cleared_all());
}

#[test]
fn test_load_zeroes_annual_offset() {
    let mut editor = EditorContext::new();
    editor.load_project(ProjectData::from_json(SAVED_PROJECT).unwrap());

    let purples = editor.feng_shui().purples;
    assert_eq!(purples.offset, 0);
    assert_eq!(purples.calculated_at, Some(2024));
    assert_eq!(purples.preview_year(), Some(2024));
}

#[test]
fn test_annual_star_year_survives_save_and_load() {
    let json = r#"{"version":"1.0","fengShui":{"purples":{"start":4,"calculated_at":2023,"offset":2}}}"#;
    let project = ProjectData::from_json(json).unwrap();
    assert_eq!(project.feng_shui.purples.calculated_at, Some(2023));

    let saved = project.to_json().unwrap();
    assert!(saved.contains(r#""calculated_at""#));
    assert!(!saved.contains("calculatedAt"));
    let reloaded = ProjectData::from_json(&saved).unwrap();
    assert_eq!(reloaded.feng_shui.purples.calculated_at, Some(2023));
    assert_eq!(reloaded.feng_shui.purples.start, 4);
}

#[test]
fn test_camel_case_annual_star_year_is_still_read() {
    let json = r#"{"version":"1.0","fengShui":{"purples":{"start":4,"calculatedAt":2021}}}"#;
    let project = ProjectData::from_json(json).unwrap();
    assert_eq!(project.feng_shui.purples.calculated_at, Some(2021));
}

#[test]
fn test_reset_keeps_annual_offset_at_default() {
    let mut editor = EditorContext::new();
    editor.set_annual_offset(3);
    editor.reset();

    let purples = editor.feng_shui().purples;
    assert_eq!(purples.offset, 0);
    assert_eq!(purples.calculated_at, Some(time::current_year()));
}

#[test]
fn test_load_without_name_keeps_current_name() {
    let mut editor = EditorContext::new();
    editor.set_project_name("My flat");
    let json = SAVED_PROJECT.replace(r#""name": "Ground floor","#, "");

    editor.load_project(ProjectData::from_json(&json).unwrap());
    assert_eq!(editor.project_name(), "My flat");
}

#[test]
fn test_mode_after_load() {
    let mut editor = EditorContext::new();
    editor.set_mode(EditorMode::Compass);
    editor.load_project(ProjectData::default());
    assert_eq!(editor.mode(), EditorMode::Edit);

    editor.set_mode(EditorMode::View);
    editor.load_project(ProjectData::default());
    assert_eq!(editor.mode(), EditorMode::View);
}

#[test]
fn test_load_keeps_active_colors() {
    let mut editor = editor_with_history();
    let id = editor.objects()[0].id().clone();
    editor.select(Some(&id));
    let colors = editor.active_colors();

    editor.load_project(ProjectData::default());
    assert_eq!(editor.active_colors(), colors);
}

#[test]
fn test_reset_starts_a_new_project() {
    let mut editor = editor_with_history();
    editor.set_floorplan_image("plan.png");
    editor.update_compass(CompassPatch {
        visible: Some(true),
        ..CompassPatch::default()
    });

    editor.reset();

    assert!(editor.objects().is_empty());
    assert!(!editor.floorplan().has_image());
    assert!(!editor.compass().visible);
    assert!(editor.compass().locked);
    assert_eq!(editor.history().log().collect::<Vec<_>>(), vec![NEW_PROJECT_ENTRY]);
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert!(editor.selected_ids().is_empty());
    assert!(editor.project_name().starts_with("Floorplan "));
}

#[test]
fn test_load_drops_pending_gesture() {
    let mut editor = EditorContext::new();
    editor.add_object(factory::rectangle(pos2(0.0, 0.0), vec2(10.0, 10.0)));
    let id = editor.objects()[0].id().clone();
    editor.move_by_delta_transient(&[id], vec2(5.0, 5.0));

    editor.load_project(ProjectData::default());
    assert!(!editor.is_dragging());
    editor.commit_snapshot();
    assert!(!editor.can_undo());
}

#[test]
fn test_project_json_round_trip_through_editor() {
    let mut editor = EditorContext::new();
    editor.set_project_name("Office");
    editor.add_object(factory::callout(pos2(10.0, 10.0), "Desk", pos2(80.0, 80.0)));
    editor.set_floorplan_image("office.png");
    editor.update_floorplan(FloorplanPatch {
        scale: Some(2.0),
        ..FloorplanPatch::default()
    });
    editor.update_feng_shui(FengShuiParams::default());

    let project = editor.to_project();
    assert_eq!(project.version, PROJECT_VERSION);
    assert!(project.timestamp.is_some());

    let json = project.to_json().unwrap();
    assert!(json.contains("\"fengShui\""));
    let parsed = ProjectData::from_json(&json).unwrap();
    assert_eq!(parsed, project);

    let mut other = EditorContext::new();
    other.load_project(parsed);
    assert_eq!(other.objects(), editor.objects());
    assert_eq!(other.floorplan(), editor.floorplan());
    assert_eq!(other.project_name(), "Office");
}

#[test]
fn test_project_file_round_trip() {
    let mut editor = EditorContext::new();
    editor.add_object(factory::star(pos2(50.0, 50.0), 6, 30.0));
    let path = std::env::temp_dir().join(format!("floorplan-{}.json", uuid::Uuid::new_v4()));

    editor.save_project(&path).unwrap();
    let mut other = EditorContext::new();
    other.open_project(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(other.objects(), editor.objects());
}

#[test]
fn test_opening_missing_file_is_an_io_error() {
    let mut editor = EditorContext::new();
    let err = editor.open_project("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ProjectError::Io(_)));
}

#[test]
fn test_star_numbers_are_clamped() {
    let mut editor = EditorContext::new();
    let mut params = FengShuiParams::default();
    params.blacks.start = 0;
    params.purples.start = 12;
    editor.update_feng_shui(params);
    assert_eq!(editor.feng_shui().blacks.start, 1);
    assert_eq!(editor.feng_shui().purples.start, 9);
}

#[test]
fn test_locked_compass_ignores_drag_and_rotation() {
    let mut editor = EditorContext::new();
    assert!(editor.compass().locked);
    let before = editor.compass().clone();

    assert!(!editor.move_compass(vec2(10.0, 10.0)));
    assert!(!editor.rotate_compass(30.0));
    assert_eq!(editor.compass(), &before);

    editor.set_compass_locked(false);
    assert!(editor.move_compass(vec2(10.0, 10.0)));
    assert!(editor.rotate_compass(-30.0));
    assert_eq!(editor.compass().x, before.x + 10.0);
    assert_eq!(editor.compass().rotation, 330.0);
}

#[test]
fn test_autosave_round_trip() {
    let mut editor = EditorContext::new();
    editor.set_project_name("Autosaved");
    editor.add_object(factory::rectangle(pos2(1.0, 1.0), vec2(2.0, 2.0)));

    let mut storage = MemoryStorage::new();
    editor.autosave(&mut storage);

    let mut restored = EditorContext::from_storage(&storage);
    assert!(restored.restore_autosave(&storage));
    assert_eq!(restored.project_name(), "Autosaved");
    assert_eq!(restored.objects(), editor.objects());
}

#[test]
fn test_autosave_disabled_writes_nothing() {
    let mut editor = EditorContext::new();
    editor.set_auto_save(false);
    let mut storage = MemoryStorage::new();
    editor.autosave(&mut storage);
    assert!(storage.is_empty());

    let mut other = EditorContext::new();
    assert!(!other.restore_autosave(&storage));
}
