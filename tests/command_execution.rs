use floorplan_editor::Color;
use floorplan_editor::command::{Command, History, MAX_LOG_ENTRIES};
use floorplan_editor::document::{Document, LayerDirection};
use floorplan_editor::element::{ObjectId, ObjectPatch, factory};
use floorplan_editor::state::EditorContext;
use egui::{Pos2, Vec2, pos2, vec2};

// Helper to create an editor holding a rectangle and an ellipse
fn create_test_editor() -> (EditorContext, ObjectId, ObjectId) {
    let mut editor = EditorContext::new();
    editor.add_object(factory::rectangle(pos2(10.0, 10.0), vec2(40.0, 20.0)));
    editor.add_object(factory::ellipse(pos2(100.0, 100.0), vec2(15.0, 10.0)));
    let a = editor.objects()[0].id().clone();
    let b = editor.objects()[1].id().clone();
    (editor, a, b)
}

fn ids(editor: &EditorContext) -> Vec<ObjectId> {
    editor.objects().iter().map(|o| o.id().clone()).collect()
}

#[test]
fn test_add_undo_redo_walkthrough() {
    let mut document = Document::from_objects(vec![
        factory::rectangle(pos2(0.0, 0.0), vec2(10.0, 10.0)),
        factory::ellipse(pos2(50.0, 50.0), vec2(5.0, 5.0)),
    ]);
    let start = document.clone();
    let mut history = History::new();

    let before = document.clone();
    let applied = Command::AddObject(factory::rectangle(pos2(5.0, 5.0), vec2(1.0, 1.0)))
        .execute(&mut document)
        .unwrap();
    history.record(before, applied.description);

    assert_eq!(document.len(), 3);
    assert_eq!(history.past(), &[start.clone()]);
    assert_eq!(history.log().collect::<Vec<_>>(), vec!["Added rectangle"]);

    let after_add = document.clone();
    assert!(history.undo(&mut document));
    assert_eq!(document, start);
    assert!(history.past().is_empty());
    assert_eq!(history.future().len(), 1);
    assert_eq!(history.future()[0], after_add);
    assert_eq!(history.undo_count(), 1);

    assert!(history.redo(&mut document));
    assert_eq!(document, after_add);
    assert!(history.future().is_empty());
    assert_eq!(history.undo_count(), 0);
}

#[test]
fn test_undo_restores_state_before_last_mutation() {
    let (mut editor, a, b) = create_test_editor();

    editor.update_object(&a, ObjectPatch::position(pos2(200.0, 200.0)));
    editor.move_by_delta(&[b.clone()], vec2(5.0, 5.0));
    let before_last = editor.document().clone();
    editor.remove_object(&a);

    editor.undo();
    assert_eq!(editor.document(), &before_last);
}

#[test]
fn test_redo_after_undo_round_trips() {
    let (mut editor, a, _) = create_test_editor();
    editor.update_object(&a, ObjectPatch::colors(floorplan_editor::ColorPair::new(Color::RED, Color::BLUE)));
    let after = editor.document().clone();

    editor.undo();
    assert_ne!(editor.document(), &after);
    editor.redo();
    assert_eq!(editor.document(), &after);
}

#[test]
fn test_mutation_after_undo_clears_future() {
    let (mut editor, a, _) = create_test_editor();
    editor.undo();
    editor.undo();
    assert!(editor.can_redo());

    editor.add_object(factory::line(pos2(0.0, 0.0), pos2(10.0, 10.0)));
    assert!(!editor.can_redo());
    assert_eq!(editor.history().undo_count(), 0);

    let before = editor.document().clone();
    editor.redo();
    assert_eq!(editor.document(), &before);
    assert!(!editor.document().contains(&a));
}

#[test]
fn test_undo_and_redo_on_empty_stacks_are_noops() {
    let mut editor = EditorContext::new();
    editor.undo();
    editor.redo();
    assert!(editor.objects().is_empty());
    assert_eq!(editor.history().undo_count(), 0);
    assert_eq!(editor.history().log().collect::<Vec<_>>(), vec!["New Project"]);
}

#[test]
fn test_log_is_capped() {
    let mut editor = EditorContext::new();
    for i in 0..(MAX_LOG_ENTRIES + 25) {
        editor.add_object(factory::rectangle(pos2(i as f32, 0.0), vec2(1.0, 1.0)));
        assert!(editor.history().log_len() <= MAX_LOG_ENTRIES);
    }
    assert_eq!(editor.history().log_len(), MAX_LOG_ENTRIES);
    assert_eq!(editor.history().log().next(), Some("Added rectangle"));
}

#[test]
fn test_undo_count_stays_within_log_length() {
    let mut editor = EditorContext::new();
    editor.add_object(factory::rectangle(pos2(0.0, 0.0), vec2(1.0, 1.0)));
    editor.add_object(factory::rectangle(pos2(1.0, 0.0), vec2(1.0, 1.0)));

    for _ in 0..5 {
        editor.undo();
        let history = editor.history();
        assert!(history.undo_count() <= history.log_len());
    }
    assert_eq!(editor.history().undo_count(), 2);
    assert!(editor.history().is_undone(0));
    assert!(editor.history().is_undone(1));
    assert!(!editor.history().is_undone(2));

    for _ in 0..5 {
        editor.redo();
    }
    assert_eq!(editor.history().undo_count(), 0);
}

#[test]
fn test_new_action_drops_undone_log_entries() {
    let mut editor = EditorContext::new();
    editor.add_object(factory::rectangle(pos2(0.0, 0.0), vec2(1.0, 1.0)));
    editor.add_object(factory::ellipse(pos2(0.0, 0.0), vec2(1.0, 1.0)));
    editor.undo();

    editor.add_object(factory::line(pos2(0.0, 0.0), pos2(1.0, 1.0)));
    assert_eq!(
        editor.history().log().collect::<Vec<_>>(),
        vec!["Added line", "Added rectangle", "New Project"]
    );
}

#[test]
fn test_command_descriptions() {
    let (mut editor, a, b) = create_test_editor();
    editor.update_object(&a, ObjectPatch::text("ignored"));
    editor.update_objects(&[a.clone(), b.clone()], ObjectPatch::position(pos2(1.0, 1.0)));
    editor.move_by_delta(&[a.clone()], vec2(3.0, 0.0));
    editor.move_layer(&a, LayerDirection::Up);
    editor.clone_objects(&[b.clone()]);
    editor.remove_object(&b);

    let log: Vec<_> = editor.history().log().take(6).collect();
    assert_eq!(
        log,
        vec![
            "Deleted ellipse",
            "Cloned 1 items",
            "Moved layer up",
            "Moved 1 items",
            "Updated 2 items",
            "Updated rectangle",
        ]
    );
}

#[test]
fn test_update_of_unknown_id_is_still_recorded() {
    let (mut editor, _, _) = create_test_editor();
    let before = editor.document().clone();
    editor.update_object(&ObjectId::from("missing"), ObjectPatch::position(pos2(1.0, 1.0)));
    assert_eq!(editor.document(), &before);
    assert_eq!(editor.history().log().next(), Some("Updated item"));
}

#[test]
fn test_noop_commands_leave_history_alone() {
    let (mut editor, a, b) = create_test_editor();
    let past = editor.history().past_len();

    editor.update_objects(&[], ObjectPatch::position(pos2(1.0, 1.0)));
    editor.move_by_delta(&[a.clone()], Vec2::ZERO);
    editor.move_by_delta(&[], vec2(1.0, 1.0));
    editor.remove_object(&ObjectId::from("missing"));
    editor.move_layer(&b, LayerDirection::Up);
    editor.move_layer(&a, LayerDirection::Down);

    assert_eq!(editor.history().past_len(), past);
    assert_eq!(ids(&editor), vec![a, b]);
}

#[test]
fn test_move_layer_swaps_neighbors() {
    let (mut editor, a, b) = create_test_editor();
    editor.move_layer(&a, LayerDirection::Up);
    assert_eq!(ids(&editor), vec![b.clone(), a.clone()]);
    editor.move_layer(&a, LayerDirection::Down);
    assert_eq!(ids(&editor), vec![a, b]);
}

#[test]
fn test_drag_gesture_is_one_undo_step() {
    let (mut editor, a, _) = create_test_editor();
    let start = editor.document().clone();
    let past = editor.history().past_len();

    for _ in 0..10 {
        editor.move_by_delta_transient(&[a.clone()], vec2(1.0, 2.0));
    }
    assert!(editor.is_dragging());
    assert_eq!(editor.history().past_len(), past);
    assert_eq!(editor.document().get(&a).unwrap().position, pos2(20.0, 30.0));

    editor.commit_snapshot();
    assert!(!editor.is_dragging());
    assert_eq!(editor.history().past_len(), past + 1);
    assert_eq!(editor.history().log().next(), Some("Moved items"));

    editor.undo();
    assert_eq!(editor.document(), &start);
}

#[test]
fn test_locked_objects_stay_put_during_drag() {
    let (mut editor, a, b) = create_test_editor();
    editor.update_object(
        &a,
        ObjectPatch {
            draggable: Some(false),
            ..ObjectPatch::default()
        },
    );
    let past = editor.history().past_len();

    editor.move_by_delta_transient(&[a.clone()], vec2(5.0, 5.0));
    assert!(!editor.is_dragging());
    editor.commit_snapshot();
    assert_eq!(editor.document().get(&a).unwrap().position, pos2(10.0, 10.0));
    assert_eq!(editor.history().past_len(), past);

    editor.move_by_delta_transient(&[a.clone(), b.clone()], vec2(5.0, 5.0));
    editor.commit_snapshot();
    assert_eq!(editor.document().get(&a).unwrap().position, pos2(10.0, 10.0));
    assert_eq!(editor.document().get(&b).unwrap().position, pos2(105.0, 105.0));
    assert_eq!(editor.history().past_len(), past + 1);
}

#[test]
fn test_commit_without_gesture_does_nothing() {
    let (mut editor, _, _) = create_test_editor();
    let past = editor.history().past_len();
    editor.commit_snapshot();
    editor.commit_snapshot();
    assert_eq!(editor.history().past_len(), past);
}

#[test]
fn test_open_gesture_is_committed_before_next_mutation() {
    let (mut editor, a, b) = create_test_editor();
    let start = editor.document().clone();

    editor.move_by_delta_transient(&[a.clone()], vec2(5.0, 0.0));
    editor.remove_object(&b);
    assert!(!editor.is_dragging());

    editor.undo();
    editor.undo();
    assert_eq!(editor.document(), &start);
}

#[test]
fn test_undo_during_gesture_reverts_the_gesture() {
    let (mut editor, a, _) = create_test_editor();
    let start = editor.document().clone();

    editor.move_by_delta_transient(&[a.clone()], vec2(5.0, 5.0));
    editor.undo();
    assert_eq!(editor.document(), &start);
    assert!(editor.can_redo());
}

#[test]
fn test_clear_all_records_once_and_sets_flag() {
    let (mut editor, _, _) = create_test_editor();
    editor.clear_all();
    assert!(editor.objects().is_empty());
    assert!(editor.cleared_all());
    assert_eq!(editor.history().log().next(), Some("Cleared all objects"));

    let past = editor.history().past_len();
    editor.clear_all();
    assert_eq!(editor.history().past_len(), past);

    editor.undo();
    assert_eq!(editor.objects().len(), 2);

    editor.add_object(factory::rectangle(Pos2::ZERO, vec2(1.0, 1.0)));
    assert!(!editor.cleared_all());
}
