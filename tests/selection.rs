use floorplan_editor::{Color, ColorPair};
use floorplan_editor::color::ColorPatch;
use floorplan_editor::element::{ObjectId, factory};
use floorplan_editor::state::EditorContext;
use floorplan_editor::tool::ToolType;
use egui::{pos2, vec2};

const RED_ON_BLUE: ColorPair = ColorPair::new(Color::RED, Color::BLUE);
const GREEN_ON_YELLOW: ColorPair = ColorPair::new(Color::GREEN, Color::YELLOW);

// Editor with two differently colored objects and neutral active colors
fn create_test_editor() -> (EditorContext, ObjectId, ObjectId) {
    let mut editor = EditorContext::new();
    editor.add_object(factory::rectangle(pos2(0.0, 0.0), vec2(10.0, 10.0)).with_colors(RED_ON_BLUE));
    editor.add_object(factory::ellipse(pos2(50.0, 50.0), vec2(5.0, 5.0)).with_colors(GREEN_ON_YELLOW));
    let a = editor.objects()[0].id().clone();
    let b = editor.objects()[1].id().clone();
    (editor, a, b)
}

#[test]
fn test_select_adopts_anchor_colors() {
    let (mut editor, a, _) = create_test_editor();
    let original = editor.active_colors();

    editor.select(Some(&a));
    assert_eq!(editor.selected_ids(), &[a.clone()]);
    assert_eq!(editor.active_colors(), RED_ON_BLUE);
    assert_eq!(editor.selection().color_snapshot(), Some(original));
}

#[test]
fn test_deselect_restores_exact_colors_after_edits() {
    let (mut editor, a, _) = create_test_editor();
    let original = editor.active_colors();

    editor.select(Some(&a));
    editor.set_colors(ColorPatch::stroke(Color::DARK_GREEN));
    editor.set_colors(ColorPatch::fill(Color::LIGHT_GRAY));
    editor.select(None);

    assert_eq!(editor.active_colors(), original);
    assert!(editor.selection().color_snapshot().is_none());
}

#[test]
fn test_set_colors_recolors_selection_as_one_step() {
    let (mut editor, a, b) = create_test_editor();
    editor.select(Some(&a));
    editor.toggle_selection(&b);
    let past = editor.history().past_len();

    editor.set_colors(ColorPatch::stroke(Color::WHITE));

    assert_eq!(editor.history().past_len(), past + 1);
    assert_eq!(editor.history().log().next(), Some("Updated 2 items"));
    // b is the anchor, so its fill is what both objects now share
    let expected = ColorPair::new(Color::WHITE, Color::YELLOW);
    assert_eq!(editor.document().get(&a).unwrap().colors(), expected);
    assert_eq!(editor.document().get(&b).unwrap().colors(), expected);
}

#[test]
fn test_set_colors_without_selection_touches_no_objects() {
    let (mut editor, a, _) = create_test_editor();
    let past = editor.history().past_len();

    editor.set_colors(ColorPatch::fill(Color::GOLD));

    assert_eq!(editor.active_colors().fill, Color::GOLD);
    assert_eq!(editor.history().past_len(), past);
    assert_eq!(editor.document().get(&a).unwrap().colors(), RED_ON_BLUE);
}

#[test]
fn test_toggle_moves_anchor_and_keeps_snapshot() {
    let (mut editor, a, b) = create_test_editor();
    let original = editor.active_colors();

    editor.toggle_selection(&a);
    editor.toggle_selection(&b);
    assert_eq!(editor.selected_ids(), &[a.clone(), b.clone()]);
    assert_eq!(editor.active_colors(), GREEN_ON_YELLOW);

    editor.toggle_selection(&b);
    assert_eq!(editor.selected_ids(), &[a.clone()]);
    assert_eq!(editor.active_colors(), RED_ON_BLUE);

    editor.toggle_selection(&a);
    assert!(editor.selected_ids().is_empty());
    assert_eq!(editor.active_colors(), original);
}

#[test]
fn test_selecting_unknown_id_is_ignored() {
    let (mut editor, a, _) = create_test_editor();
    editor.select(Some(&a));
    editor.select(Some(&ObjectId::from("nope")));
    assert_eq!(editor.selected_ids(), &[a]);
}

#[test]
fn test_clone_selects_exactly_the_copies() {
    let (mut editor, a, b) = create_test_editor();
    editor.select(Some(&a));
    editor.toggle_selection(&b);
    editor.set_tool(ToolType::Rectangle);
    let existing = editor.document().ids();

    let created = editor.clone_objects(&[a.clone(), b.clone()]);

    assert_eq!(created.len(), 2);
    assert!(created.iter().all(|id| !existing.contains(id)));
    assert_eq!(editor.selected_ids(), created.as_slice());
    assert_eq!(editor.tool(), ToolType::Select);
    assert_eq!(editor.objects().len(), 4);
    assert_eq!(editor.history().log().next(), Some("Cloned 2 items"));
}

#[test]
fn test_removing_selected_object_restores_colors() {
    let (mut editor, a, _) = create_test_editor();
    let original = editor.active_colors();
    editor.select(Some(&a));

    editor.remove_object(&a);
    assert!(editor.selected_ids().is_empty());
    assert_eq!(editor.active_colors(), original);
}

#[test]
fn test_delete_selected_removes_all_in_one_step() {
    let (mut editor, a, b) = create_test_editor();
    editor.select(Some(&a));
    editor.toggle_selection(&b);

    editor.delete_selected();
    assert!(editor.objects().is_empty());
    assert_eq!(editor.history().log().next(), Some("Deleted 2 items"));

    editor.undo();
    assert_eq!(editor.objects().len(), 2);
}

#[test]
fn test_undo_drops_vanished_ids_from_selection() {
    let mut editor = EditorContext::new();
    editor.add_object(factory::rectangle(pos2(0.0, 0.0), vec2(10.0, 10.0)));
    let id = editor.objects()[0].id().clone();
    editor.select(Some(&id));

    editor.undo();
    assert!(editor.selected_ids().is_empty());
    assert!(editor.selection().color_snapshot().is_none());
}

#[test]
fn test_snapshot_present_iff_selection_non_empty() {
    let (mut editor, a, b) = create_test_editor();
    let check = |editor: &EditorContext| {
        assert_eq!(
            editor.selection().color_snapshot().is_some(),
            !editor.selected_ids().is_empty()
        );
    };

    check(&editor);
    editor.select(Some(&a));
    check(&editor);
    editor.toggle_selection(&b);
    check(&editor);
    editor.remove_object(&a);
    check(&editor);
    editor.clear_selection();
    check(&editor);
    editor.toggle_selection(&b);
    check(&editor);
    editor.clear_all();
    check(&editor);
}
