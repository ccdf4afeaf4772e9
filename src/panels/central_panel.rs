use eframe::egui::{self, Pos2, Rect, Sense};

use crate::FloorplanApp;
use crate::element::{DrawableObject, factory};
use crate::state::EditorMode;
use crate::tool::ToolType;

/// Smallest drag, in points, that creates a shape.
const MIN_DRAG: f32 = 2.0;
const DEFAULT_STAR_POINTS: u32 = 5;
const DEFAULT_TEXT: &str = "Text";

pub fn central_panel(app: &mut FloorplanApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let canvas_rect = response.rect;
        let origin = canvas_rect.min.to_vec2();
        let to_document = |screen: Pos2| screen - origin;

        let pointer = response.interact_pointer_pos().map(to_document);
        let shift = ui.input(|input| input.modifiers.shift);

        match app.editor().mode() {
            EditorMode::Edit => handle_edit(app, &response, pointer, shift),
            EditorMode::Compass => {
                if response.dragged() {
                    let delta = response.drag_delta();
                    let editor = app.editor_mut();
                    if shift {
                        editor.rotate_compass(delta.x);
                    } else {
                        editor.move_compass(delta);
                    }
                }
            }
            EditorMode::View => {}
        }

        app.renderer().render(&painter, canvas_rect, app.editor());
        if let (Some(start), Some(end)) = (app.draft(), pointer) {
            app.renderer()
                .render_draft(&painter, start + origin, end + origin);
        }
    });
}

fn handle_edit(app: &mut FloorplanApp, response: &egui::Response, pointer: Option<Pos2>, shift: bool) {
    let tool = app.editor().tool();
    let Some(pos) = pointer else {
        return;
    };

    if tool == ToolType::Select {
        let hit = app.editor().object_at(pos).map(|o| o.id().clone());
        let editor = app.editor_mut();
        if response.clicked() {
            match (&hit, shift) {
                (Some(id), true) => editor.toggle_selection(id),
                (hit, _) => editor.select(hit.as_ref()),
            }
        }
        if response.drag_started() {
            if let Some(id) = &hit {
                if !editor.selection().contains(id) {
                    editor.select(Some(id));
                }
            }
        }
        if response.dragged() {
            let ids = editor.selected_ids().to_vec();
            editor.move_by_delta_transient(&ids, response.drag_delta());
        }
        if response.drag_stopped() {
            editor.commit_snapshot();
        }
        return;
    }

    if response.clicked() {
        if let Some(object) = create_on_click(tool, pos) {
            let editor = app.editor_mut();
            let object = editor.styled(object);
            editor.add_object(object);
        }
    }
    if response.drag_started() {
        app.set_draft(Some(pos));
    }
    if response.drag_stopped() {
        if let Some(start) = app.draft() {
            app.set_draft(None);
            if let Some(object) = create_from_drag(tool, start, pos) {
                let editor = app.editor_mut();
                let object = editor.styled(object);
                editor.add_object(object);
            }
        }
    }
}

fn create_on_click(tool: ToolType, pos: Pos2) -> Option<DrawableObject> {
    match tool {
        ToolType::Text => Some(factory::text(pos, DEFAULT_TEXT, crate::element::DEFAULT_FONT_SIZE)),
        ToolType::Callout => Some(factory::callout(pos, DEFAULT_TEXT, pos + egui::vec2(60.0, 60.0))),
        _ => None,
    }
}

/// The object a drag from `start` to `end` draws with `tool`.
pub fn create_from_drag(tool: ToolType, start: Pos2, end: Pos2) -> Option<DrawableObject> {
    if (end - start).length() < MIN_DRAG {
        return None;
    }
    let rect = Rect::from_two_pos(start, end);
    let object = match tool {
        ToolType::Select => return None,
        ToolType::Rectangle => factory::rectangle(rect.min, rect.size()),
        ToolType::Ellipse => factory::ellipse(rect.center(), rect.size() / 2.0),
        ToolType::Line => factory::line(start, end),
        ToolType::Arrow => factory::arrow(start, end),
        ToolType::Star => factory::star(start, DEFAULT_STAR_POINTS, (end - start).length()),
        ToolType::Polygon => {
            let size = rect.size();
            let points = vec![
                egui::pos2(size.x / 2.0, 0.0),
                egui::pos2(size.x, size.y),
                egui::pos2(0.0, size.y),
            ];
            factory::polygon(rect.min, points)
        }
        ToolType::Text => factory::text(rect.min, DEFAULT_TEXT, crate::element::DEFAULT_FONT_SIZE),
        ToolType::Callout => factory::callout(start, DEFAULT_TEXT, end),
    };
    Some(object)
}
