use eframe::egui::{self, Color32};

use crate::FloorplanApp;
use crate::color::{Color, ColorPair, ColorPatch};
use crate::components::ToolButton;
use crate::document::LayerDirection;
use crate::project::{CompassMode, CompassPatch};
use crate::state::EditorMode;
use crate::tool::ToolType;

const SWATCH_SIZE: f32 = 20.0;

pub fn tools_panel(app: &mut FloorplanApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                project_section(app, ui);
                ui.separator();
                tool_section(app, ui);
                ui.separator();
                color_section(app, ui);
                ui.separator();
                selection_section(app, ui);
                ui.separator();
                compass_section(app, ui);
            });
        });
}

fn project_section(app: &mut FloorplanApp, ui: &mut egui::Ui) {
    let editor = app.editor_mut();
    ui.heading("Project");

    let mut name = editor.project_name().to_owned();
    if ui.text_edit_singleline(&mut name).changed() {
        editor.set_project_name(name);
    }

    ui.horizontal(|ui| {
        let mut mode = editor.mode();
        for candidate in [EditorMode::Edit, EditorMode::View, EditorMode::Compass] {
            ui.selectable_value(&mut mode, candidate, candidate.name());
        }
        if mode != editor.mode() {
            editor.set_mode(mode);
        }
    });

    let mut auto_save = editor.preferences().auto_save;
    if ui.checkbox(&mut auto_save, "Auto-save").changed() {
        editor.set_auto_save(auto_save);
    }
    if ui.button("New project").clicked() {
        editor.reset();
    }
}

fn tool_section(app: &mut FloorplanApp, ui: &mut egui::Ui) {
    let editor = app.editor_mut();
    ui.heading("Tools");

    ui.horizontal_wrapped(|ui| {
        for tool in ToolType::ALL {
            let button = ToolButton::new(tool, editor.tool() == tool);
            if button.show(ui).clicked() {
                log::info!("Tool selected from UI: {}", tool.name());
                editor.set_tool(tool);
            }
        }
    });

    let mut settings = editor.tool_settings().clone();
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label("Line width:");
        changed |= ui
            .add(egui::Slider::new(&mut settings.line_width, 1.0..=20.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label("Font size:");
        changed |= ui
            .add(egui::Slider::new(&mut settings.font_size, 8.0..=72.0))
            .changed();
    });
    ui.horizontal(|ui| {
        ui.label("Text color:");
        changed |= opaque_color_button(ui, &mut settings.text_color).changed();
    });
    if changed {
        editor.set_tool_settings(settings);
    }
}

fn color_section(app: &mut FloorplanApp, ui: &mut egui::Ui) {
    let editor = app.editor_mut();
    ui.heading("Colors");

    let ColorPair { mut stroke, mut fill } = editor.active_colors();
    ui.horizontal(|ui| {
        ui.label("Stroke:");
        if opaque_color_button(ui, &mut stroke).changed() {
            editor.set_colors(ColorPatch::stroke(stroke));
        }
        ui.label("Fill:");
        if ui.color_edit_button_srgba_unmultiplied(&mut fill.0).changed() {
            editor.set_colors(ColorPatch::fill(fill));
        }
    });

    let mut clicked = None;
    let mut removed = None;
    ui.horizontal_wrapped(|ui| {
        let presets = editor.presets();
        for (index, preset) in presets.list().iter().enumerate() {
            let response = swatch(ui, *preset, presets.active() == Some(index))
                .on_hover_text("Click to use, right-click to remove");
            if response.clicked() {
                clicked = Some(index);
            }
            if response.secondary_clicked() {
                removed = Some(index);
            }
        }
        let can_add = !editor.presets().is_full();
        if ui.add_enabled(can_add, egui::Button::new("+")).clicked() {
            let current = editor.active_colors();
            editor.add_color_preset(current);
        }
    });
    if let Some(index) = clicked {
        editor.select_color_preset(index);
    }
    if let Some(index) = removed {
        editor.remove_color_preset(index);
    }
}

/// Edits the RGB channels and leaves alpha alone.
fn opaque_color_button(ui: &mut egui::Ui, color: &mut Color) -> egui::Response {
    let [r, g, b, a] = color.to_array();
    let mut rgb = [r, g, b];
    let response = ui.color_edit_button_srgb(&mut rgb);
    if response.changed() {
        *color = Color::from_rgba_unmultiplied(rgb[0], rgb[1], rgb[2], a);
    }
    response
}

fn swatch(ui: &mut egui::Ui, preset: ColorPair, active: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 3.0, preset.fill.to_color32());
        painter.rect_stroke(rect.shrink(2.0), 3.0, egui::Stroke::new(3.0, preset.stroke.to_color32()));
        if active {
            painter.rect_stroke(rect.expand(2.0), 3.0, egui::Stroke::new(1.5, Color32::from_rgb(33, 150, 243)));
        }
    }
    response
}

fn selection_section(app: &mut FloorplanApp, ui: &mut egui::Ui) {
    let editor = app.editor_mut();
    let ids = editor.selected_ids().to_vec();
    ui.heading(format!("Selection ({})", ids.len()));

    ui.add_enabled_ui(!ids.is_empty(), |ui| {
        ui.horizontal(|ui| {
            if ui.button("Clone").clicked() {
                editor.clone_objects(&ids);
            }
            if ui.button("Delete").clicked() {
                editor.delete_selected();
            }
        });
        ui.horizontal(|ui| {
            if let Some(anchor) = editor.selection().anchor().cloned() {
                if ui.button("Bring forward").clicked() {
                    editor.move_layer(&anchor, LayerDirection::Up);
                }
                if ui.button("Send backward").clicked() {
                    editor.move_layer(&anchor, LayerDirection::Down);
                }
            }
        });
    });

    let has_objects = !editor.objects().is_empty();
    if ui.add_enabled(has_objects, egui::Button::new("Clear all")).clicked() {
        editor.clear_all();
    }
}

fn compass_section(app: &mut FloorplanApp, ui: &mut egui::Ui) {
    let editor = app.editor_mut();
    ui.heading("Compass");

    let mut compass = editor.compass().clone();
    let mut visible = compass.visible;
    if ui.checkbox(&mut visible, "Visible").changed() {
        editor.toggle_compass_visible();
    }
    if ui.checkbox(&mut compass.locked, "Locked").changed() {
        editor.set_compass_locked(compass.locked);
    }

    let mut patch = CompassPatch::default();
    ui.horizontal(|ui| {
        for mode in [CompassMode::Full, CompassMode::Simple] {
            let label = match mode {
                CompassMode::Full => "Full",
                CompassMode::Simple => "Simple",
            };
            if ui.selectable_label(compass.mode == mode, label).clicked() {
                patch.mode = Some(mode);
            }
        }
    });
    if ui
        .add(egui::Slider::new(&mut compass.opacity, 0.1..=1.0).text("Opacity"))
        .changed()
    {
        patch.opacity = Some(compass.opacity);
    }
    if ui
        .add(egui::Slider::new(&mut compass.radius, 50.0..=600.0).text("Radius"))
        .changed()
    {
        patch.radius = Some(compass.radius);
    }
    if patch != CompassPatch::default() {
        editor.update_compass(patch);
    }

    let purples = editor.feng_shui().purples;
    let mut offset = purples.offset;
    ui.horizontal(|ui| {
        ui.label("Annual offset:");
        if ui.add(egui::DragValue::new(&mut offset).range(-9..=9)).changed() {
            editor.set_annual_offset(offset);
        }
        if let Some(year) = editor.feng_shui().purples.preview_year() {
            ui.label(year.to_string());
        }
    });
}
