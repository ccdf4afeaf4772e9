use eframe::egui::{self, RichText};

use crate::FloorplanApp;

/// Action log, most recent first. Undone entries are struck through.
pub fn history_panel(app: &mut FloorplanApp, ctx: &egui::Context) {
    egui::SidePanel::right("history_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("History");

            let editor = app.editor_mut();
            ui.horizontal(|ui| {
                if ui.add_enabled(editor.can_undo(), egui::Button::new("Undo")).clicked() {
                    editor.undo();
                }
                if ui.add_enabled(editor.can_redo(), egui::Button::new("Redo")).clicked() {
                    editor.redo();
                }
            });

            let history = editor.history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo: {}", history.past_len()));
                ui.label(format!("Redo: {}", history.future_len()));
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (index, entry) in history.log().enumerate() {
                    let text = RichText::new(entry);
                    if history.is_undone(index) {
                        ui.label(text.strikethrough().weak());
                    } else {
                        ui.label(text);
                    }
                }
            });
        });
}
