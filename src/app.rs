use eframe::egui;
use log::info;

use crate::keybindings::ShortcutAction;
use crate::panels::{central_panel, history_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::EditorContext;
use crate::tool::ToolType;

/// Hosts the editing engine in an eframe window.
///
/// All project data lives in [`EditorContext`]; the app only owns view
/// state that never needs undo or persistence.
#[derive(Debug)]
pub struct FloorplanApp {
    editor: EditorContext,
    renderer: Renderer,
    /// Start of the shape currently being drawn, in document coordinates.
    draft: Option<egui::Pos2>,
}

impl Default for FloorplanApp {
    fn default() -> Self {
        Self::with_editor(EditorContext::new())
    }
}

impl FloorplanApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let editor = match cc.storage {
            Some(storage) => {
                let mut editor = EditorContext::from_storage(storage);
                if editor.restore_autosave(storage) {
                    info!("Restored auto-saved project '{}'", editor.project_name());
                }
                editor
            }
            None => EditorContext::new(),
        };
        Self::with_editor(editor)
    }

    pub fn with_editor(editor: EditorContext) -> Self {
        Self {
            editor,
            renderer: Renderer::new(),
            draft: None,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn draft(&self) -> Option<egui::Pos2> {
        self.draft
    }

    pub fn set_draft(&mut self, start: Option<egui::Pos2>) {
        self.draft = start;
    }

    /// Dispatch keyboard shortcuts to the editor. Text fields keep their
    /// keys while they have focus.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        for action in ShortcutAction::ALL {
            let Some(shortcut) = self.editor.shortcuts().shortcut(action) else {
                continue;
            };
            if ctx.input_mut(|input| input.consume_shortcut(&shortcut)) {
                self.perform(action);
            }
        }
    }

    pub fn perform(&mut self, action: ShortcutAction) {
        let editor = &mut self.editor;
        match action {
            ShortcutAction::Undo => editor.undo(),
            ShortcutAction::Redo => editor.redo(),
            ShortcutAction::Delete => editor.delete_selected(),
            ShortcutAction::Clone => {
                let ids = editor.selected_ids().to_vec();
                editor.clone_objects(&ids);
            }
            ShortcutAction::ClearSelection => editor.clear_selection(),
            ShortcutAction::SelectTool => editor.set_tool(ToolType::Select),
            ShortcutAction::RectangleTool => editor.set_tool(ToolType::Rectangle),
            ShortcutAction::EllipseTool => editor.set_tool(ToolType::Ellipse),
            ShortcutAction::LineTool => editor.set_tool(ToolType::Line),
            ShortcutAction::ArrowTool => editor.set_tool(ToolType::Arrow),
            ShortcutAction::TextTool => editor.set_tool(ToolType::Text),
        }
    }
}

impl eframe::App for FloorplanApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.editor.persist(storage);
        self.editor.autosave(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        history_panel(self, ctx);
        central_panel(self, ctx);
    }
}
