mod central_panel;
mod history_panel;
mod tools_panel;

pub use central_panel::{central_panel, create_from_drag};
pub use history_panel::history_panel;
pub use tools_panel::tools_panel;
