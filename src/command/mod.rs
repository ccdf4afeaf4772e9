mod commands;
mod history;

pub use commands::{Applied, Command};
pub use history::{History, MAX_LOG_ENTRIES};
