mod commands;
mod history;

pub use crate::error::{CommandError, CommandResult};
pub use commands::Command;
pub use history::UndoManager;
