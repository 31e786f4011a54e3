pub mod import_commands;
pub mod sync_commands;
