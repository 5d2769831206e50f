//! Command handlers
//!
//! Runs a parsed command against the engine and turns the outcome into the
//! text shown to the user. A failed command never stops the session.

use log::{info, warn};
use std::fmt::Write;

use crate::console::commands::Command;
use crate::error::StorageError;
use crate::storage::{DirectoryEntry, EntryKind, FileManager};

/// Represents the outcome status of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    Exit,
}

/// Status plus the text to print.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: String,
}

impl CommandResult {
    fn success(message: String) -> Self {
        Self {
            status: CommandStatus::Success,
            message,
        }
    }

    fn failure(err: &StorageError, message: String) -> Self {
        warn!("{}", err);
        Self {
            status: CommandStatus::Failure(err.to_string()),
            message,
        }
    }
}

/// Dispatches a command to its handler.
pub fn handle_command(engine: &FileManager, command: &Command) -> CommandResult {
    match command {
        Command::List => handle_list(engine),
        Command::CreateFolder(name) => handle_create(engine, name),
        Command::Delete(name) => handle_delete(engine, name),
        Command::Rename { from, to } => handle_rename(engine, from, to),
        Command::Copy { from, to } => handle_copy(engine, from, to),
        Command::Size(name) => handle_size(engine, name),
        Command::Search(mask) => handle_search(engine, mask),
        Command::Exit => CommandResult {
            status: CommandStatus::Exit,
            message: "Exiting File Manager.\n".into(),
        },
    }
}

fn format_entry(entry: &DirectoryEntry) -> String {
    match entry.kind {
        EntryKind::Directory => format!("  {}/\n", entry.name()),
        EntryKind::File => format!("  {} ({} bytes)\n", entry.name(), entry.size),
        EntryKind::Other => format!("  {} [other]\n", entry.name()),
    }
}

fn handle_list(engine: &FileManager) -> CommandResult {
    let entries = match engine.list_entries() {
        Ok(entries) => entries,
        Err(e) => {
            let message = format!("Failed to show disk content. Error: {}\n", e);
            return CommandResult::failure(&e, message);
        }
    };

    let mut message = format!("Contents of {}:\n", engine.root().display());
    let mut count = 0usize;
    for entry in entries {
        match entry {
            Ok(entry) => {
                message.push_str(&format_entry(&entry));
                count += 1;
            }
            Err(e) => {
                let _ = writeln!(message, "  ! {}", e);
            }
        }
    }
    let _ = writeln!(message, "{} entries", count);

    info!("Listed {} entries", count);
    CommandResult::success(message)
}

fn handle_create(engine: &FileManager, name: &str) -> CommandResult {
    match engine.create_directory(name) {
        Ok(true) => CommandResult::success("Folder created successfully.\n".into()),
        Ok(false) => CommandResult {
            status: CommandStatus::Failure(format!("{} exists or parent is missing", name)),
            message: "Failed to create folder: it already exists or its parent is missing.\n"
                .into(),
        },
        Err(e) => {
            let message = format!("Failed to create folder. Error: {}\n", e);
            CommandResult::failure(&e, message)
        }
    }
}

fn handle_delete(engine: &FileManager, name: &str) -> CommandResult {
    match engine.delete_entry(name) {
        Ok(0) => CommandResult::success(format!("Nothing to delete: {} does not exist.\n", name)),
        Ok(count) => CommandResult::success(format!(
            "Item deleted successfully ({} items removed).\n",
            count
        )),
        Err(e) => {
            let message = format!("Failed to delete item. Error: {}\n", e);
            CommandResult::failure(&e, message)
        }
    }
}

fn handle_rename(engine: &FileManager, from: &str, to: &str) -> CommandResult {
    match engine.rename_entry(from, to) {
        Ok(()) => CommandResult::success("Item renamed successfully.\n".into()),
        Err(e) => {
            let message = format!("Failed to rename item. Error: {}\n", e);
            CommandResult::failure(&e, message)
        }
    }
}

fn handle_copy(engine: &FileManager, from: &str, to: &str) -> CommandResult {
    match engine.copy_entry(from, to) {
        Ok(summary) => {
            let mut message = format!(
                "Item copied successfully ({} files, {} bytes).\n",
                summary.files, summary.bytes
            );
            if summary.skipped > 0 {
                let _ = writeln!(message, "{} entries skipped.", summary.skipped);
            }
            CommandResult::success(message)
        }
        Err(e) => {
            let message = format!("Failed to copy item. Error: {}\n", e);
            CommandResult::failure(&e, message)
        }
    }
}

fn handle_size(engine: &FileManager, name: &str) -> CommandResult {
    match engine.get_size(name) {
        Ok(size) => CommandResult::success(format!("Size of {}: {} bytes\n", name, size)),
        Err(e) => {
            let message = format!("Failed to get size of item. Error: {}\n", e);
            CommandResult::failure(&e, message)
        }
    }
}

fn handle_search(engine: &FileManager, mask: &str) -> CommandResult {
    let matches = match engine.search_by_mask(mask) {
        Ok(matches) => matches,
        Err(e) => {
            let message = format!("Failed to search files. Error: {}\n", e);
            return CommandResult::failure(&e, message);
        }
    };

    let mut message = String::new();
    let mut found = 0usize;
    for hit in matches {
        match hit {
            Ok(path) => {
                let _ = writeln!(message, "{}", path.display());
                found += 1;
            }
            Err(e) => {
                let _ = writeln!(message, "  ! {}", e);
            }
        }
    }
    let _ = writeln!(message, "{} files found", found);

    CommandResult::success(message)
}
