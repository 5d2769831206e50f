//! Interactive console
//!
//! Menu parsing, command dispatch, and the session loop driving the engine.

pub mod commands;
pub mod handlers;
pub mod session;

pub use commands::{Command, MenuChoice, parse_choice};
pub use handlers::{CommandResult, CommandStatus, handle_command};
pub use session::run_session;
