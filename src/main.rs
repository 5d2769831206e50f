//! RAX File Manager - Entry Point
//!
//! An interactive console file manager scoped to a single root directory.

use log::{info, warn};
use std::sync::Arc;
use tokio::io::BufReader;

use rax_file_manager::console::run_session;
use rax_file_manager::error::handlers::{error_to_exit_code, handle_error};
use rax_file_manager::{ConsoleError, FileManager, ManagerConfig, RootContext};

async fn run() -> Result<(), ConsoleError> {
    let config = ManagerConfig::load()?;

    if config.create_missing_root {
        if let Err(e) = std::fs::create_dir_all(config.root_path()) {
            warn!("Failed to create root directory: {}", e);
        }
    }

    let root = RootContext::new(config.root_path())?;
    info!("Root directory: {}", root.path().display());

    let engine = Arc::new(FileManager::new(root));
    run_session(
        engine,
        &config,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching file manager...");

    if let Err(e) = run().await {
        handle_error(&e);
        std::process::exit(error_to_exit_code(&e));
    }
}
