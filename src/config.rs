//! Configuration management for RAX File Manager
//!
//! Loaded once at startup from `config.toml` with `RAX_FM_*` environment
//! overrides. The root directory is handed to the engine and never changes.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_PATHS: [&str; 2] = [
    "rax-file-manager/config", // Container layout: /app/rax-file-manager/config.toml
    "config",                  // Local development: ./config.toml
];

/// Complete file manager configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ManagerConfig {
    /// Directory every operation is scoped under
    /// Environment: RAX_FM_ROOT_DIRECTORY
    pub root_directory: String,

    /// Create the root at startup if it is missing
    /// Environment: RAX_FM_CREATE_MISSING_ROOT
    pub create_missing_root: bool,

    /// Prompt shown before reading a menu choice
    pub prompt: String,

    /// Longest accepted input line in bytes
    pub max_input_length: usize,
}

impl ManagerConfig {
    /// Load configuration from the first config.toml found, with environment
    /// overrides. Defaults apply when no file exists at all.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = CONFIG_PATHS
            .iter()
            .find(|p| std::path::Path::new(&format!("{p}.toml")).exists())
            .copied()
            .unwrap_or("config");

        Self::load_from(path)
    }

    /// Load configuration from a specific file (extension optional).
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("root_directory", "./fm_root")?
            .set_default("create_missing_root", true)?
            .set_default("prompt", "Enter your choice (1-8): ")?
            .set_default("max_input_length", 4096i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("RAX_FM"))
            .build()?;

        let config: ManagerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.root_directory.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "root_directory cannot be empty".into(),
            ));
        }

        if self.prompt.is_empty() {
            return Err(config::ConfigError::Message("prompt cannot be empty".into()));
        }

        if self.max_input_length == 0 {
            return Err(config::ConfigError::Message(
                "max_input_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get root directory as PathBuf
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root_directory)
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            root_directory: "./fm_root".to_string(),
            create_missing_root: true,
            prompt: "Enter your choice (1-8): ".to_string(),
            max_input_length: 4096,
        }
    }
}
