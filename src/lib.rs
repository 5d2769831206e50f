pub mod config;
pub mod console;
pub mod error;
pub mod storage;

pub use config::ManagerConfig;
pub use error::{ConsoleError, StorageError};
pub use storage::{FileManager, RootContext};
