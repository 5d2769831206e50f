//! File system storage management
//!
//! Root-scoped filesystem operations, traversal, and path validation.

pub mod filesystem;
pub mod operations;
pub mod results;
pub mod validation;

pub use filesystem::{Entries, MaskSearch, Walk};
pub use operations::FileManager;
pub use results::{CopySummary, DirectoryEntry, EntryKind};
pub use validation::RootContext;
