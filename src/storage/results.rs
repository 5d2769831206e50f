//! Storage result types
//!
//! Defines result structures returned by storage operations.

use std::fs;
use std::path::PathBuf;

/// What kind of filesystem object an entry is, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

impl EntryKind {
    /// Classifies followed metadata. Broken links (`None`) and special
    /// files are `Other`.
    pub fn from_metadata(metadata: Option<&fs::Metadata>) -> Self {
        match metadata {
            Some(m) if m.is_file() => EntryKind::File,
            Some(m) if m.is_dir() => EntryKind::Directory,
            _ => EntryKind::Other,
        }
    }
}

/// A single item produced by enumeration. Only lives as long as the caller
/// keeps it; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Byte length for regular files, 0 otherwise.
    pub size: u64,
}

impl DirectoryEntry {
    pub fn from_path(path: PathBuf) -> Self {
        let metadata = fs::metadata(&path).ok();
        let kind = EntryKind::from_metadata(metadata.as_ref());
        let size = match (&metadata, kind) {
            (Some(m), EntryKind::File) => m.len(),
            _ => 0,
        };
        Self { path, kind, size }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Final path component, lossily converted for display.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Result of a copy operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySummary {
    pub files: u64,
    pub directories: u64,
    pub bytes: u64,
    /// Directory symlinks and special files that were not copied.
    pub skipped: u64,
}
