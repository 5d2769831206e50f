//! Storage operations
//!
//! The file operations engine: enumeration, masked search, and the mutating
//! operations (create, delete, rename, copy, size), all scoped under one root.

use log::{error, info, warn};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::StorageError;
use crate::storage::filesystem::{Entries, MaskSearch, Walk};
use crate::storage::results::CopySummary;
use crate::storage::validation::RootContext;

/// Performs filesystem requests by name relative to its root.
///
/// Holds nothing but the immutable root, so every call re-reads the
/// filesystem and calls are independent of each other.
#[derive(Debug, Clone)]
pub struct FileManager {
    root: RootContext,
}

impl FileManager {
    pub fn new(root: RootContext) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Lists the immediate children of the root.
    pub fn list_entries(&self) -> Result<Entries, StorageError> {
        Entries::new(self.root.path()).inspect_err(|e| {
            error!("Failed to list {}: {}", self.root.path().display(), e);
        })
    }

    /// Creates a single directory. Returns `false` when the entry already
    /// exists or its parent is missing.
    pub fn create_directory(&self, name: &str) -> Result<bool, StorageError> {
        let path = self.root.resolve_entry(name)?;

        match fs::create_dir(&path) {
            Ok(()) => {
                info!("Created directory {} (real: {})", name, path.display());
                Ok(true)
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::NotFound
                ) =>
            {
                info!("Directory {} not created: {}", name, e);
                Ok(false)
            }
            Err(e) => {
                error!("Failed to create directory {} (real: {}): {}", name, path.display(), e);
                Err(StorageError::filesystem(name, e))
            }
        }
    }

    /// Removes a file, symlink, or whole directory tree. Returns how many
    /// objects were removed; a missing entry yields 0.
    pub fn delete_entry(&self, name: &str) -> Result<u64, StorageError> {
        let path = self.root.resolve_entry(name)?;

        let metadata = match fs::symlink_metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Nothing to delete at {} (real: {})", name, path.display());
                return Ok(0);
            }
            Err(e) => return Err(StorageError::filesystem(name, e)),
        };

        let removed = if metadata.is_dir() {
            let mut count = 1u64;
            for entry in Walk::new(&path)? {
                if entry.is_ok() {
                    count += 1;
                }
            }
            fs::remove_dir_all(&path).map(|_| count)
        } else {
            fs::remove_file(&path).map(|_| 1)
        };

        match removed {
            Ok(count) => {
                info!("Deleted {} (real: {}) - {} items", name, path.display(), count);
                Ok(count)
            }
            Err(e) => {
                error!("Failed to delete {} (real: {}): {}", name, path.display(), e);
                Err(StorageError::filesystem(name, e))
            }
        }
    }

    /// Moves `old_name` to `new_name` with a single rename call. A failure
    /// across devices is reported, never emulated with copy and delete.
    pub fn rename_entry(&self, old_name: &str, new_name: &str) -> Result<(), StorageError> {
        let old_path = self.root.resolve_entry(old_name)?;
        let new_path = self.root.resolve_entry(new_name)?;

        fs::rename(&old_path, &new_path).map_err(|e| {
            error!(
                "Failed to rename {} to {} (real: {} -> {}): {}",
                old_name,
                new_name,
                old_path.display(),
                new_path.display(),
                e
            );
            StorageError::filesystem(format!("{} -> {}", old_name, new_name), e)
        })?;

        info!(
            "Renamed {} to {} (real: {} -> {})",
            old_name,
            new_name,
            old_path.display(),
            new_path.display()
        );
        Ok(())
    }

    /// Copies a file, or a directory with its whole subtree. The destination
    /// must not exist. A symlinked source is followed but must resolve inside
    /// the root, and the destination may not land inside the real source.
    pub fn copy_entry(&self, source: &str, destination: &str) -> Result<CopySummary, StorageError> {
        let src = self.root.resolve_entry(source)?;
        let dst = self.root.resolve_entry(destination)?;

        let metadata = fs::metadata(&src).map_err(|e| StorageError::filesystem(source, e))?;
        let real_src = self.root.resolve_target(source, &src)?;

        if fs::symlink_metadata(&dst).is_ok() {
            return Err(StorageError::filesystem(
                destination,
                io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
            ));
        }

        let result = if metadata.is_dir() {
            let real_dst = self.root.real_path(destination, &dst)?;
            if real_dst.starts_with(&real_src) {
                return Err(StorageError::InvalidPath(format!(
                    "cannot copy {} into itself ({})",
                    source, destination
                )));
            }
            copy_tree(&src, &dst)
        } else {
            fs::copy(&src, &dst)
                .map(|bytes| CopySummary {
                    files: 1,
                    bytes,
                    ..CopySummary::default()
                })
                .map_err(|e| StorageError::filesystem(source, e))
        };

        match &result {
            Ok(summary) => info!(
                "Copied {} to {} (real: {} -> {}) - {} files, {} directories, {} bytes",
                source,
                destination,
                src.display(),
                dst.display(),
                summary.files,
                summary.directories,
                summary.bytes
            ),
            Err(e) => error!("Failed to copy {} to {}: {}", source, destination, e),
        }

        result
    }

    /// Byte length of a file, or the summed length of every regular file
    /// below a directory. A symlinked entry must resolve inside the root.
    pub fn get_size(&self, name: &str) -> Result<u64, StorageError> {
        let path = self.root.resolve(name)?;
        let metadata = fs::metadata(&path).map_err(|e| StorageError::filesystem(name, e))?;
        self.root.resolve_target(name, &path)?;

        if !metadata.is_dir() {
            return Ok(metadata.len());
        }

        let mut total = 0u64;
        for entry in Walk::new(&path)? {
            let entry = entry?;
            let file_type = entry
                .file_type()
                .map_err(|e| StorageError::filesystem(entry.path().display().to_string(), e))?;
            if file_type.is_file() {
                let len = entry
                    .metadata()
                    .map_err(|e| StorageError::filesystem(entry.path().display().to_string(), e))?
                    .len();
                total += len;
            }
        }

        info!("Size of {} (real: {}): {} bytes", name, path.display(), total);
        Ok(total)
    }

    /// Every regular file below the root whose name ends with `mask`.
    pub fn search_by_mask(&self, mask: &str) -> Result<MaskSearch, StorageError> {
        info!("Searching {} for *{}", self.root.path().display(), mask);
        MaskSearch::new(self.root.path(), mask)
    }
}

/// Recreates `src` at `dst`, walking the source tree in pre-order so every
/// parent exists before its children.
fn copy_tree(src: &Path, dst: &Path) -> Result<CopySummary, StorageError> {
    let target_err = |p: &Path, e: io::Error| StorageError::filesystem(p.display().to_string(), e);

    fs::create_dir(dst).map_err(|e| target_err(dst, e))?;
    let mut summary = CopySummary {
        directories: 1,
        ..CopySummary::default()
    };

    for entry in Walk::new(src)? {
        let entry = entry?;
        let from = entry.path();
        let Ok(relative) = from.strip_prefix(src) else {
            continue;
        };
        let to = dst.join(relative);

        let file_type = entry.file_type().map_err(|e| target_err(&from, e))?;
        if file_type.is_dir() {
            fs::create_dir(&to).map_err(|e| target_err(&to, e))?;
            summary.directories += 1;
            continue;
        }

        let is_file = file_type.is_file()
            || (file_type.is_symlink()
                && fs::metadata(&from).map(|m| m.is_file()).unwrap_or(false));

        if is_file {
            summary.bytes += fs::copy(&from, &to).map_err(|e| target_err(&from, e))?;
            summary.files += 1;
        } else {
            warn!("Skipping {}: not a regular file or directory", from.display());
            summary.skipped += 1;
        }
    }

    Ok(summary)
}
