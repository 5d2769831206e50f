//! Path validation
//!
//! Resolves caller-supplied names against the root directory and rejects
//! anything that would land outside of it.

use log::warn;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Immutable root every operation is scoped under.
#[derive(Debug, Clone)]
pub struct RootContext {
    root: PathBuf,
}

impl RootContext {
    /// Builds a context from a root path, made absolute against the current
    /// directory. The directory itself does not have to exist yet.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath("Empty root directory".into()));
        }

        let root = std::path::absolute(root)
            .map_err(|e| StorageError::filesystem(root.display().to_string(), e))?;

        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolves `name` to a path under root. The root itself is allowed.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let relative = normalize_name(name)?;
        if relative.as_os_str().is_empty() {
            return Ok(self.root.clone());
        }

        let path = self.root.join(&relative);
        self.check_containment(name, &path)?;
        Ok(path)
    }

    /// Resolves `name` to a path strictly below root.
    pub fn resolve_entry(&self, name: &str) -> Result<PathBuf, StorageError> {
        let relative = normalize_name(name)?;
        if relative.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath(format!(
                "{} refers to the root directory",
                name
            )));
        }

        let path = self.root.join(&relative);
        self.check_containment(name, &path)?;
        Ok(path)
    }

    /// Canonicalizes the nearest existing ancestor of the entry's parent and
    /// verifies it is still inside the canonical root. The entry itself is not
    /// followed, so a symlink can be renamed or removed in place.
    fn check_containment(&self, name: &str, path: &Path) -> Result<(), StorageError> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };

        let real_parent = self.real_path(name, parent)?;
        self.ensure_under_root(name, &real_parent)
    }

    /// Where `path` really lives once every symlink is followed: the nearest
    /// existing ancestor is canonicalized and the missing tail is appended.
    pub fn real_path(&self, name: &str, path: &Path) -> Result<PathBuf, StorageError> {
        let Some(existing) = path
            .ancestors()
            .find(|ancestor| fs::symlink_metadata(ancestor).is_ok())
        else {
            return Ok(path.to_path_buf());
        };

        let canonical = fs::canonicalize(existing)
            .map_err(|e| StorageError::filesystem(name.to_string(), e))?;

        match path.strip_prefix(existing) {
            Ok(tail) if !tail.as_os_str().is_empty() => Ok(canonical.join(tail)),
            _ => Ok(canonical),
        }
    }

    /// Follows `path` to its real location and fails with `PathTraversal`
    /// when that lies outside the root. Returns the real location.
    pub fn resolve_target(&self, name: &str, path: &Path) -> Result<PathBuf, StorageError> {
        let real = self.real_path(name, path)?;
        self.ensure_under_root(name, &real)?;
        Ok(real)
    }

    fn ensure_under_root(&self, name: &str, real: &Path) -> Result<(), StorageError> {
        let canonical_root = fs::canonicalize(&self.root)
            .map_err(|e| StorageError::filesystem(self.root.display().to_string(), e))?;

        if !real.starts_with(&canonical_root) {
            warn!(
                "Rejected {}: resolves to {} outside root {}",
                name,
                real.display(),
                canonical_root.display()
            );
            return Err(StorageError::PathTraversal(name.to_string()));
        }

        Ok(())
    }
}

/// Lexically normalizes a caller-supplied name into a relative path.
///
/// Absolute names, drive prefixes, and `..` segments that climb above the
/// root are rejected. `.` segments are dropped.
pub fn normalize_name(name: &str) -> Result<PathBuf, StorageError> {
    if name.trim().is_empty() {
        return Err(StorageError::InvalidPath("Empty name".into()));
    }
    if name.contains('\0') {
        return Err(StorageError::InvalidPath(format!("{:?} contains NUL", name)));
    }

    let mut relative = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                return Err(StorageError::PathTraversal(name.to_string()));
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(StorageError::PathTraversal(name.to_string()));
                }
            }
            Component::Normal(part) => relative.push(part),
        }
    }

    Ok(relative)
}
