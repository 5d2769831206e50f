//! File system traversal
//!
//! Lazy iterators over a directory (one level) and over a whole subtree.
//! Each iterator reads the filesystem as it advances and cannot be rewound.

use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::storage::results::DirectoryEntry;

fn read_dir(dir: &Path) -> Result<fs::ReadDir, StorageError> {
    fs::read_dir(dir).map_err(|e| StorageError::filesystem(dir.display().to_string(), e))
}

/// Immediate children of a directory, unfiltered.
#[derive(Debug)]
pub struct Entries {
    dir: PathBuf,
    inner: fs::ReadDir,
}

impl Entries {
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            inner: read_dir(dir)?,
            dir: dir.to_path_buf(),
        })
    }
}

impl Iterator for Entries {
    type Item = Result<DirectoryEntry, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        Some(
            entry
                .map(|e| DirectoryEntry::from_path(e.path()))
                .map_err(|e| StorageError::filesystem(self.dir.display().to_string(), e)),
        )
    }
}

/// Pre-order walk of every entry below a directory.
///
/// Real subdirectories are descended; directory symlinks are reported but
/// never entered. A subdirectory that cannot be opened is yielded as an
/// `Err` right after its own entry and the walk moves on.
#[derive(Debug)]
pub struct Walk {
    stack: Vec<(PathBuf, fs::ReadDir)>,
    pending: Option<StorageError>,
}

impl Walk {
    pub fn new(dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            stack: vec![(dir.to_path_buf(), read_dir(dir)?)],
            pending: None,
        })
    }
}

impl Iterator for Walk {
    type Item = Result<fs::DirEntry, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            return Some(Err(err));
        }

        loop {
            let next = {
                let (dir, read_dir) = self.stack.last_mut()?;
                read_dir.next().map(|entry| {
                    entry.map_err(|e| StorageError::filesystem(dir.display().to_string(), e))
                })
            };

            let entry = match next {
                None => {
                    self.stack.pop();
                    continue;
                }
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(entry)) => entry,
            };

            // file_type() does not follow symlinks
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                let path = entry.path();
                match read_dir(&path) {
                    Ok(children) => self.stack.push((path, children)),
                    Err(e) => {
                        debug!("Cannot descend into {}: {}", path.display(), e);
                        self.pending = Some(e);
                    }
                }
            }

            return Some(Ok(entry));
        }
    }
}

/// Regular files below a directory whose name ends with a mask.
#[derive(Debug)]
pub struct MaskSearch {
    walk: Walk,
    mask: String,
}

impl MaskSearch {
    pub fn new(dir: &Path, mask: &str) -> Result<Self, StorageError> {
        Ok(Self {
            walk: Walk::new(dir)?,
            mask: mask.to_string(),
        })
    }
}

impl Iterator for MaskSearch {
    type Item = Result<PathBuf, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walk.next()? {
                Err(e) => return Some(Err(e)),
                Ok(entry) => {
                    if matches_mask(&entry.file_name(), &self.mask) && is_regular_file(&entry) {
                        return Some(Ok(entry.path()));
                    }
                }
            }
        }
    }
}

/// Case-sensitive suffix match on the raw file name. An empty mask matches
/// every name.
pub fn matches_mask(file_name: &OsStr, mask: &str) -> bool {
    file_name.as_encoded_bytes().ends_with(mask.as_bytes())
}

/// True for regular files and for symlinks whose target is a regular file.
pub fn is_regular_file(entry: &fs::DirEntry) -> bool {
    match entry.file_type() {
        Ok(t) if t.is_file() => true,
        Ok(t) if t.is_symlink() => fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn build_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir_all(dir.path().join("x/y")).unwrap();
        fs::write(dir.path().join("x/b.txt"), b"bb").unwrap();
        fs::write(dir.path().join("x/y/c.md"), b"ccc").unwrap();
        dir
    }

    #[test]
    fn test_matches_mask() {
        assert!(matches_mask(OsStr::new("report.txt"), ".txt"));
        assert!(!matches_mask(OsStr::new("report.TXT"), ".txt"));
        assert!(!matches_mask(OsStr::new("txt"), ".txt"));
        assert!(matches_mask(OsStr::new("anything"), ""));
    }

    #[test]
    fn test_walk_visits_whole_tree() {
        let dir = build_tree();
        let seen: HashSet<PathBuf> = Walk::new(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path().strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        let expected: HashSet<PathBuf> = ["a.txt", "x", "x/b.txt", "x/y", "x/y/c.md"]
            .iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_walk_is_pre_order() {
        let dir = build_tree();
        let order: Vec<PathBuf> = Walk::new(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();

        let pos = |p: &Path| order.iter().position(|o| o == p).unwrap();
        assert!(pos(&dir.path().join("x")) < pos(&dir.path().join("x/y")));
        assert!(pos(&dir.path().join("x/y")) < pos(&dir.path().join("x/y/c.md")));
    }

    #[test]
    fn test_entries_is_one_level() {
        let dir = build_tree();
        let names: HashSet<String> = Entries::new(dir.path())
            .unwrap()
            .map(|e| e.unwrap().name())
            .collect();
        assert_eq!(names, HashSet::from(["a.txt".to_string(), "x".to_string()]));
    }

    #[test]
    fn test_walk_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Walk::new(&dir.path().join("missing")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_enter_directory_symlinks() {
        let dir = build_tree();
        std::os::unix::fs::symlink(dir.path().join("x"), dir.path().join("loop")).unwrap();

        let hits: Vec<PathBuf> = MaskSearch::new(dir.path(), ".txt")
            .unwrap()
            .map(|p| p.unwrap())
            .collect();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|p| !p.starts_with(dir.path().join("loop"))));
    }
}
