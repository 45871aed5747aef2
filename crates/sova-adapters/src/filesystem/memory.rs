//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use sova_core::{
    application::{ApplicationError, ports::Filesystem},
    error::SovaResult,
};

/// In-memory filesystem.
///
/// Clones share the same tree, so a test can hand one clone to a service and
/// inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    /// Writes to these paths fail.
    read_only: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write under `path` fail (testing helper).
    pub fn deny_writes_under(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.insert(path.into());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All directories, sorted.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        self.read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> SovaResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> SovaResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

impl MemoryFilesystemInner {
    fn has_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || path == Path::new("/") || self.directories.contains(path)
    }

    fn insert_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir(&self, path: &Path) -> SovaResult<()> {
        let mut inner = self.write()?;

        if inner.files.contains_key(path) || inner.directories.contains(path) {
            return Err(ApplicationError::DirectoryExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        if let Some(parent) = path.parent() {
            if !inner.has_dir(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> SovaResult<()> {
        let mut inner = self.write()?;
        inner.insert_dir_all(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> SovaResult<()> {
        let mut inner = self.write()?;

        if inner.read_only.iter().any(|ro| path.starts_with(ro)) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "Permission denied".into(),
            }
            .into());
        }

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !inner.has_dir(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> SovaResult<()> {
        let mut inner = self.write()?;

        if !inner.directories.contains(path) {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such directory".into(),
            }
            .into());
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_needs_parent_and_refuses_existing() {
        let fs = MemoryFilesystem::new();
        assert!(fs.create_dir(Path::new("a/b")).is_err());

        fs.create_dir(Path::new("a")).unwrap();
        fs.create_dir(Path::new("a/b")).unwrap();
        assert!(matches!(
            fs.create_dir(Path::new("a")),
            Err(sova_core::error::SovaError::Application(
                ApplicationError::DirectoryExists { .. }
            ))
        ));
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("demo/main.go"), "x").is_err());

        fs.create_dir_all(Path::new("demo")).unwrap();
        fs.write_file(Path::new("demo/main.go"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("demo/main.go")).as_deref(), Some("x"));
        assert!(fs.exists(Path::new("demo/main.go")));
    }

    #[test]
    fn remove_dir_all_drops_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("demo/cmd")).unwrap();
        fs.create_dir_all(Path::new("other")).unwrap();
        fs.write_file(Path::new("demo/cmd/root.go"), "").unwrap();

        fs.remove_dir_all(Path::new("demo")).unwrap();

        assert!(!fs.exists(Path::new("demo")));
        assert!(!fs.exists(Path::new("demo/cmd/root.go")));
        assert!(fs.exists(Path::new("other")));
    }

    #[test]
    fn denied_writes_fail() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("demo/cmd")).unwrap();
        fs.deny_writes_under("demo/cmd");

        assert!(fs.write_file(Path::new("demo/main.go"), "").is_ok());
        assert!(fs.write_file(Path::new("demo/cmd/root.go"), "").is_err());
    }
}
