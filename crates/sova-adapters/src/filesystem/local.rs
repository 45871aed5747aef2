//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use sova_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SovaError, SovaResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir(&self, path: &Path) -> SovaResult<()> {
        std::fs::create_dir(path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                ApplicationError::DirectoryExists {
                    path: path.to_path_buf(),
                }
                .into()
            } else {
                map_io_error(path, e, "create directory")
            }
        })
    }

    fn create_dir_all(&self, path: &Path) -> SovaResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> SovaResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        // A dangling symlink still occupies the name.
        path.symlink_metadata().is_ok()
    }

    fn remove_dir_all(&self, path: &Path) -> SovaResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SovaError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
