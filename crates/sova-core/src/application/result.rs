//! Outcome of one generation run.
//!
//! A [`GenerationResult`] is returned on success *and* on failure, so the
//! caller can always report what actually reached the disk.
//!
//! ```text
//! Unstarted ──► DirectoryCreated ──► FilesWritten(n) ──► Complete
//!     │                │                   │
//!     └────────────────┴───────────────────┴──► Failed { at }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::application::ApplicationError;
use crate::error::{SovaError, SovaResult};

/// Progress of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationState {
    Unstarted,
    DirectoryCreated,
    FilesWritten { count: usize },
    Complete,
    /// `at` is the 1-indexed mapping that failed, or `None` when the run
    /// failed before any mapping was attempted.
    Failed { at: Option<usize> },
}

impl GenerationState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed { .. })
    }
}

impl fmt::Display for GenerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unstarted => f.write_str("unstarted"),
            Self::DirectoryCreated => f.write_str("directory created"),
            Self::FilesWritten { count } => write!(f, "{count} file(s) written"),
            Self::Complete => f.write_str("complete"),
            Self::Failed { at: Some(k) } => write!(f, "failed at file {k}"),
            Self::Failed { at: None } => f.write_str("failed before writing files"),
        }
    }
}

/// Files and directories produced by a run, plus any error.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    root: PathBuf,
    directories: Vec<PathBuf>,
    files: Vec<PathBuf>,
    state: GenerationState,
    error: Option<SovaError>,
    rolled_back: bool,
    rollback_error: Option<ApplicationError>,
}

impl GenerationResult {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            directories: Vec::new(),
            files: Vec::new(),
            state: GenerationState::Unstarted,
            error: None,
            rolled_back: false,
            rollback_error: None,
        }
    }

    // ── transitions (driven by the generation service) ───────────────────

    pub(crate) fn root_created(&mut self) {
        self.state = GenerationState::DirectoryCreated;
    }

    pub(crate) fn directory_created(&mut self, path: PathBuf) {
        self.directories.push(path);
    }

    pub(crate) fn file_written(&mut self, path: PathBuf) {
        self.files.push(path);
        self.state = GenerationState::FilesWritten {
            count: self.files.len(),
        };
    }

    pub(crate) fn complete(&mut self) {
        self.state = GenerationState::Complete;
    }

    pub(crate) fn fail(&mut self, at: Option<usize>, error: SovaError) {
        self.state = GenerationState::Failed { at };
        self.error = Some(error);
    }

    /// Record that the partial tree was removed; nothing is left on disk.
    pub(crate) fn rolled_back(&mut self) {
        self.rolled_back = true;
        self.files.clear();
        self.directories.clear();
    }

    /// Record a failed cleanup. The original error stays in `error`.
    pub(crate) fn rollback_failed(&mut self, error: ApplicationError) {
        self.rollback_error = Some(error);
    }

    // ── accessors ────────────────────────────────────────────────────────

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files written, in manifest order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Manifest directories created under the root, in declared order.
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn error(&self) -> Option<&SovaError> {
        self.error.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.state == GenerationState::Complete
    }

    pub fn was_rolled_back(&self) -> bool {
        self.rolled_back
    }

    pub fn rollback_error(&self) -> Option<&ApplicationError> {
        self.rollback_error.as_ref()
    }

    /// Convert into a `Result`, keeping the report on success.
    pub fn into_result(self) -> SovaResult<Self> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Serializable view for machine-readable output.
    pub fn summary(&self) -> GenerationSummary {
        GenerationSummary {
            root: self.root.display().to_string(),
            state: self.state,
            directories: self.directories.iter().map(|p| p.display().to_string()).collect(),
            files: self.files.iter().map(|p| p.display().to_string()).collect(),
            rolled_back: self.rolled_back,
            error: self.error.as_ref().map(ToString::to_string),
            rollback_error: self.rollback_error.as_ref().map(ToString::to_string),
        }
    }
}

/// Plain-data form of a [`GenerationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub root: String,
    #[serde(flatten)]
    pub state: GenerationState,
    pub directories: Vec<String>,
    pub files: Vec<String>,
    pub rolled_back: bool,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollback_error: Option<String>,
}
