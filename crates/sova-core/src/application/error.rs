//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur while resolving templates or writing a project.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The requested category does not exist in the store.
    #[error("Unknown template category '{category}'")]
    UnknownCategory { category: String },

    /// The category exists but has no template with this name.
    #[error("Template '{name}' not found in category '{category}'")]
    TemplateNotFound { category: String, name: String },

    /// The project root already exists; nothing was written.
    #[error("Directory {path} already exists")]
    DirectoryExists { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A template body could not be rendered.
    #[error("Failed to render template '{template}': {source}")]
    RenderFailed {
        template: String,
        #[source]
        source: DomainError,
    },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// Best-effort cleanup of a partial tree failed.
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownCategory { category } => vec![
                format!("No templates exist for '{category}'"),
                "Try: sova list to see available project types".into(),
            ],
            Self::TemplateNotFound { category, name } => vec![
                format!("The '{category}' catalog has no '{name}'"),
                "If you use --templates, check that the directory is complete".into(),
            ],
            Self::DirectoryExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Sova never writes into an existing directory".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
                "Remove the partial project before retrying".into(),
            ],
            Self::RenderFailed { template, source } => {
                let mut hints = vec![format!("Check the template '{template}'")];
                hints.extend(source.suggestions());
                hints
            }
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![
                format!("Remove the partial project manually: {}", path.display()),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownCategory { .. } | Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::DirectoryExists { .. } => ErrorCategory::Validation,
            Self::RenderFailed { .. } => ErrorCategory::Template,
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
