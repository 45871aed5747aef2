//! Unified error handling for Sova Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Sova Core operations.
///
/// This enum wraps all possible errors that can occur when using sova-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SovaError {
    /// Errors from the domain layer (input and catalog rule violations).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (resolution and I/O failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SovaError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Sova".into(),
                "Please report this issue at: https://github.com/go-sova/sova/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Template => ErrorCategory::Template,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether this error was raised before anything touched the disk.
    pub fn is_pre_mutation(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::InvalidName { .. })
                | Self::Domain(DomainError::InvalidProjectName { .. })
                | Self::Application(ApplicationError::DirectoryExists { .. })
                | Self::Application(ApplicationError::UnknownCategory { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SovaResult<T> = Result<T, SovaError>;
