// ============================================================================
// domain/error.rs - DOMAIN ERROR TAXONOMY
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results carry them after the fact)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Input Errors
    // ========================================================================
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Missing parameter '{name}'")]
    MissingParameter { name: String },

    #[error("Malformed placeholder at byte {offset}: {reason}")]
    MalformedPlaceholder { offset: usize, reason: String },

    #[error("Unsupported project kind '{0}'")]
    UnsupportedKind(String),

    // ========================================================================
    // Manifest Errors
    // ========================================================================
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Duplicate destination in manifest: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { name, .. } => vec![
                format!("'{name}' is not a valid template or category name"),
                "Names must be a single path segment without '..'".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, hyphens, and underscores".into(),
                "Names cannot start with '.' or contain path separators".into(),
                "Examples: my-api, my_tool, service2".into(),
            ],
            Self::MissingParameter { name } => vec![
                format!("The template references '{{{{{name}}}}}' but no value was supplied"),
                "This is a catalog bug if you are using the built-in templates".into(),
            ],
            Self::MalformedPlaceholder { .. } => vec![
                "Placeholders look like {{ Name }} and must be closed".into(),
                "Check the template body near the reported offset".into(),
            ],
            Self::UnsupportedKind(_) => vec![
                "Supported project types:".into(),
                "  • api - Go HTTP API with clean architecture".into(),
                "  • cli - Go command-line application".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. }
            | Self::InvalidProjectName { .. }
            | Self::UnsupportedKind(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::MissingParameter { .. } | Self::MalformedPlaceholder { .. } => {
                ErrorCategory::Template
            }
            Self::InvalidManifest(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
    NotFound,
    Internal,
}
