use crate::domain::{entities::OutputManifest, error::DomainError};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// A project name becomes both a directory and a Go package-ish identifier.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("project name cannot be empty"));
        }
        if name.starts_with('.') {
            return Err(invalid("project name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("project name cannot contain path separators"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(invalid(&format!(
                "invalid character {c:?}; use letters, digits, '-' or '_'"
            )));
        }
        Ok(())
    }

    /// Module paths go verbatim into `go.mod` and import lines.
    pub fn validate_module_path(path: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidName {
            name: path.to_string(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("module path cannot be empty"));
        }
        if path.starts_with('/') || path.ends_with('/') {
            return Err(invalid("module path cannot start or end with '/'"));
        }
        if path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
            return Err(invalid("module path has an empty or relative segment"));
        }
        if path
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '`' | '\\' | '{' | '}'))
        {
            return Err(invalid("module path contains forbidden characters"));
        }
        Ok(())
    }

    /// `1.22` or `1.22.3`.
    pub fn validate_go_version(version: &str) -> Result<(), DomainError> {
        let parts: Vec<&str> = version.split('.').collect();
        let well_formed = (2..=3).contains(&parts.len())
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
        if well_formed {
            Ok(())
        } else {
            Err(DomainError::InvalidName {
                name: version.to_string(),
                reason: "Go version must look like 1.22 or 1.22.3".into(),
            })
        }
    }

    pub fn validate_manifest(manifest: &OutputManifest) -> Result<(), DomainError> {
        manifest.validate()
    }
}
