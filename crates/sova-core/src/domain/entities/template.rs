//! Template identity: categories, names, references, and resolved bodies.
//!
//! ## Model
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ TemplateRef                                  │
//! │ ├── TemplateCategory   "cli"                 │
//! │ └── TemplateName       "main.tpl"            │
//! ├──────────────────────────────────────────────┤
//! │ ResolvedTemplate  (returned by a store)      │
//! │ ├── reference          cli/main.tpl          │
//! │ ├── location           <root>/cli/main.tpl   │
//! │ └── body               "package main ..."    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Categories and names are validated at construction, so a store never sees
//! a traversal attempt: `TemplateName::new("../../etc/passwd")` fails before
//! any path is built.

use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Canonical entry file every category must contain.
pub const CANONICAL_ENTRY: &str = "main.tpl";

/// Validate one store path segment.
fn validate_segment(value: &str, what: &str) -> Result<(), DomainError> {
    let reject = |reason: &str| {
        Err(DomainError::InvalidName {
            name: value.to_string(),
            reason: format!("{what} {reason}"),
        })
    };

    if value.trim().is_empty() {
        return reject("cannot be empty");
    }
    if value.contains("..") {
        return reject("contains path traversal");
    }
    if value.trim() == "." {
        return reject("cannot name the current directory");
    }
    if value.contains('/') || value.contains('\\') {
        return reject("cannot contain path separators");
    }
    if value.contains('\0') {
        return reject("cannot contain NUL bytes");
    }
    if value.starts_with('~') || value.contains(':') {
        return reject("cannot name a drive or home directory");
    }
    Ok(())
}

// ── TemplateCategory ─────────────────────────────────────────────────────────

/// A logical group of templates, one per project kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TemplateCategory(String);

impl TemplateCategory {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        validate_segment(&value, "category")?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── TemplateName ─────────────────────────────────────────────────────────────

/// A filename-like identifier scoped to a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        validate_segment(&value, "template name")?;
        Ok(Self(value))
    }

    /// The canonical entry file that decides whether a category exists.
    pub fn canonical_entry() -> Self {
        Self(CANONICAL_ENTRY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── TemplateRef ──────────────────────────────────────────────────────────────

/// A `(category, name)` pair pointing at one template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TemplateRef {
    pub category: TemplateCategory,
    pub name: TemplateName,
}

impl TemplateRef {
    pub fn new(category: TemplateCategory, name: TemplateName) -> Self {
        Self { category, name }
    }

    /// Parse and validate both halves.
    pub fn parse(category: &str, name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            category: TemplateCategory::new(category)?,
            name: TemplateName::new(name)?,
        })
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

// ── ResolvedTemplate ─────────────────────────────────────────────────────────

/// A template located by a store, with its body loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub reference: TemplateRef,
    /// Where the body came from: a filesystem path, or `builtin:<ref>`.
    pub location: String,
    pub body: String,
}

impl ResolvedTemplate {
    pub fn new(reference: TemplateRef, location: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            reference,
            location: location.into(),
            body: body.into(),
        }
    }
}
