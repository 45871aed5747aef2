//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sova-adapters` crate provides implementations.

use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::{ParameterSet, ResolvedTemplate, TemplateCategory, TemplateName, TemplateRef};
use crate::error::SovaResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sova_adapters::filesystem::LocalFilesystem` (production)
/// - `sova_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a single directory. Fails if it already exists.
    fn create_dir(&self, path: &Path) -> SovaResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SovaResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> SovaResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SovaResult<()>;
}

/// Port for template lookup.
///
/// Implemented by:
/// - `sova_adapters::template_store::InMemoryStore` (built-in catalog)
/// - `sova_adapters::template_store::DirectoryStore` (on-disk catalog)
///
/// Implementations must validate `category` and `name` before touching any
/// backing storage, and `resolve` must be a pure function of its arguments
/// and the store's fixed root.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Look up one template body.
    fn resolve(&self, category: &str, name: &str) -> SovaResult<ResolvedTemplate>;

    /// Every template name in `category`.
    fn list_template_keys(&self, category: &str) -> SovaResult<BTreeSet<TemplateName>>;

    /// Available categories, sorted.
    fn categories(&self) -> SovaResult<Vec<TemplateCategory>>;

    fn resolve_ref(&self, reference: &TemplateRef) -> SovaResult<ResolvedTemplate> {
        self.resolve(reference.category.as_str(), reference.name.as_str())
    }
}

/// Port for template rendering.
///
/// Implemented by:
/// - `sova_adapters::renderer::SimpleRenderer` (placeholder substitution)
pub trait TemplateRenderer: Send + Sync {
    /// Render a template body with `parameters`.
    fn render(&self, body: &str, parameters: &ParameterSet) -> SovaResult<String>;
}
