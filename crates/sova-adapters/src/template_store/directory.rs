//! On-disk template store.
//!
//! Layout: `<root>/<category>/<name>`, one flat directory per category. A
//! directory counts as a category only when it holds the canonical entry
//! (`main.tpl`).

use std::{
    collections::{BTreeSet, HashMap},
    io,
    path::{Path, PathBuf},
    sync::RwLock,
};

use sova_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{
        CANONICAL_ENTRY, DomainError, ResolvedTemplate, TemplateCategory, TemplateName,
        TemplateRef,
    },
    error::{SovaError, SovaResult},
};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::filesystem::map_io_error;

/// Template store backed by a directory tree.
///
/// Resolved paths are canonicalized and must stay under the canonical root,
/// so a symlink pointing outside the catalog is rejected.
#[derive(Debug)]
pub struct DirectoryStore {
    root: PathBuf,
    cache: RwLock<HashMap<TemplateRef, PathBuf>>,
}

impl DirectoryStore {
    /// Open a catalog rooted at `root`.
    ///
    /// # Errors
    /// `FilesystemError` if `root` does not exist or is not a directory.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn new(root: impl AsRef<Path>) -> SovaResult<Self> {
        let root = root.as_ref();
        let canonical = root
            .canonicalize()
            .map_err(|e| map_io_error(root, e, "open templates directory"))?;
        if !canonical.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: root.to_path_buf(),
                reason: "Templates path is not a directory".into(),
            }
            .into());
        }
        debug!(canonical = %canonical.display(), "template directory opened");
        Ok(Self {
            root: canonical,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical category directory, or `UnknownCategory`.
    fn category_dir(&self, category: &TemplateCategory) -> SovaResult<PathBuf> {
        let unknown = || -> SovaError {
            ApplicationError::UnknownCategory {
                category: category.to_string(),
            }
            .into()
        };

        let dir = match self.root.join(category.as_str()).canonicalize() {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(unknown()),
            Err(e) => return Err(map_io_error(&self.root.join(category.as_str()), e, "open category")),
        };
        self.ensure_contained(&dir, category.as_str())?;
        if dir.is_dir() { Ok(dir) } else { Err(unknown()) }
    }

    fn ensure_contained(&self, path: &Path, name: &str) -> SovaResult<()> {
        if path.starts_with(&self.root) {
            Ok(())
        } else {
            debug!(path = %path.display(), "template path escapes the catalog root");
            Err(DomainError::InvalidName {
                name: name.to_string(),
                reason: "resolves outside the templates directory".into(),
            }
            .into())
        }
    }

    /// Canonical path of a template, consulting the cache first.
    fn locate(&self, reference: &TemplateRef) -> SovaResult<PathBuf> {
        if let Some(path) = self
            .cache
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?
            .get(reference)
        {
            return Ok(path.clone());
        }

        let dir = self.category_dir(&reference.category)?;
        let candidate = dir.join(reference.name.as_str());
        let path = match candidate.canonicalize() {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ApplicationError::TemplateNotFound {
                    category: reference.category.to_string(),
                    name: reference.name.to_string(),
                }
                .into());
            }
            Err(e) => return Err(map_io_error(&candidate, e, "resolve template")),
        };
        self.ensure_contained(&path, reference.name.as_str())?;
        if !path.is_file() {
            return Err(ApplicationError::TemplateNotFound {
                category: reference.category.to_string(),
                name: reference.name.to_string(),
            }
            .into());
        }

        self.cache
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .insert(reference.clone(), path.clone());
        Ok(path)
    }
}

impl TemplateStore for DirectoryStore {
    #[instrument(skip(self))]
    fn resolve(&self, category: &str, name: &str) -> SovaResult<ResolvedTemplate> {
        // Validation happens before any path is built.
        let reference = TemplateRef::parse(category, name)?;
        let path = self.locate(&reference)?;
        let body = std::fs::read_to_string(&path).map_err(|e| map_io_error(&path, e, "read template"))?;
        Ok(ResolvedTemplate::new(
            reference,
            path.display().to_string(),
            body,
        ))
    }

    fn list_template_keys(&self, category: &str) -> SovaResult<BTreeSet<TemplateName>> {
        let category = TemplateCategory::new(category)?;

        // The canonical entry decides whether the category exists at all.
        let entry = TemplateRef::new(category.clone(), TemplateName::canonical_entry());
        match self.locate(&entry) {
            Ok(_) => {}
            Err(SovaError::Application(ApplicationError::TemplateNotFound { .. })) => {
                return Err(ApplicationError::UnknownCategory {
                    category: category.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e),
        }

        let dir = self.category_dir(&category)?;
        let mut keys = BTreeSet::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: dir.clone(),
                reason: format!("Failed to list templates: {e}"),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            match TemplateName::new(file_name) {
                Ok(name) => {
                    let contained = entry
                        .path()
                        .canonicalize()
                        .is_ok_and(|p| p.starts_with(&self.root));
                    if contained {
                        keys.insert(name);
                    } else {
                        warn!(file = %entry.path().display(), "skipping template outside the catalog root");
                    }
                }
                Err(e) => debug!(file = file_name, error = %e, "skipping file with invalid name"),
            }
        }
        Ok(keys)
    }

    fn categories(&self) -> SovaResult<Vec<TemplateCategory>> {
        let mut categories = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: self.root.clone(),
                reason: format!("Failed to list categories: {e}"),
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Some(Ok(category)) = entry.file_name().to_str().map(TemplateCategory::new) else {
                continue;
            };
            if entry.path().join(CANONICAL_ENTRY).is_file() {
                categories.push(category);
            }
        }
        Ok(categories)
    }
}
