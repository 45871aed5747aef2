//! Generation Service - writes one manifest to disk.
//!
//! This service drives the generation state machine:
//! 1. Refuse an existing project root
//! 2. Create the root and every manifest directory
//! 3. Resolve, render and write each mapping in order
//!
//! It stops at the first failure and reports what was written so far.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, GenerationResult,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{DomainValidator as validator, FileMapping, OutputManifest, ParameterSet},
    error::{SovaError, SovaResult},
};

/// What to do with a partially written tree after a mid-generation failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollbackPolicy {
    /// Leave the partial tree on disk and report it.
    #[default]
    Keep,
    /// Remove the project root this run created.
    RemovePartial,
}

impl RollbackPolicy {
    pub const fn from_flag(remove_partial: bool) -> Self {
        if remove_partial {
            Self::RemovePartial
        } else {
            Self::Keep
        }
    }
}

/// Knobs for a generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    pub rollback: RollbackPolicy,
}

impl GenerationOptions {
    pub const fn with_rollback(mut self, rollback: RollbackPolicy) -> Self {
        self.rollback = rollback;
        self
    }
}

/// Writes manifests through the ports.
pub struct GenerationService {
    // Shared with `TemplateService` by `ProjectService`.
    store: Arc<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    options: GenerationOptions,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use sova_core::application::GenerationService;
    ///
    /// let service = GenerationService::new(
    ///     Arc::new(store),     // impl TemplateStore
    ///     Box::new(renderer),  // impl TemplateRenderer
    ///     Box::new(filesystem) // impl Filesystem
    /// );
    /// ```
    pub fn new(
        store: Arc<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    /// Generate `manifest` under `root`.
    ///
    /// Never panics and never returns early without a report: the returned
    /// [`GenerationResult`] carries the error, if any, and the files that
    /// reached the disk.
    #[instrument(
        skip_all,
        fields(
            root = %root.as_ref().display(),
            files = manifest.file_count(),
            directories = manifest.directory_count()
        )
    )]
    pub fn generate(
        &self,
        manifest: &OutputManifest,
        parameters: &ParameterSet,
        root: impl AsRef<Path>,
    ) -> GenerationResult {
        let root = root.as_ref();
        let mut result = GenerationResult::new(root);

        if let Err(e) = validator::validate_manifest(manifest) {
            result.fail(None, e.into());
            return result;
        }

        // 1. No-overwrite policy
        if self.filesystem.exists(root) {
            debug!("Project root already exists");
            result.fail(
                None,
                ApplicationError::DirectoryExists {
                    path: root.to_path_buf(),
                }
                .into(),
            );
            return result;
        }

        // 2. Root (leaf only, after the parent)
        if let Err(e) = self.create_root(root) {
            result.fail(None, e);
            return result;
        }
        result.root_created();
        debug!("Project root created");

        // 3. Declared directories
        for dir in manifest.directories() {
            let path = root.join(dir);
            if let Err(e) = self.filesystem.create_dir_all(&path) {
                return self.abort(result, None, e);
            }
            result.directory_created(path);
        }

        // 4. Files, strictly in manifest order
        for (index, mapping) in manifest.mappings().iter().enumerate() {
            let position = index + 1;
            match self.write_mapping(root, mapping, parameters) {
                Ok(path) => {
                    debug!(file = %path.display(), "Wrote file");
                    result.file_written(path);
                }
                Err(e) => {
                    debug!(
                        template = %mapping.template,
                        destination = %mapping.destination,
                        position,
                        error = %e,
                        "Generation stopped"
                    );
                    return self.abort(result, Some(position), e);
                }
            }
        }

        result.complete();
        info!(files = result.files().len(), "Generation complete");
        result
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn create_root(&self, root: &Path) -> SovaResult<()> {
        if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.filesystem.exists(parent) {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.filesystem.create_dir(root)
    }

    fn write_mapping(
        &self,
        root: &Path,
        mapping: &FileMapping,
        parameters: &ParameterSet,
    ) -> SovaResult<PathBuf> {
        let template = self.store.resolve_ref(&mapping.template)?;
        let content = self
            .renderer
            .render(&template.body, parameters)
            .map_err(|e| match e {
                SovaError::Domain(source) => ApplicationError::RenderFailed {
                    template: mapping.template.to_string(),
                    source,
                }
                .into(),
                other => other,
            })?;

        let path = root.join(&mapping.destination);
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, &content)?;
        Ok(path)
    }

    /// Record the failure and apply the rollback policy.
    fn abort(
        &self,
        mut result: GenerationResult,
        at: Option<usize>,
        error: SovaError,
    ) -> GenerationResult {
        result.fail(at, error);

        if self.options.rollback == RollbackPolicy::RemovePartial {
            let root = result.root().to_path_buf();
            match self.filesystem.remove_dir_all(&root) {
                Ok(()) => {
                    info!(path = %root.display(), "Rolled back partial project");
                    result.rolled_back();
                }
                Err(e) => {
                    debug!(error = %e, path = %root.display(), "Rollback failed");
                    result.rollback_failed(ApplicationError::RollbackFailed {
                        path: root,
                        reason: e.to_string(),
                    });
                }
            }
        }

        result
    }
}
