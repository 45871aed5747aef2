//! Project Service - main application orchestrator.
//!
//! This service coordinates the whole "create a project" use case:
//! 1. Check the catalog serves the project kind
//! 2. Build the manifest and parameter set from the blueprint
//! 3. Hand both to the `GenerationService`
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, GenerationOptions, GenerationResult, GenerationService, TemplateService,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{OutputManifest, ProjectConfig},
    error::SovaResult,
};

/// Creates projects from a [`ProjectConfig`].
pub struct ProjectService {
    catalog: TemplateService,
    generation: GenerationService,
}

impl ProjectService {
    pub fn new(
        store: Arc<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            catalog: TemplateService::new(Arc::clone(&store)),
            generation: GenerationService::new(store, renderer, filesystem),
        }
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.generation = self.generation.with_options(options);
        self
    }

    /// Manifest that `create` would write, after checking the catalog.
    ///
    /// Nothing is written; used for dry runs and before generation.
    ///
    /// # Errors
    /// - `UnknownCategory` if the store has no category for the kind
    /// - `TemplateNotFound` if the category lacks a template the manifest needs
    pub fn plan(&self, config: &ProjectConfig) -> SovaResult<OutputManifest> {
        let kind = config.kind();
        let manifest = kind.manifest(&config.features())?;

        let available = self.catalog.templates(kind.category())?;
        for mapping in manifest.mappings() {
            if !available.contains(&mapping.template.name) {
                return Err(ApplicationError::TemplateNotFound {
                    category: mapping.template.category.to_string(),
                    name: mapping.template.name.to_string(),
                }
                .into());
            }
        }

        Ok(manifest)
    }

    /// Create the project described by `config` at `root`.
    #[instrument(
        skip_all,
        fields(
            project = %config.name(),
            kind = %config.kind(),
            root = %root.as_ref().display()
        )
    )]
    pub fn create(&self, config: &ProjectConfig, root: impl AsRef<Path>) -> GenerationResult {
        let root = root.as_ref();
        info!(features = %config.features(), "Creating {} project", config.kind());

        if config.features() != config.effective_features() {
            debug!(
                requested = %config.features(),
                applied = %config.effective_features(),
                "Some feature toggles do not apply to this project kind"
            );
        }

        let manifest = match self.plan(config) {
            Ok(manifest) => manifest,
            Err(e) => {
                debug!(error = %e, "Catalog check failed");
                let mut result = GenerationResult::new(root);
                result.fail(None, e);
                return result;
            }
        };

        let parameters = config.parameters();
        self.generation.generate(&manifest, &parameters, root)
    }
}
