//! Template Service - catalog queries.
//!
//! Read-only view over a `TemplateStore`, plus the completeness check that
//! tells whether a catalog can serve a kind's full blueprint.
//! Separated from ProjectService for single responsibility.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use crate::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{ProjectKind, ResolvedTemplate, TemplateCategory, TemplateName},
    error::SovaResult,
};

/// One catalog category for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub category: TemplateCategory,
    /// Project kind served by this category, if it is a known one.
    pub kind: Option<ProjectKind>,
    pub description: String,
    pub templates: Vec<TemplateName>,
}

/// Service for catalog operations.
pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Get one template.
    pub fn resolve(&self, category: &str, name: &str) -> SovaResult<ResolvedTemplate> {
        self.store.resolve(category, name)
    }

    /// All template names in a category.
    pub fn templates(&self, category: &str) -> SovaResult<BTreeSet<TemplateName>> {
        self.store.list_template_keys(category)
    }

    pub fn categories(&self) -> SovaResult<Vec<TemplateCategory>> {
        self.store.categories()
    }

    /// Every category with its templates.
    #[instrument(skip(self))]
    pub fn catalog(&self) -> SovaResult<Vec<CategoryInfo>> {
        self.categories()?
            .into_iter()
            .map(|category| {
                let templates = self.templates(category.as_str())?.into_iter().collect();
                let kind = category.as_str().parse::<ProjectKind>().ok();
                let description = kind
                    .map(|k| k.description().to_string())
                    .unwrap_or_else(|| "Custom template category".to_string());
                Ok(CategoryInfo {
                    category,
                    kind,
                    description,
                    templates,
                })
            })
            .collect()
    }

    /// Blueprint templates for `kind` that the store does not have.
    ///
    /// # Errors
    /// `UnknownCategory` if the store has no category for `kind`.
    pub fn missing_templates(&self, kind: ProjectKind) -> SovaResult<Vec<&'static str>> {
        let available = self.templates(kind.category())?;
        Ok(kind
            .blueprint()
            .template_names()
            .filter(|name| !available.iter().any(|t| t.as_str() == *name))
            .collect())
    }

    /// Fail with `TemplateNotFound` for the first blueprint template the store lacks.
    pub fn ensure_complete(&self, kind: ProjectKind) -> SovaResult<()> {
        match self.missing_templates(kind)?.first() {
            Some(name) => Err(ApplicationError::TemplateNotFound {
                category: kind.category().to_string(),
                name: (*name).to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }
}
