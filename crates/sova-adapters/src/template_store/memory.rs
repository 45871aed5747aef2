//! In-memory template store with built-in templates.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, RwLock, RwLockReadGuard},
};

use sova_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{CANONICAL_ENTRY, ResolvedTemplate, TemplateCategory, TemplateName, TemplateRef},
    error::{SovaError, SovaResult},
};
use tracing::{debug, instrument};

use crate::builtin_templates;

type Catalog = BTreeMap<TemplateCategory, BTreeMap<TemplateName, String>>;

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Catalog>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> SovaResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in templates.
    #[instrument(skip(self))]
    pub fn load_builtin(&self) -> SovaResult<()> {
        let templates = builtin_templates::all_templates();
        for t in templates {
            self.insert(t.category, t.name, t.body)?;
        }
        debug!(count = templates.len(), "built-in templates loaded");
        Ok(())
    }

    /// Insert or replace a template.
    pub fn insert(&self, category: &str, name: &str, body: impl Into<String>) -> SovaResult<()> {
        let reference = TemplateRef::parse(category, name)?;
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner
            .entry(reference.category)
            .or_default()
            .insert(reference.name, body.into());
        Ok(())
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.read()
            .map(|inner| inner.values().map(BTreeMap::len).sum())
            .unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> SovaResult<RwLockReadGuard<'_, Catalog>> {
        self.inner
            .read()
            .map_err(|_| SovaError::from(ApplicationError::StoreLockError))
    }
}

impl TemplateStore for InMemoryStore {
    fn resolve(&self, category: &str, name: &str) -> SovaResult<ResolvedTemplate> {
        // Validation first: nothing is looked up for a traversal attempt.
        let reference = TemplateRef::parse(category, name)?;
        let inner = self.read()?;

        let templates =
            inner
                .get(&reference.category)
                .ok_or_else(|| ApplicationError::UnknownCategory {
                    category: category.to_string(),
                })?;
        let body = templates
            .get(&reference.name)
            .ok_or_else(|| ApplicationError::TemplateNotFound {
                category: category.to_string(),
                name: name.to_string(),
            })?;

        let location = format!("builtin:{reference}");
        Ok(ResolvedTemplate::new(reference, location, body.clone()))
    }

    fn list_template_keys(&self, category: &str) -> SovaResult<BTreeSet<TemplateName>> {
        let category = TemplateCategory::new(category)?;
        let inner = self.read()?;

        match inner.get(&category) {
            Some(templates) if templates.contains_key(&TemplateName::canonical_entry()) => {
                Ok(templates.keys().cloned().collect())
            }
            _ => Err(ApplicationError::UnknownCategory {
                category: category.to_string(),
            }
            .into()),
        }
    }

    fn categories(&self) -> SovaResult<Vec<TemplateCategory>> {
        let inner = self.read()?;
        Ok(inner
            .iter()
            .filter(|(_, templates)| {
                templates
                    .keys()
                    .any(|name| name.as_str() == CANONICAL_ENTRY)
            })
            .map(|(category, _)| category.clone())
            .collect())
    }
}
