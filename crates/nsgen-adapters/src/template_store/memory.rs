//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use nsgen_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainValidator as validator, Template, TemplateId},
    error::NsResult,
};

use crate::builtin_templates;

/// Thread-safe in-memory template store.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateId, Template>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store with the built-in templates loaded.
    pub fn with_builtin() -> NsResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    pub fn load_builtin(&self) -> NsResult<()> {
        for template in builtin_templates::all_templates()? {
            self.insert(template)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|t| t.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, id: &TemplateId) -> NsResult<Template> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound { id: id.to_string() }.into()
        })
    }

    fn get_by_name(&self, name: &str) -> NsResult<Template> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Ids sort by name then version, so the last match is the newest.
        inner
            .values()
            .filter(|t| t.id.name() == name)
            .next_back()
            .cloned()
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    id: name.to_string(),
                }
                .into()
            })
    }

    fn list(&self) -> NsResult<Vec<Template>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, template: Template) -> NsResult<()> {
        validator::validate_template(&template)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.insert(template.id.clone(), template);
        Ok(())
    }
}
