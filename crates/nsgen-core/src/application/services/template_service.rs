//! Template Service - template queries.
//!
//! Separate from `AugmentService`: listing templates needs no workspace.

use crate::{
    application::ports::TemplateStore,
    domain::{Template, TemplateId},
    error::NsResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub files: usize,
    pub tags: Vec<String>,
}

impl From<&Template> for TemplateInfo {
    fn from(t: &Template) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.metadata.name.clone(),
            description: t.metadata.description.clone(),
            files: t.files.len(),
            tags: t.metadata.tags.clone(),
        }
    }
}

pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, id: &TemplateId) -> NsResult<Template> {
        self.store.get(id)
    }

    /// Add or update a template.
    pub fn save(&self, template: Template) -> NsResult<()> {
        template.validate()?;
        self.store.insert(template)
    }

    pub fn list(&self) -> NsResult<Vec<Template>> {
        self.store.list()
    }

    /// Display rows for every stored template.
    pub fn list_info(&self) -> NsResult<Vec<TemplateInfo>> {
        Ok(self.store.list()?.iter().map(TemplateInfo::from).collect())
    }
}
