use crate::domain::{
    documents::ProjectInfo,
    entities::{common::TreePath, options::AddNsOptions, template::RenderContext},
    error::DomainError,
    registry,
};

/// Everything a rule needs: validated options plus the resolved project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentContext {
    options: AddNsOptions,
    project: ProjectInfo,
}

impl AugmentContext {
    pub fn new(options: AddNsOptions, project: ProjectInfo) -> Self {
        Self { options, project }
    }

    pub fn options(&self) -> &AddNsOptions {
        &self.options
    }

    pub fn project(&self) -> &ProjectInfo {
        &self.project
    }

    pub fn source_root(&self) -> &str {
        &self.project.source_root
    }

    /// Absolute tree path of a file under the source root.
    pub fn source_path(&self, relative: &str) -> Result<TreePath, DomainError> {
        TreePath::new(format!("{}/{}", self.project.source_root, relative))
    }

    /// Variables for the built-in templates.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(&self.project.name)
            .with_variable("SOURCE_DIR", &self.project.source_root)
            .with_variable("NS_EXT", self.options.ns_ext())
            .with_variable("WEB_EXT", self.options.web_ext())
            .with_variable("APP_ID", registry::APP_ID)
            .with_variable(
                "APP_PREFIX",
                self.project.prefix.clone().unwrap_or_else(|| "app".into()),
            )
    }
}
