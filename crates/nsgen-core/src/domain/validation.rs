use crate::domain::{
    entities::{options::AddNsOptions, template::Template, tree::VirtualTree},
    error::DomainError,
    registry,
};

/// Centralized domain validation.
///
/// Checks that need more than one entity live here rather than on the
/// entities themselves.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_options(options: &AddNsOptions) -> Result<(), DomainError> {
        options.validate()
    }

    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    /// The tree must look like an Angular workspace before anything is
    /// added to it.
    pub fn validate_workspace(tree: &VirtualTree) -> Result<(), DomainError> {
        for required in [registry::WORKSPACE_CONFIG_PATH, registry::PACKAGE_JSON_PATH] {
            if !tree.exists(required) {
                return Err(DomainError::FileNotFound {
                    path: required.to_string(),
                });
            }
        }
        Ok(())
    }
}
