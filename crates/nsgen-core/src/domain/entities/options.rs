use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{error::DomainError, value_objects::Extension};

pub const DEFAULT_NS_EXTENSION: &str = "tns";
pub const DEFAULT_WEB_EXTENSION: &str = "";

/// Options for adding NativeScript support to a workspace project.
///
/// Immutable once built. Construct with [`AddNsOptions::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNsOptions {
    project: String,
    ns_extension: Extension,
    web_extension: Extension,
    sample: bool,
    skip_auto_generated_component: bool,
}

impl AddNsOptions {
    pub fn builder(project: impl Into<String>) -> AddNsOptionsBuilder {
        AddNsOptionsBuilder::new(project)
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn ns_extension(&self) -> &Extension {
        &self.ns_extension
    }

    pub fn web_extension(&self) -> &Extension {
        &self.web_extension
    }

    /// Include the larger demo feature.
    pub fn sample(&self) -> bool {
        self.sample
    }

    /// Omit the routed placeholder component.
    pub fn skip_auto_generated_component(&self) -> bool {
        self.skip_auto_generated_component
    }

    /// `.tns` (or whatever the NativeScript qualifier is).
    pub fn ns_ext(&self) -> String {
        self.ns_extension.suffix()
    }

    /// `.web`, or empty for the default unqualified web files.
    pub fn web_ext(&self) -> String {
        self.web_extension.suffix()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.project.trim().is_empty() {
            return Err(DomainError::InvalidOptions(
                "project name cannot be empty".into(),
            ));
        }
        if self.ns_extension.is_empty() && self.web_extension.is_empty() {
            return Err(DomainError::InvalidOptions(
                "nsExtension and webExtension cannot both be empty".into(),
            ));
        }
        if self.ns_extension == self.web_extension {
            return Err(DomainError::InvalidOptions(format!(
                "nsExtension and webExtension cannot be the same ('{}')",
                self.ns_extension
            )));
        }
        Ok(())
    }
}

impl fmt::Display for AddNsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ns: '{}', web: '{}', sample: {}, skip auto-generated: {})",
            self.project,
            self.ns_extension,
            self.web_extension,
            self.sample,
            self.skip_auto_generated_component
        )
    }
}

/// Builder for [`AddNsOptions`]. Defaults match the Angular CLI schematic.
#[derive(Debug, Clone)]
pub struct AddNsOptionsBuilder {
    project: String,
    ns_extension: String,
    web_extension: String,
    sample: bool,
    skip_auto_generated_component: bool,
}

impl AddNsOptionsBuilder {
    fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ns_extension: DEFAULT_NS_EXTENSION.into(),
            web_extension: DEFAULT_WEB_EXTENSION.into(),
            sample: false,
            skip_auto_generated_component: false,
        }
    }

    pub fn ns_extension(mut self, ext: impl Into<String>) -> Self {
        self.ns_extension = ext.into();
        self
    }

    pub fn web_extension(mut self, ext: impl Into<String>) -> Self {
        self.web_extension = ext.into();
        self
    }

    pub fn sample(mut self, sample: bool) -> Self {
        self.sample = sample;
        self
    }

    pub fn skip_auto_generated_component(mut self, skip: bool) -> Self {
        self.skip_auto_generated_component = skip;
        self
    }

    pub fn build(self) -> Result<AddNsOptions, DomainError> {
        let options = AddNsOptions {
            project: self.project,
            ns_extension: Extension::new(self.ns_extension)?,
            web_extension: Extension::new(self.web_extension)?,
            sample: self.sample,
            skip_auto_generated_component: self.skip_auto_generated_component,
        };
        options.validate()?;
        Ok(options)
    }
}
