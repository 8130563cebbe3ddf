//! File templates and their rendering context.
//!
//! A [`Template`] is a named, ordered set of files to add to a workspace.
//! Paths and contents may carry `{{VARIABLE}}` placeholders that a
//! `TemplateRenderer` resolves against a [`RenderContext`].
//!
//! ```text
//! Template
//! ├── TemplateId        ns-files@1.0.0
//! ├── TemplateMetadata  display name, description, tags
//! └── Vec<FileSpec>     {{SOURCE_DIR}}/main{{NS_EXT}}.ts -> content
//!                          └── TemplateContent::{Literal, Parameterized}
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::domain::error::DomainError;

// ============================================================================
// Render Context
// ============================================================================

/// Variables available to templates.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `PROJECT_NAME` | "my-app" |
/// | `PROJECT_NAME_SNAKE` | "my_app" |
/// | `PROJECT_NAME_KEBAB` | "my-app" |
/// | `PROJECT_NAME_PASCAL` | "MyApp" |
///
/// Everything else (`SOURCE_DIR`, `NS_EXT`, ...) is added with
/// [`with_variable`](Self::with_variable) by whoever builds the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    project_name: String,
    // Sorted so rendering is deterministic when values contain placeholders.
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let mut vars = BTreeMap::new();

        vars.insert("PROJECT_NAME".to_string(), name.clone());
        vars.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(&name));
        vars.insert("PROJECT_NAME_KEBAB".to_string(), to_kebab_case(&name));
        vars.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(&name));

        Self {
            project_name: name,
            variables: vars,
        }
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `{{KEY}}` with its value.
    ///
    /// - `{{UNKNOWN}}` is left as-is
    /// - `{{A}}{{A}}` replaces both
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// "MyApp" → "my_app", "HTTPRequest" → "http_request"
pub(crate) fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

pub(crate) fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// "my-app" → "MyApp"
pub(crate) fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split on `_`, `-`, whitespace, camelCase humps and acronym boundaries
/// (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

// ============================================================================
// Template Identity
// ============================================================================

/// `name@version`, e.g. `ns-files@1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId {
    name: String,
    version: String,
}

impl TemplateId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse `name@version`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.split_once('@') {
            Some((name, version))
                if !name.is_empty() && !version.is_empty() && !version.contains('@') =>
            {
                Ok(Self::new(name, version))
            }
            _ => Err(DomainError::InvalidTemplate(format!(
                "Invalid template ID format: {s}. Expected 'name@version'"
            ))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

// ============================================================================
// Template Aggregate
// ============================================================================

/// A named set of files to add to a workspace.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `id.name` is non-empty and contains no `@`
/// 2. `metadata.name` is non-empty
/// 3. At least one file
/// 4. File paths are unique
#[derive(Debug, Clone)]
pub struct Template {
    pub id: TemplateId,
    pub metadata: TemplateMetadata,
    pub files: Vec<FileSpec>,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.name().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }
        if self.id.name().contains('@') {
            return Err(DomainError::InvalidTemplate(format!(
                "Template name cannot contain @: {}",
                self.id.name()
            )));
        }
        if self.metadata.name.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Metadata name cannot be empty".into(),
            ));
        }
        if self.files.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "Template {} has no files",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_str()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Builder for [`Template`]. `build()` validates.
#[derive(Default)]
pub struct TemplateBuilder {
    id: Option<TemplateId>,
    metadata: Option<TemplateMetadata>,
    files: Vec<FileSpec>,
}

impl TemplateBuilder {
    pub fn id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn file(mut self, file: FileSpec) -> Self {
        self.files.push(file);
        self
    }

    pub fn files(mut self, files: impl IntoIterator<Item = FileSpec>) -> Self {
        self.files.extend(files);
        self
    }

    pub fn build(self) -> Result<Template, DomainError> {
        let template = Template {
            id: self
                .id
                .ok_or_else(|| DomainError::InvalidTemplate("Template id is required".into()))?,
            metadata: self.metadata.ok_or_else(|| {
                DomainError::InvalidTemplate("Template metadata is required".into())
            })?,
            files: self.files,
        };
        template.validate()?;
        Ok(template)
    }
}

// ============================================================================
// Template Metadata
// ============================================================================

#[derive(Debug, Clone)]
pub struct TemplateMetadata {
    /// Short display name, e.g. "NativeScript files".
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl TemplateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: "0.1.0".to_string(),
            author: "nsgen".to_string(),
            tags: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn version(mut self, ver: impl Into<String>) -> Self {
        self.version = ver.into();
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

// ============================================================================
// Files and Content
// ============================================================================

/// A file to add. `path` is relative to the workspace root and may itself
/// contain placeholders.
#[derive(Debug, Clone)]
pub struct FileSpec {
    pub path: String,
    pub content: TemplateContent,
}

impl FileSpec {
    pub fn new(path: impl Into<String>, content: TemplateContent) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }

    /// Literal or parameterized, decided by whether the source contains
    /// placeholder syntax.
    pub fn detect(path: impl Into<String>, source: impl Into<TemplateSource>) -> Self {
        let source = source.into();
        let content = if source.contains_placeholder() {
            TemplateContent::Parameterized(source)
        } else {
            TemplateContent::Literal(source)
        };
        Self::new(path, content)
    }
}

#[derive(Debug, Clone)]
pub enum TemplateContent {
    /// Used exactly as provided.
    Literal(TemplateSource),
    /// Run through [`RenderContext::render`].
    Parameterized(TemplateSource),
}

impl TemplateContent {
    pub fn source(&self) -> &TemplateSource {
        match self {
            Self::Literal(s) | Self::Parameterized(s) => s,
        }
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::Parameterized(_))
    }
}

/// Compile-time (`include_str!`) or runtime-owned text.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }

    pub fn contains_placeholder(&self) -> bool {
        self.as_str().contains("{{") && self.as_str().contains("}}")
    }
}

/// A template file after placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Relative to the workspace root, `/`-separated.
    pub path: String,
    pub content: String,
}
