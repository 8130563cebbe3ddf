//! Driven (output) ports - implemented by infrastructure.
//!
//! The `nsgen-adapters` crate provides the implementations.

use std::path::Path;

use crate::domain::{AugmentContext, RenderContext, RenderedFile, Rule, Template, TemplateId, VirtualTree};
use crate::error::NsResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `nsgen_adapters::filesystem::LocalFilesystem` (production)
/// - `nsgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a UTF-8 text file.
    fn read_file(&self, path: &Path) -> NsResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> NsResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> NsResult<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Every file below `root`, as `/`-separated paths relative to it,
    /// sorted. Directories in `registry::IGNORED_DIRECTORIES` are not
    /// descended into.
    fn list_files(&self, root: &Path) -> NsResult<Vec<String>>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> NsResult<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> NsResult<()>;
}

/// Port for template storage and retrieval.
///
/// Implemented by `nsgen_adapters::template_store::InMemoryStore`.
pub trait TemplateStore: Send + Sync {
    fn get(&self, id: &TemplateId) -> NsResult<Template>;

    /// Find the newest template with this name.
    fn get_by_name(&self, name: &str) -> NsResult<Template>;

    /// All templates, sorted by id.
    fn list(&self) -> NsResult<Vec<Template>>;

    /// Insert or replace a template.
    fn insert(&self, template: Template) -> NsResult<()>;
}

/// Port for template rendering.
///
/// Implemented by `nsgen_adapters::renderer::SimpleRenderer`.
pub trait TemplateRenderer: Send + Sync {
    /// Resolve placeholders in every path and parameterized content.
    fn render(&self, template: &Template, context: &RenderContext) -> NsResult<Vec<RenderedFile>>;
}

/// Port for applying one rule of the plan to a tree.
///
/// Implemented by `nsgen_adapters::executor::TemplateRuleExecutor`.
#[cfg_attr(test, mockall::automock)]
pub trait RuleExecutor: Send + Sync {
    fn execute(&self, rule: Rule, tree: VirtualTree, ctx: &AugmentContext) -> NsResult<VirtualTree>;
}
