// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for nsgen.
//!
//! Pure logic over an in-memory [`VirtualTree`]: options, typed JSON
//! documents, anchored source edits and the rule plan. All I/O and template
//! rendering go through ports defined in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: the tree is a value, never a directory
//! - **Additive only**: nothing here deletes a file or a config entry
pub mod documents;
pub mod entities;
pub mod error;
pub mod registry;
pub mod rules;
pub mod source_edit;
pub mod value_objects;

mod validation;

pub use entities::{
    common::TreePath,
    context::AugmentContext,
    options::{AddNsOptions, AddNsOptionsBuilder, DEFAULT_NS_EXTENSION, DEFAULT_WEB_EXTENSION},
    template::{
        FileSpec, RenderContext, RenderedFile, Template, TemplateBuilder, TemplateContent,
        TemplateId, TemplateMetadata, TemplateSource,
    },
    tree::{TreeDiff, VirtualTree},
};

pub use documents::{PackageJson, ProjectInfo, TsConfig, WorkspaceConfig, merge_gitignore};
pub use error::{DomainError, ErrorCategory};
pub use rules::{Rule, RulePlan};
pub use source_edit::{Route, SourceFile};
pub use validation::DomainValidator;
pub use value_objects::{Extension, Platform};
