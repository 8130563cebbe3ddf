//! Infrastructure adapters for nsgen.
//!
//! Implements the ports defined in `nsgen_core::application::ports`.
//! All I/O lives here.

pub mod builtin_templates;
pub mod executor;
pub mod filesystem;
pub mod renderer;
pub mod template_store;

pub use executor::TemplateRuleExecutor;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_store::InMemoryStore;
