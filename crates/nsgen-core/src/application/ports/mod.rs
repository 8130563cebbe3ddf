//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `nsgen-adapters` implement them.
//!
//! - **Driven (output) ports**: called by the application
//!   - `Filesystem`: file operations
//!   - `TemplateStore`: template storage and retrieval
//!   - `TemplateRenderer`: placeholder substitution
//!   - `RuleExecutor`: applies one rule of the plan

pub mod output;

pub use output::{Filesystem, RuleExecutor, TemplateRenderer, TemplateStore};

#[cfg(test)]
pub use output::{MockFilesystem, MockRuleExecutor};
