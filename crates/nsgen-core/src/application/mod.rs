//! Application layer for nsgen.
//!
//! - **Services**: use case orchestration (`AugmentService`, `TemplateService`)
//! - **Ports**: traits for external dependencies
//! - **Errors**: application-specific error types
//!
//! The rules themselves live in `crate::domain`; this layer only sequences
//! them and moves trees between disk and memory.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{AugmentService, TemplateInfo, TemplateService};

pub use ports::{Filesystem, RuleExecutor, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
