//! Application services - orchestrate use cases.

pub mod augment_service;
pub mod template_service;

pub use augment_service::AugmentService;
pub use template_service::{TemplateInfo, TemplateService};
