//! nsgen core - hexagonal architecture implementation
//!
//! Domain and application layers for adding NativeScript support to an
//! Angular workspace.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             nsgen-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │    (AugmentService, TemplateService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  (RuleExecutor, Filesystem, Store, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      nsgen-adapters (Infrastructure)    │
//! └──────────────────┬──────────────────────┘
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (VirtualTree, documents, RulePlan, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nsgen_core::prelude::*;
//!
//! let options = AddNsOptions::builder("my-app").sample(true).build()?;
//! let service = AugmentService::new(executor, filesystem);
//! let tree = service.apply(tree, &options)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        AugmentService, TemplateService,
        ports::{Filesystem, RuleExecutor, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        AddNsOptions, AugmentContext, RenderContext, Rule, RulePlan, Template, TemplateId,
        TemplateMetadata, TreeDiff, TreePath, VirtualTree,
    };
    pub use crate::error::{NsError, NsResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
