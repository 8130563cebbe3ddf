pub mod common;
pub mod context;
pub mod options;
pub mod template;
pub mod tree;

pub use crate::domain::DomainError;
pub use common::TreePath;
pub use context::AugmentContext;
pub use options::{AddNsOptions, AddNsOptionsBuilder};
pub use template::{RenderContext, Template};
pub use tree::{TreeDiff, VirtualTree};
