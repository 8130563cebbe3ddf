//! Application layer errors.
//!
//! Failures in orchestration and adapters, not in the domain rules.
//! Domain failures are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, NsError};

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A file on disk is not UTF-8 text and cannot enter the tree.
    #[error("Not a text file: {path}")]
    NotText { path: PathBuf },

    /// A rule would write over a file that was left out of the tree
    /// because it is not UTF-8 text.
    #[error("Refusing to modify {path}: the existing file is not UTF-8 text")]
    UnreadableTarget { path: PathBuf },

    /// Store access failed (lock poisoned).
    #[error("Template store error")]
    StoreLockError,

    /// A rule of the plan failed; `source` is what it hit.
    #[error("Rule '{rule}' failed: {source}")]
    RuleFailed {
        rule: String,
        #[source]
        source: Box<NsError>,
    },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Best-effort cleanup after a failed write failed as well.
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { id } => vec![
                format!("No template named {}", id),
                "Try: nsgen templates to see available templates".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::UnreadableTarget { path } => vec![
                format!("Re-encode {} as UTF-8 and run again", path.display()),
                "Its existing content would otherwise be lost".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::RuleFailed { source, .. } => source.suggestions(),
            Self::RollbackFailed { path, .. } => vec![
                format!("{} may be left in a partially written state", path.display()),
                "Inspect it with your version control tool before retrying".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::NotText { .. } => ErrorCategory::MalformedInput,
            Self::UnreadableTarget { .. } => ErrorCategory::Conflict,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::RuleFailed { source, .. } => source.category(),
            Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}
