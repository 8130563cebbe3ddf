// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the tree is a value, so are its failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid tree path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Project '{project}' not found in workspace")]
    ProjectNotFound {
        project: String,
        available: Vec<String>,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ========================================================================
    // Tree Conflicts
    // ========================================================================
    #[error("File already exists: {path}")]
    FileAlreadyExists { path: String },

    // ========================================================================
    // Malformed Input
    // ========================================================================
    #[error("Malformed JSON in {path}: {reason}")]
    MalformedJson { path: String, reason: String },

    #[error("Unexpected JSON in {path} at '{pointer}': expected {expected}")]
    UnexpectedJsonShape {
        path: String,
        pointer: String,
        expected: &'static str,
    },

    #[error("Could not find '{anchor}' in {path}")]
    MissingAnchor { path: String, anchor: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidOptions(msg) => vec![
                "Check the options passed to the transform".into(),
                format!("Details: {}", msg),
            ],
            Self::ProjectNotFound { project, available } => {
                let mut out = vec![format!(
                    "No project named '{}' in angular.json",
                    project
                )];
                if available.is_empty() {
                    out.push("The workspace does not define any projects".into());
                } else {
                    out.push("Available projects:".into());
                    out.extend(available.iter().map(|p| format!("  • {}", p)));
                }
                out
            }
            Self::FileNotFound { path } => vec![
                format!("Expected {} to exist in the workspace", path),
                "Run this inside an Angular workspace created by the Angular CLI".into(),
            ],
            Self::FileAlreadyExists { path } => vec![
                format!("{} is already present", path),
                "NativeScript support may already have been added to this project".into(),
            ],
            Self::MalformedJson { path, .. } => vec![
                format!("Fix the JSON syntax in {}", path),
                "Comments and trailing commas are not supported".into(),
            ],
            Self::MissingAnchor { path, anchor } => vec![
                format!("{} no longer contains '{}'", path, anchor),
                "Restore the generated file or edit it by hand".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidOptions(_)
            | Self::InvalidPath { .. }
            | Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. } => ErrorCategory::Validation,
            Self::ProjectNotFound { .. } | Self::FileNotFound { .. } => ErrorCategory::NotFound,
            Self::FileAlreadyExists { .. } => ErrorCategory::Conflict,
            Self::MalformedJson { .. }
            | Self::UnexpectedJsonShape { .. }
            | Self::MissingAnchor { .. } => ErrorCategory::MalformedInput,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    MalformedInput,
}
