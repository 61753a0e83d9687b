//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// No definition is registered under this id.
    #[error("Template '{template_id}' not found")]
    TemplateNotFound { template_id: String },

    /// Archive serialization failed.
    #[error("Packaging failed: {reason}")]
    Packaging { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Export target already exists and overwriting was not requested.
    #[error("File already exists: {path}")]
    FileExists { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { template_id } => vec![
                format!("No template with id '{}'", template_id),
                "Try: stencil list to see available templates".into(),
            ],
            Self::Packaging { .. } => vec![
                "The generated files could not be archived".into(),
                "Check that generated paths are relative and unique".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::FileExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Or choose a different --output directory".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::FileExists { .. } => ErrorCategory::Validation,
            Self::Packaging { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
