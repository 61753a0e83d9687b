// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use super::directive::Position;
use super::value_objects::FieldKind;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (services hand them across rayon workers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Definition Errors (rejected at registration)
    // ========================================================================
    #[error("Invalid template definition '{template_id}': {reason}")]
    InvalidDefinition { template_id: String, reason: String },

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unsafe output path '{path}': {reason}")]
    UnsafePath { path: String, reason: String },

    // ========================================================================
    // Caller Errors (400-level equivalent)
    // ========================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ========================================================================
    // Template Defects
    // ========================================================================
    #[error("Syntax error in template '{template}' at {position}: {message}")]
    TemplateSyntax {
        template: String,
        position: Position,
        message: String,
    },

    #[error("Cannot evaluate template '{template}': {reason}")]
    TemplateEval { template: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDefinition { template_id, reason } => vec![
                format!("Definition '{}' was rejected: {}", template_id, reason),
                "Fix the definition file and restart".into(),
            ],
            Self::InvalidField { field, .. } => vec![
                format!("Check the schema of field '{}'", field),
                "select and multiselect fields need options; defaults must match the kind".into(),
            ],
            Self::UnsafePath { path, .. } => vec![
                format!("Path '{}' would escape the output directory", path),
                "Generated paths must be relative and must not contain '..'".into(),
            ],
            Self::Validation(e) => e.suggestions(),
            Self::TemplateSyntax { template, .. } | Self::TemplateEval { template, .. } => vec![
                format!("Template '{}' is defective", template),
                "Please report this issue or use a different template".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::UnsafePath { .. } => ErrorCategory::Validation,
            Self::InvalidDefinition { .. } | Self::InvalidField { .. } => {
                ErrorCategory::InvalidDefinition
            }
            Self::TemplateSyntax { .. } | Self::TemplateEval { .. } => {
                ErrorCategory::TemplateDefect
            }
        }
    }
}

/// A configuration map that does not satisfy a definition's field schema.
///
/// Every variant names the offending field and the kind it expects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field '{field}' (expected {expected})")]
    MissingField { field: String, expected: FieldKind },

    #[error("Field '{field}' expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldKind,
        found: &'static str,
    },

    #[error("Field '{field}' does not accept '{value}' (allowed: {allowed})")]
    NotAnOption {
        field: String,
        expected: FieldKind,
        value: String,
        allowed: String,
    },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::NotAnOption { field, .. } => field,
        }
    }

    /// Kind the field declares.
    pub fn expected_kind(&self) -> FieldKind {
        match self {
            Self::MissingField { expected, .. }
            | Self::TypeMismatch { expected, .. }
            | Self::NotAnOption { expected, .. } => *expected,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingField { field, .. } => vec![
                format!("Provide a value for '{}'", field),
                format!("Example: --set {}=<value>", field),
                "Run 'stencil show <template>' to see every field".into(),
            ],
            Self::TypeMismatch { field, expected, .. } => vec![
                format!("'{}' must be a {} value", field, expected),
            ],
            Self::NotAnOption { allowed, .. } => {
                vec![format!("Pick one of: {}", allowed)]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    InvalidDefinition,
    TemplateDefect,
}
