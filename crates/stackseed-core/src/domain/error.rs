// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::validation::ConfigError;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (errors are carried inside results and reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("unknown {label} '{value}' (expected one of: {allowed})")]
    UnknownChoice {
        label: &'static str,
        value: String,
        allowed: String,
    },

    #[error("configuration is invalid ({} problem(s))", errors.len())]
    InvalidConfiguration { errors: Vec<ConfigError> },

    #[error("malformed configuration: {message}")]
    MalformedConfig { message: String },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("preset '{preset}' is a {expected} preset but the overrides are for {found}")]
    TemplateMismatch {
        preset: String,
        expected: String,
        found: String,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("no preset named '{name}'")]
    UnknownPreset { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownChoice { label, allowed, .. } => {
                vec![format!("Valid {label} values: {allowed}")]
            }
            Self::InvalidConfiguration { errors } => {
                let mut out: Vec<String> = errors.iter().map(ToString::to_string).collect();
                out.push("Fix every listed field and run again".into());
                out
            }
            Self::TemplateMismatch { expected, .. } => vec![
                format!("Pass overrides for the {expected} template"),
                "Or drop --preset and pick the template with --template".into(),
            ],
            Self::UnknownPreset { .. } => vec![
                "Try: stackseed presets to list available presets".into(),
                "User presets are read from the configured presets directory".into(),
            ],
            Self::MalformedConfig { .. } => vec![
                "Keys use snake_case, e.g. project_name, package_manager".into(),
                "Select the family with template = \"webapp\" | \"forms\" | \"rbac\"".into(),
            ],
            Self::InvalidPath { .. } => vec!["This is a bug in a section generator".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownChoice { .. }
            | Self::InvalidConfiguration { .. }
            | Self::MalformedConfig { .. } => ErrorCategory::Validation,
            Self::TemplateMismatch { .. } => ErrorCategory::Compatibility,
            Self::UnknownPreset { .. } => ErrorCategory::NotFound,
            Self::InvalidPath { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
