//! Root error type for the core crate.
//!
//! [`StackseedError`] wraps the domain and application errors so callers
//! handle one type. Each variant carries suggestions and an
//! [`ErrorCategory`] the CLI maps to an exit code.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for stackseed core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StackseedError {
    /// Errors from the domain layer (invalid or mismatched configuration).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StackseedError {
    /// Hints for the user, most specific first.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in stackseed".into(),
                "Please report this issue at: https://github.com/cosecruz/stackseed/issues".into(),
            ],
        }
    }

    /// Coarse classification; the CLI derives exit codes from it.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Coarse error classes shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StackseedResult<T> = Result<T, StackseedError>;
