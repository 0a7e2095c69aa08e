//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not in the
//! configuration itself. Configuration problems are `DomainError` or
//! `ConfigError` entries from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised while writing projects or loading files and presets.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// The root created for a failed write could not be removed.
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// A configuration file could not be read or parsed.
    #[error("Cannot load configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    /// A writer panicked while holding the preset or memory store lock.
    #[error("Preset store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to write into it anyway".into(),
                "Choose a different project name or --output".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![format!(
                "Remove the partially written project at {} by hand",
                path.display()
            )],
            Self::ConfigLoad { path, .. } => vec![
                format!("Check the syntax of {}", path.display()),
                "Supported formats are .toml and .json".into(),
                "Run: stackseed validate <file> to list every problem".into(),
            ],
            Self::StoreLockError => vec![
                "The preset store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::ConfigLoad { .. } => ErrorCategory::Configuration,
        }
    }
}
