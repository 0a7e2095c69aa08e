//! Errors surfaced by the `stackseed` binary.
//!
//! Every failure ends up as a [`CliError`]. Its [`ErrorCategory`] picks the
//! process exit code, and [`CliError::render`] turns it into the block
//! printed on stderr: the message, the cause chain under `-v`, and the
//! suggestions.

use std::error::Error as _;
use std::fmt::Write as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use stackseed_core::error::{ErrorCategory as CoreCategory, StackseedError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Flag combinations clap cannot reject on its own.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// The project name cannot become a directory name.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A settings file could not be read, interpreted or written.
    #[error("Settings error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Anything raised by `stackseed-core` or the adapters. Suggestions and
    /// category come from the wrapped error.
    #[error("{0}")]
    Core(#[from] StackseedError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user declined the confirmation prompt.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

/// What kind of failure an error is; decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad arguments or an invalid configuration.
    UserError,
    /// Unknown preset or missing file.
    NotFound,
    /// Broken settings or an unreadable config file.
    Configuration,
    /// Filesystem and other system failures.
    Internal,
}

impl ErrorCategory {
    /// `2` user, `3` not found, `4` configuration, `1` internal.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
            Self::Internal => 1,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => {
                vec!["Run 'stackseed new --help' to see how flags combine".into()]
            }
            Self::InvalidProjectName { .. } => vec![
                "Use lowercase letters, digits and hyphens".into(),
                "Examples: shop, my-app, portal-2".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Check your settings file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Recreate it with 'stackseed init --force'".into(),
                "Check STACKSEED_* environment variables".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::IoError { .. } => vec![
                "Check that the target directory is writable".into(),
                "Pass --dry-run to see what would be written".into(),
            ],
            Self::Cancelled => vec!["No files were written".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::InvalidProjectName { .. } | Self::Cancelled => {
                ErrorCategory::UserError
            }
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// The stderr block for this error. `color` adds ANSI styling; `verbose`
    /// swaps the `-v` hint for the full cause chain.
    pub fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "\n{} {}",
            paint("\u{2717} Error:", |s| s.red().bold().to_string()),
            paint(&self.to_string(), |s| s.red().to_string()),
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let _ = writeln!(
                    out,
                    "  {}",
                    paint(&format!("caused by: {err}"), |s| s.dimmed().to_string())
                );
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let heading = paint("Suggestions:", |s| s.yellow().bold().to_string());
            let _ = writeln!(out, "\n{heading}");
            for suggestion in &suggestions {
                let _ = writeln!(out, "  {suggestion}");
            }
        }

        if !verbose {
            let _ = writeln!(
                out,
                "\n{}",
                paint("Use -v / --verbose for more details.", |s| s.dimmed().to_string())
            );
        }

        out
    }

    /// Record the failure before it is printed.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, "command failed");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, "command failed");
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying cause");
        }
    }
}

/// Attach a message to an I/O result at the call-site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::IoError {
            message: f().into(),
            source,
        })
    }
}
