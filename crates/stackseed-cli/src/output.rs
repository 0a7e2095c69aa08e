//! Output management and formatting.
//!
//! Human-facing lines go to stdout through [`console::Term`]; in JSON mode
//! they are suppressed so that stdout carries exactly one JSON document.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded settings.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = if args.output_format == OutputFormat::Auto {
            config_format(&config.output.format)
        } else {
            args.output_format
        };

        // Resolve Auto to Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet and JSON mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2713}", msg, |s| s.green().bold().to_string(), |s| s.green().to_string())
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{26a0}", msg, |s| s.yellow().bold().to_string(), |s| s.yellow().to_string())
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2139}", msg, |s| s.blue().bold().to_string(), |s| s.blue().to_string())
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON document on stdout.  Written in every mode except
    /// quiet, since the caller only reaches for it in JSON mode.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    /// Whether an interactive progress bar makes sense.
    pub fn shows_progress(&self) -> bool {
        !self.suppressed() && io::stderr().is_terminal()
    }

    fn suppressed(&self) -> bool {
        self.quiet || self.is_json()
    }

    fn marked(
        &self,
        mark: &str,
        msg: &str,
        paint_mark: impl Fn(&str) -> String,
        paint_msg: impl Fn(&str) -> String,
    ) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{mark} {msg}")
        } else {
            format!("{} {}", paint_mark(mark), paint_msg(msg))
        };
        self.term.write_line(&line)
    }
}

/// Map the `output.format` setting onto an [`OutputFormat`].
fn config_format(raw: &str) -> OutputFormat {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color: false,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, OutputFormat::Plain);
        assert!(out.is_quiet());
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn only_human_format_is_colored() {
        assert!(make_manager(false, OutputFormat::Human).supports_color());
        assert!(!make_manager(false, OutputFormat::Plain).supports_color());
        assert!(!make_manager(false, OutputFormat::Json).supports_color());
    }

    #[test]
    fn settings_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert!(OutputManager::new(&args, &config).is_json());
    }

    #[test]
    fn json_mode_never_shows_progress() {
        assert!(!make_manager(false, OutputFormat::Json).shows_progress());
    }

    #[test]
    fn config_format_parses_known_names() {
        assert_eq!(config_format("JSON"), OutputFormat::Json);
        assert_eq!(config_format("plain"), OutputFormat::Plain);
        assert_eq!(config_format("fancy"), OutputFormat::Auto);
    }
}
