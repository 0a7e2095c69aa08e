//! Flags accepted before or after any subcommand.
//!
//! Flattened into [`super::Cli`]; every field is `global = true`.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum};

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` info, `-vv` one event per section, `-vvv` trace.
    ///
    /// Logs go to stderr and never mix with generated listings or JSON on
    /// stdout. `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print nothing but errors; implies `--yes` for `new`.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain text without ANSI colours (honours `NO_COLOR`).
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Read settings from FILE only, skipping the global and
    /// `.stackseed.toml` settings files.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed on stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped; the `output.format`
    /// setting decides first.
    #[default]
    Auto,
    /// Coloured marks and headers.
    Human,
    /// The same lines without colour.
    Plain,
    /// Exactly one JSON document per command.
    Json,
}
