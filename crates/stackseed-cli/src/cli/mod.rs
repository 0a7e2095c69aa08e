//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use stackseed_core::domain::{PackageManager, TemplateKind};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stackseed",
    bin_name = "stackseed",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Deterministic Next.js project generator",
    long_about = "stackseed turns a partial configuration into a complete \
                  Next.js project: a web app, a set of validated forms, or a \
                  role-based access control layer.",
    after_help = "EXAMPLES:\n\
        \x20 stackseed new shop\n\
        \x20 stackseed new shop --pm pnpm --feature database,auth,testing\n\
        \x20 stackseed new signup --template forms --file signup.toml\n\
        \x20 stackseed new portal --preset starter\n\
        \x20 stackseed presets --template rbac\n\
        \x20 stackseed completions bash > /usr/share/bash-completion/completions/stackseed",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new project.
    #[command(
        visible_alias = "n",
        about = "Generate a new project",
        after_help = "EXAMPLES:\n\
            \x20 stackseed new shop --yes\n\
            \x20 stackseed new shop --no-features --feature validation,tailwind\n\
            \x20 stackseed new shop --preset enterprise --pm bun\n\
            \x20 stackseed new portal --template rbac --dry-run"
    )]
    New(NewArgs),

    /// Validate a configuration file without generating anything.
    #[command(
        about = "Validate a configuration file",
        after_help = "EXAMPLES:\n\
            \x20 stackseed validate shop.toml\n\
            \x20 stackseed validate portal.json --preset starter"
    )]
    Validate(ValidateArgs),

    /// List bundled and user presets.
    #[command(
        visible_alias = "ls",
        about = "List available presets",
        after_help = "EXAMPLES:\n\
            \x20 stackseed presets\n\
            \x20 stackseed presets --template forms\n\
            \x20 stackseed presets --format json"
    )]
    Presets(PresetsArgs),

    /// Initialise a stackseed settings file.
    #[command(
        about = "Initialise settings",
        after_help = "EXAMPLES:\n\
            \x20 stackseed init           # global settings file\n\
            \x20 stackseed init --local   # .stackseed.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackseed completions bash > ~/.local/share/bash-completion/completions/stackseed\n\
            \x20 stackseed completions zsh  > ~/.zfunc/_stackseed\n\
            \x20 stackseed completions fish > ~/.config/fish/completions/stackseed.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the resolved settings.
    #[command(
        about = "Settings inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackseed config get defaults.package_manager\n\
            \x20 stackseed config list\n\
            \x20 stackseed config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `stackseed new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; also the name of the directory created under `--output`.
    #[arg(value_name = "NAME", help = "Project name (lowercase letters, digits, hyphens)")]
    pub name: String,

    /// Template family.
    #[arg(
        short = 't',
        long = "template",
        value_name = "TEMPLATE",
        value_enum,
        help = "Template family"
    )]
    pub template: Option<TemplateArg>,

    /// Start from a named preset instead of the family defaults.
    #[arg(
        short = 'p',
        long = "preset",
        value_name = "PRESET",
        help = "Preset to start from (see `stackseed presets`)"
    )]
    pub preset: Option<String>,

    /// Read the partial configuration from a `.toml` or `.json` file.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "Configuration file (.toml or .json)"
    )]
    pub file: Option<PathBuf>,

    /// Package manager.
    #[arg(long = "pm", value_name = "PM", value_enum, help = "Package manager")]
    pub package_manager: Option<PackageManagerArg>,

    /// Feature to enable.  Repeat or separate with commas.  The given list
    /// replaces the feature list from the defaults, preset or file.
    #[arg(
        short = 'F',
        long = "feature",
        value_name = "FEATURE",
        value_delimiter = ',',
        help = "Feature to enable (repeatable, replaces the feature list)"
    )]
    pub features: Vec<String>,

    /// Disable every feature.
    #[arg(
        long = "no-features",
        conflicts_with = "features",
        help = "Generate with an empty feature list"
    )]
    pub no_features: bool,

    /// Emit JavaScript instead of TypeScript (web app only).
    #[arg(long = "javascript", help = "Use JavaScript instead of TypeScript")]
    pub javascript: bool,

    /// Put application code at the project root instead of `src/`.
    #[arg(long = "no-src-dir", help = "Do not use a src/ directory")]
    pub no_src_dir: bool,

    /// Use the Pages Router instead of the App Router (web app only).
    #[arg(long = "pages-router", help = "Use the Pages Router")]
    pub pages_router: bool,

    /// Directory the project directory is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Parent directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Write into an existing directory.
    #[arg(long = "force", help = "Write into an existing directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Add a generated-at comment to every file that supports comments.
    #[arg(long = "stamp", help = "Add a 'Generated by stackseed' banner line")]
    pub stamp: bool,
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `stackseed validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Configuration file to check.
    #[arg(value_name = "FILE", help = "Configuration file (.toml or .json)")]
    pub file: PathBuf,

    /// Validate against a preset instead of the family defaults.
    #[arg(
        short = 'p',
        long = "preset",
        value_name = "PRESET",
        help = "Preset the file overrides"
    )]
    pub preset: Option<String>,
}

// ── presets ───────────────────────────────────────────────────────────────────

/// Arguments for `stackseed presets`.
#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Filter by template family.
    #[arg(short = 't', long = "template", value_enum, help = "Filter by template")]
    pub template: Option<TemplateArg>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `presets` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stackseed init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.stackseed.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local settings in the current directory"
    )]
    pub local: bool,

    /// Overwrite an existing settings file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing settings")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stackseed completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stackseed config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a settings key.
    Get {
        /// Dotted key path, e.g. `defaults.template`.
        key: String,
    },
    /// Print all resolved settings.
    List,
    /// Print the path to the global settings file.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Template families accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TemplateArg {
    /// Also accepted as `web`.
    #[value(alias = "web")]
    Webapp,
    Forms,
    Rbac,
}

impl From<TemplateArg> for TemplateKind {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Webapp => Self::Webapp,
            TemplateArg::Forms => Self::Forms,
            TemplateArg::Rbac => Self::Rbac,
        }
    }
}

impl std::fmt::Display for TemplateArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", TemplateKind::from(*self))
    }
}

/// Package managers accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PackageManagerArg {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => Self::Npm,
            PackageManagerArg::Yarn => Self::Yarn,
            PackageManagerArg::Pnpm => Self::Pnpm,
            PackageManagerArg::Bun => Self::Bun,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn template_display_matches_core() {
        assert_eq!(TemplateArg::Webapp.to_string(), "webapp");
        assert_eq!(TemplateArg::Forms.to_string(), "forms");
        assert_eq!(TemplateArg::Rbac.to_string(), "rbac");
    }

    #[test]
    fn package_manager_converts() {
        assert_eq!(PackageManager::from(PackageManagerArg::Pnpm), PackageManager::Pnpm);
        assert_eq!(PackageManager::from(PackageManagerArg::Bun), PackageManager::Bun);
    }

    #[test]
    fn parse_new_command() {
        let cli = Cli::parse_from(["stackseed", "new", "shop", "--pm", "pnpm", "--yes"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name, "shop");
        assert_eq!(args.package_manager, Some(PackageManagerArg::Pnpm));
        assert!(args.yes);
    }

    #[test]
    fn features_split_on_commas_and_repeat() {
        let cli = Cli::parse_from([
            "stackseed", "new", "shop", "-F", "database,auth", "--feature", "docker",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.features, ["database", "auth", "docker"]);
    }

    #[test]
    fn web_alias() {
        let cli = Cli::parse_from(["stackseed", "new", "shop", "-t", "web"]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.template, Some(TemplateArg::Webapp));
    }

    #[test]
    fn no_features_conflicts_with_feature() {
        let result =
            Cli::try_parse_from(["stackseed", "new", "shop", "--no-features", "-F", "auth"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["stackseed", "--quiet", "--verbose", "presets"]);
        assert!(result.is_err());
    }
}
