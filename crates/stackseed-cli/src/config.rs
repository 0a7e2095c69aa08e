//! Application settings.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns settings; the core crate never sees them.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `STACKSEED_*` environment variables, `__` between sections
//!    (`STACKSEED_DEFAULTS__PACKAGE_MANAGER=pnpm`)
//! 3. `--config <FILE>` if given, otherwise `.stackseed.toml` in the current
//!    directory over the global settings file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings file name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".stackseed.toml";

const ENV_PREFIX: &str = "STACKSEED";

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Filesystem locations.
    pub paths: PathsConfig,
}

/// Used by `stackseed new` when the matching flag is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Template family when neither `--template`, `--preset` nor `--file`
    /// decides it.
    pub template: Option<String>,
    /// Package manager when no flag, preset or file sets one.
    pub package_manager: Option<String>,
    /// Preset applied when neither `--preset` nor `--template` is given.
    pub preset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned for user presets (`*.toml`, `*.json`).
    pub presets_dir: Option<PathBuf>,
    /// When set, logs are also written as JSON lines to a daily file here.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load settings, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist.  Without it the global and local settings files are both
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "Using settings file from --config");
                builder = builder.add_source(File::from(path.as_path()).required(true));
            }
            None => {
                builder = builder
                    .add_source(File::from(Self::config_path()).required(false))
                    .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read settings")?;

        settings
            .try_deserialize()
            .context("Failed to interpret settings")
    }

    /// Path to the global settings file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stackseed.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Directory scanned for user presets: the configured one, or
    /// `presets/` next to the global settings file.
    pub fn presets_dir(&self) -> Option<PathBuf> {
        self.paths
            .presets_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|d| d.config_dir().join("presets")))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "stackseed", "stackseed")
    }
}
