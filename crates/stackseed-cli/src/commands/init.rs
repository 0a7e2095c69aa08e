//! `stackseed init`: create a default settings file.

use std::path::PathBuf;

use tracing::info;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG_FILE},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Create a default stackseed settings file.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        AppConfig::config_path()
    };

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Settings already exist at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = render_default()?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create settings directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write settings to '{}'", config_path.display()))?;

    info!(path = %config_path.display(), "Settings file created");
    output.success(&format!("Settings created at {}", config_path.display()))?;

    Ok(())
}

/// Default settings, with the optional keys shown as comments.
fn render_default() -> CliResult<String> {
    let body = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default settings: {e}"),
        source: Some(Box::new(e)),
    })?;

    Ok(format!(
        "# stackseed settings\n\
         #\n\
         # [defaults]\n\
         # template = \"webapp\"          # webapp | forms | rbac\n\
         # package_manager = \"pnpm\"     # npm | yarn | pnpm | bun\n\
         # preset = \"standard\"\n\
         #\n\
         # [paths]\n\
         # presets_dir = \"/path/to/presets\"\n\
         # log_dir = \"/path/to/logs\"\n\
         \n\
         {body}"
    ))
}
