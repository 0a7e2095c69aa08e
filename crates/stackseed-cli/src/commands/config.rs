//! `stackseed config`: inspect the resolved settings.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.print(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Settings:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise settings: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `defaults.package_manager`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let unknown = || CliError::ConfigError {
        message: format!("Unknown settings key: '{key}'"),
        source: None,
    };

    let root = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise settings: {e}"),
        source: Some(Box::new(e)),
    })?;

    key.split('.')
        .try_fold(&root, |node, part| node.get(part))
        .cloned()
        .ok_or_else(unknown)
}

/// Unset values print as an empty line; strings print without quotes.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let mut cfg = AppConfig::default();
        cfg.defaults.package_manager = Some("pnpm".into());
        let value = get_config_value(&cfg, "defaults.package_manager").unwrap();
        assert_eq!(display_value(&value), "pnpm");
    }

    #[test]
    fn unset_key_prints_empty() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "paths.log_dir").unwrap();
        assert_eq!(display_value(&value), "");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "output.no_color").unwrap();
        assert_eq!(display_value(&value), "false");
    }
}
