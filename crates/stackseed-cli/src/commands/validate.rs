//! Implementation of the `stackseed validate` command.
//!
//! Loads a configuration file, checks it against the family defaults (or a
//! preset) and reports every problem at once.  Nothing is written.

use serde_json::json;
use tracing::{debug, instrument};

use stackseed_adapters::ConfigFileLoader;
use stackseed_core::{
    PartialConfig, Preset,
    domain::{ConfigValidator, DomainError},
    prelude::PresetStore,
};

use crate::{
    cli::ValidateArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let partial = ConfigFileLoader::new().load(&args.file)?;

    let preset = match &args.preset {
        Some(name) => Some(super::preset_store(&config)?.get(name)?),
        None => None,
    };

    let errors = match &preset {
        Some(preset) => {
            ensure_same_template(preset, &partial)?;
            ConfigValidator::validate_against(&partial, &preset.config)
        }
        None => ConfigValidator::validate(&partial),
    };
    debug!(problems = errors.len(), "Validation finished");

    if output.is_json() {
        output.json(&json!({
            "file": args.file,
            "template": partial.kind(),
            "valid": errors.is_empty(),
            "errors": errors,
        }))?;
    }

    if !errors.is_empty() {
        return Err(CliError::Core(
            DomainError::InvalidConfiguration { errors }.into(),
        ));
    }

    output.success(&format!(
        "{} is a valid {} configuration",
        args.file.display(),
        partial.kind()
    ))?;
    Ok(())
}

/// Overrides must target the same family as the preset they extend.
pub(crate) fn ensure_same_template(preset: &Preset, partial: &PartialConfig) -> CliResult<()> {
    if preset.kind() == partial.kind() {
        return Ok(());
    }
    Err(CliError::Core(
        DomainError::TemplateMismatch {
            preset: preset.name.clone(),
            expected: preset.kind().to_string(),
            found: partial.kind().to_string(),
        }
        .into(),
    ))
}
