//! Implementation of the `stackseed presets` command.

use stackseed_core::{Preset, TemplateKind, prelude::PresetStore};

use crate::{
    cli::{ListFormat, PresetsArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: PresetsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let store = super::preset_store(&config)?;
    let presets = match args.template {
        Some(template) => store.list_kind(TemplateKind::from(template))?,
        None => store.list()?,
    };

    // `--output-format json` wins over `--format`.
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Presets:")?;
            let width = presets.iter().map(|p| p.name.len()).max().unwrap_or(0);
            for preset in &presets {
                output.print(&format!(
                    "  {:<width$}  {:<6}  {}",
                    preset.name,
                    preset.kind().to_string(),
                    preset.description,
                ))?;
            }
            if presets.is_empty() {
                output.print("  (none)")?;
            }
        }
        ListFormat::Json => output.json(&presets)?,
        ListFormat::List => {
            for preset in &presets {
                output.print(&preset.name)?;
            }
        }
        ListFormat::Csv => {
            output.print("name,template,description")?;
            for preset in &presets {
                output.print(&csv_row(preset))?;
            }
        }
    }

    Ok(())
}

fn csv_row(preset: &Preset) -> String {
    let description = if preset.description.contains([',', '"']) {
        format!("\"{}\"", preset.description.replace('"', "\"\""))
    } else {
        preset.description.clone()
    };
    format!("{},{},{}", preset.name, preset.kind(), description)
}
