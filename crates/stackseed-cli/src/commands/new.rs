//! Implementation of the `stackseed new` command.
//!
//! Responsibility: turn CLI arguments, an optional config file and an
//! optional preset into a partial configuration, run the core pipeline, and
//! write the result. No generation logic lives here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use tracing::{debug, info, instrument};

use stackseed_adapters::{
    ConfigFileLoader, InMemoryPresetStore, LocalFilesystem, MemoryFilesystem,
};
use stackseed_core::{
    GenerateOptions, GeneratedProject, GenerationResult, PartialConfig, Preset, TemplateAssembler,
    TemplateKind,
    domain::{Choice, ChoiceSet, FormsFeature, PackageManager, RbacFeature, WebAppFeature},
    prelude::{PresetStore, ProjectWriter, WriteOptions, WriteReport},
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    commands::validate::ensure_same_template,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}";

/// Execute the `stackseed new` command.
///
/// Dispatch sequence:
/// 1. Check the project name can be a directory name
/// 2. Resolve the preset and build the partial configuration
/// 3. Run the pipeline (validate, merge, generate)
/// 4. Early-exit if `--dry-run`
/// 5. Confirm with user unless `--yes`, `--quiet` or JSON output
/// 6. Write the files and print next steps
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Name
    validate_project_name(&args.name)?;

    // 2. Configuration
    let store = super::preset_store(&config)?;
    let preset = resolve_preset(&args, &config, &store)?;
    let partial = build_partial(&args, &config, preset.as_ref())?;
    if let Some(preset) = &preset {
        ensure_same_template(preset, &partial)?;
    }

    debug!(
        template = %partial.kind(),
        preset = preset.as_ref().map(|p| p.name.as_str()).unwrap_or("none"),
        "Partial configuration built"
    );

    // 3. Pipeline
    let project = generate(&partial, preset.as_ref(), args.stamp)?;
    let root = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(&args.name);

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        return dry_run(project, &root, &output);
    }

    // 5. Confirm
    if !global.quiet && !args.yes && !output.is_json() {
        show_summary(&project, &root, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 6. Write
    info!(path = %root.display(), files = project.files.len(), "Writing project");
    let report = write_project(&project, &root, args.force, &output)?;
    info!(bytes = report.bytes_written, "Project written");

    if output.is_json() {
        output.json(&json!({
            "root": report.root,
            "template": project.config.kind(),
            "files_written": report.files_written,
            "bytes_written": report.bytes_written,
            "package_scripts": project.package_scripts,
            "instructions": project.instructions,
        }))?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' created at {} ({} files)",
        args.name,
        root.display(),
        report.files_written
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        for step in &project.instructions {
            output.print(&format!("  {step}"))?;
        }
    }

    Ok(())
}

// ── Name ──────────────────────────────────────────────────────────────────────

/// Reject names that cannot become a single directory.  The character rules
/// for `project_name` are the validator's job.
fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid(
            "name cannot contain path separators (use --output for the parent directory)",
        ));
    }
    Ok(())
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// `--preset`, or the settings default when nothing else picks the family.
fn resolve_preset(
    args: &NewArgs,
    config: &AppConfig,
    store: &InMemoryPresetStore,
) -> CliResult<Option<Preset>> {
    let name = match (&args.preset, &config.defaults.preset) {
        (Some(name), _) => Some(name),
        (None, Some(name)) if args.template.is_none() && args.file.is_none() => Some(name),
        _ => None,
    };

    name.map(|name| store.get(name).map_err(CliError::from))
        .transpose()
}

fn build_partial(
    args: &NewArgs,
    config: &AppConfig,
    preset: Option<&Preset>,
) -> CliResult<PartialConfig> {
    let mut partial = match &args.file {
        Some(path) => load_file(path, args)?,
        None => PartialConfig::empty(resolve_kind(args, config, preset)?),
    };

    // The positional name always wins over a name in the file.
    partial.set_project_name(args.name.as_str());
    apply_flags(&mut partial, args)?;

    // Settings defaults only fill gaps in the family defaults, never in a
    // preset the user picked.
    if preset.is_none() {
        if let Some(raw) = &config.defaults.package_manager {
            let slot = package_manager_slot(&mut partial);
            if slot.is_none() {
                *slot = Some(Choice::parse(raw));
            }
        }
    }

    Ok(partial)
}

fn load_file(path: &Path, args: &NewArgs) -> CliResult<PartialConfig> {
    let loaded = ConfigFileLoader::new().load(path)?;
    match args.template {
        Some(template) if TemplateKind::from(template) != loaded.kind() => {
            Err(CliError::InvalidInput {
                message: format!(
                    "--template {template} conflicts with template '{}' in {}",
                    loaded.kind(),
                    path.display()
                ),
            })
        }
        _ => Ok(loaded),
    }
}

fn resolve_kind(
    args: &NewArgs,
    config: &AppConfig,
    preset: Option<&Preset>,
) -> CliResult<TemplateKind> {
    if let Some(template) = args.template {
        return Ok(template.into());
    }
    if let Some(preset) = preset {
        return Ok(preset.kind());
    }
    match &config.defaults.template {
        Some(raw) => TemplateKind::from_str(raw).map_err(|e| CliError::ConfigError {
            message: format!("defaults.template: {e}"),
            source: None,
        }),
        None => Ok(TemplateKind::Webapp),
    }
}

/// Layer the command-line flags onto the partial.
fn apply_flags(partial: &mut PartialConfig, args: &NewArgs) -> CliResult<()> {
    if let Some(pm) = args.package_manager {
        *package_manager_slot(partial) = Some(PackageManager::from(pm).into());
    }

    let kind = partial.kind();
    let webapp_only = |flag: &str| CliError::InvalidInput {
        message: format!("{flag} only applies to the webapp template, not {kind}"),
    };

    match partial {
        PartialConfig::Webapp(p) => {
            if let Some(features) = feature_list::<WebAppFeature>(args) {
                p.features = Some(features);
            }
            if args.javascript {
                p.use_typescript = Some(false);
            }
            if args.no_src_dir {
                p.use_src_directory = Some(false);
            }
            if args.pages_router {
                p.use_app_router = Some(false);
            }
        }
        PartialConfig::Forms(p) => {
            if let Some(features) = feature_list::<FormsFeature>(args) {
                p.features = Some(features);
            }
            if args.no_src_dir {
                p.use_src_directory = Some(false);
            }
        }
        PartialConfig::Rbac(p) => {
            if let Some(features) = feature_list::<RbacFeature>(args) {
                p.features = Some(features);
            }
            if args.no_src_dir {
                p.use_src_directory = Some(false);
            }
        }
    }

    if kind != TemplateKind::Webapp {
        if args.javascript {
            return Err(webapp_only("--javascript"));
        }
        if args.pages_router {
            return Err(webapp_only("--pages-router"));
        }
    }

    Ok(())
}

/// `--no-features` clears the list; `--feature` replaces it.  Unknown names
/// are kept so the validator reports them alongside every other problem.
fn feature_list<T: ChoiceSet + FromStr>(args: &NewArgs) -> Option<Vec<Choice<T>>> {
    if args.no_features {
        return Some(Vec::new());
    }
    if args.features.is_empty() {
        return None;
    }
    Some(args.features.iter().map(|raw| Choice::parse(raw)).collect())
}

fn package_manager_slot(partial: &mut PartialConfig) -> &mut Option<Choice<PackageManager>> {
    match partial {
        PartialConfig::Webapp(p) => &mut p.package_manager,
        PartialConfig::Forms(p) => &mut p.package_manager,
        PartialConfig::Rbac(p) => &mut p.package_manager,
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

fn generate(
    partial: &PartialConfig,
    preset: Option<&Preset>,
    stamp: bool,
) -> CliResult<GeneratedProject> {
    let options = if stamp {
        GenerateOptions::default().with_banner(Utc::now())
    } else {
        GenerateOptions::default()
    };

    let assembler = TemplateAssembler::with_options(options);
    let result = match preset {
        Some(preset) => assembler.assemble_with_base(partial, &preset.config),
        None => assembler.assemble(partial),
    };

    result.into_result().map_err(|e| CliError::Core(e.into()))
}

fn dry_run(project: GeneratedProject, root: &Path, output: &OutputManager) -> CliResult<()> {
    // Route the files through the writer so the layout is checked exactly
    // as a real run would, without touching the disk.
    let memory = MemoryFilesystem::new();
    let report = ProjectWriter::new(Box::new(memory.clone()))
        .write(&project, root, WriteOptions::default())?;

    if output.is_json() {
        output.json(&GenerationResult::Success(project))?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create {} files ({} bytes) at {}",
        report.files_written,
        report.bytes_written,
        root.display()
    ))?;
    if root.exists() {
        output.warning(&format!(
            "{} already exists; writing would require --force",
            root.display()
        ))?;
    }
    for path in memory.list_files() {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        output.print(&format!("  {}", relative.display()))?;
    }
    Ok(())
}

fn write_project(
    project: &GeneratedProject,
    root: &Path,
    force: bool,
    output: &OutputManager,
) -> CliResult<WriteReport> {
    let progress = if output.shows_progress() {
        let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        ProgressBar::new(project.files.len() as u64).with_style(style)
    } else {
        ProgressBar::hidden()
    };

    let writer = ProjectWriter::new(Box::new(LocalFilesystem::new()));
    let options = WriteOptions { overwrite: force };
    let result = writer.write_with_progress(project, root, options, |file| {
        progress.set_message(file.path.to_string());
        progress.inc(1);
    });
    progress.finish_and_clear();

    result.map_err(CliError::from)
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_summary(project: &GeneratedProject, root: &Path, out: &OutputManager) -> CliResult<()> {
    out.header("Project")?;
    out.print(&format!("  Name:      {}", project.config.project_name()))?;
    out.print(&format!("  Template:  {}", project.config.kind()))?;
    out.print(&format!("  Location:  {}", root.display()))?;
    out.print(&format!(
        "  Files:     {} ({} bytes)",
        project.files.len(),
        project.total_bytes()
    ))?;
    out.print("")?;
    Ok(())
}

/// Ask before writing.  Without a terminal there is nobody to ask.
#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(true);
    }

    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IntoCli as _;

    if !io::stdin().is_terminal() {
        return Ok(true);
    }

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .with_cli_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .with_cli_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
