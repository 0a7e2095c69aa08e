//! Template Assembler - the generation pipeline.
//!
//! 1. Validate the partial config against its base (stop on errors)
//! 2. Merge the partial onto the base
//! 3. Run every registered section of the family, in table order
//! 4. Assert that no two files share a path
//! 5. Derive package scripts and setup instructions
//!
//! Nothing here touches the filesystem; see [`ProjectWriter`] for that.
//!
//! [`ProjectWriter`]: crate::application::services::ProjectWriter

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, instrument};

use crate::domain::{
    ConfigError, ConfigValidator, DomainError, FileRecord, FullConfig, PartialConfig,
    TemplateFamily, defaults, merge_config,
};

/// Per-run knobs that do not belong in the project configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Prepend `Generated by stackseed on <time>` to files that take line
    /// comments. `None` keeps the output byte-for-byte deterministic.
    pub banner: Option<DateTime<Utc>>,
}

impl GenerateOptions {
    pub fn with_banner(mut self, at: DateTime<Utc>) -> Self {
        self.banner = Some(at);
        self
    }
}

/// Banner line written for `at`.
pub fn banner_line(at: DateTime<Utc>) -> String {
    format!(
        "Generated by stackseed on {}",
        at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// A successfully generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    /// The merged configuration the files were generated from.
    pub config: FullConfig,
    /// Output files in section order; paths are unique.
    pub files: Vec<FileRecord>,
    pub package_scripts: BTreeMap<String, String>,
    pub instructions: Vec<String>,
}

impl GeneratedProject {
    pub fn file(&self, path: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path.as_str() == path)
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.content.len()).sum()
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success(GeneratedProject),
    /// Every validation problem found; no files were produced.
    Failure { errors: Vec<ConfigError> },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn project(&self) -> Option<&GeneratedProject> {
        match self {
            Self::Success(project) => Some(project),
            Self::Failure { .. } => None,
        }
    }

    pub fn errors(&self) -> &[ConfigError] {
        match self {
            Self::Success(_) => &[],
            Self::Failure { errors } => errors,
        }
    }

    /// Convert into a `Result`, wrapping validation failures in
    /// [`DomainError::InvalidConfiguration`].
    pub fn into_result(self) -> Result<GeneratedProject, DomainError> {
        match self {
            Self::Success(project) => Ok(project),
            Self::Failure { errors } => Err(DomainError::InvalidConfiguration { errors }),
        }
    }
}

// `{"success": true, ...project}` or `{"success": false, "errors": [...]}`
impl Serialize for GenerationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(project) => {
                let mut s = serializer.serialize_struct("GenerationResult", 5)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("config", &project.config)?;
                s.serialize_field("files", &project.files)?;
                s.serialize_field("package_scripts", &project.package_scripts)?;
                s.serialize_field("instructions", &project.instructions)?;
                s.end()
            }
            Self::Failure { errors } => {
                let mut s = serializer.serialize_struct("GenerationResult", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("errors", errors)?;
                s.end()
            }
        }
    }
}

/// Runs the generation pipeline.
#[derive(Debug, Clone, Default)]
pub struct TemplateAssembler {
    options: GenerateOptions,
}

impl TemplateAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Generate from a partial merged onto its family defaults.
    pub fn assemble(&self, partial: &PartialConfig) -> GenerationResult {
        self.assemble_with_base(partial, &defaults::defaults_for(partial.kind()))
    }

    /// Generate from a partial merged onto `base` (a preset, usually).
    #[instrument(skip_all, fields(template = %partial.kind()))]
    pub fn assemble_with_base(&self, partial: &PartialConfig, base: &FullConfig) -> GenerationResult {
        let errors = ConfigValidator::validate_against(partial, base);
        if !errors.is_empty() {
            info!(errors = errors.len(), "Configuration rejected");
            return GenerationResult::Failure { errors };
        }

        let Some(config) = merge_config(partial, base) else {
            // Only reachable on a family mismatch, which validation already reports.
            return GenerationResult::Failure {
                errors: vec![ConfigError {
                    path: "template".into(),
                    message: format!(
                        "{} overrides cannot be applied to a {} base",
                        partial.kind(),
                        base.kind()
                    ),
                }],
            };
        };

        let mut project = match &config {
            FullConfig::Webapp(c) => run(c),
            FullConfig::Forms(c) => run(c),
            FullConfig::Rbac(c) => run(c),
        };

        if let Some(at) = self.options.banner {
            let line = banner_line(at);
            project.files = project.files.iter().map(|f| f.with_banner(&line)).collect();
        }

        info!(
            project = %config.project_name(),
            files = project.files.len(),
            "Project assembled"
        );

        GenerationResult::Success(GeneratedProject {
            config,
            files: project.files,
            package_scripts: project.package_scripts,
            instructions: project.instructions,
        })
    }
}

struct Assembled {
    files: Vec<FileRecord>,
    package_scripts: BTreeMap<String, String>,
    instructions: Vec<String>,
}

fn run<F: TemplateFamily>(config: &F) -> Assembled {
    let mut files = Vec::new();
    for section in F::sections() {
        let generated = section.run(config);
        debug!(section = section.name, files = generated.len(), "Section generated");
        files.extend(generated);
    }
    assert_unique_paths(&files);

    Assembled {
        files,
        package_scripts: config.package_scripts(),
        instructions: config.instructions(),
    }
}

/// # Panics
/// Panics on a duplicate path. Sections own disjoint namespaces, so a
/// collision is a generator defect, never a configuration problem.
fn assert_unique_paths(files: &[FileRecord]) {
    let mut seen = HashSet::with_capacity(files.len());
    for file in files {
        if !seen.insert(file.path.as_str()) {
            panic!("duplicate output path '{}'", file.path);
        }
    }
}
