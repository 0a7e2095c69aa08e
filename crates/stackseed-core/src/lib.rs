//! stackseed Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the stackseed
//! project scaffolding tool: configuration families, validation, merge,
//! section generators, presets, and the pipeline that ties them together.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stackseed-cli (CLI)           │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (TemplateAssembler, ProjectWriter)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: Filesystem, PresetStore)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stackseed-adapters (Infrastructure)  │
//! │ (LocalFilesystem, InMemoryPresetStore)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Configs, Validator, Merge, Generators) │
//! │           No I/O, deterministic         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use stackseed_core::{GenerationResult, PartialConfig, generate};
//!
//! match generate(&PartialConfig::default()) {
//!     GenerationResult::Success(project) => {
//!         assert!(project.file("package.json").is_some());
//!     }
//!     GenerationResult::Failure { errors } => panic!("{errors:?}"),
//! }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

pub use application::{GenerateOptions, GeneratedProject, GenerationResult, TemplateAssembler};
pub use domain::{ConfigError, FileRecord, FullConfig, PartialConfig, Preset, TemplateKind};
pub use error::{StackseedError, StackseedResult};

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GeneratedProject, GenerationResult, ProjectWriter, TemplateAssembler,
        WriteOptions, WriteReport,
        ports::{Filesystem, PresetStore},
    };
    pub use crate::domain::{
        ChoiceSet, ConfigError, ConfigValidator, FileRecord, FullConfig, PartialConfig, Preset,
        RelativePath, TemplateKind,
    };
    pub use crate::error::{ErrorCategory, StackseedError, StackseedResult};
}

/// Validate a partial configuration against its family defaults.
///
/// Returns every problem found; an empty list means the config is valid.
pub fn validate_config(partial: &PartialConfig) -> Vec<ConfigError> {
    domain::ConfigValidator::validate(partial)
}

/// Run the full pipeline on a partial configuration.
pub fn generate(partial: &PartialConfig) -> GenerationResult {
    TemplateAssembler::new().assemble(partial)
}

/// Run the pipeline with `preset` standing in for the family defaults.
pub fn generate_from_preset(preset: &Preset, overrides: &PartialConfig) -> GenerationResult {
    TemplateAssembler::new().assemble_with_base(overrides, &preset.config)
}

/// Bundled presets, in display order.
pub fn presets() -> &'static [Preset] {
    domain::presets::builtin()
}

/// Look up a bundled preset by name (case-insensitive).
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    domain::presets::find(name)
}
