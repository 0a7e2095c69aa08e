// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for stackseed.
//!
//! Pure business logic: configuration families, validation, merge, section
//! generators and presets. Nothing here touches the filesystem, the network
//! or the clock; the file tree is built in memory and handed to the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: generators are pure functions of a config
//! - **Deterministic**: the same config always yields the same files
//! - **Immutable entities**: configs and file records are Clone + PartialEq

// Public API - what the world sees
pub mod config;
pub mod defaults;
pub mod entities;
pub mod error;
pub mod family;
pub mod generators;
pub mod merge;
pub mod presets;
pub mod validation;
pub mod value_objects;

// Re-exports for convenience
pub use config::{FullConfig, PartialConfig};
pub use entities::{FileRecord, RelativePath, RenderContext};
pub use error::{DomainError, ErrorCategory};
pub use family::TemplateFamily;
pub use generators::Section;
pub use merge::{Merge, merge_config};
pub use presets::Preset;
pub use validation::{ConfigError, ConfigValidator};

pub use value_objects::{
    Choice, ChoiceSet, DatabaseProvider, FieldKind, FormsFeature, Orm, PackageManager,
    RbacFeature, Role, SessionStrategy, TemplateKind, ValidationMode, WebAppFeature,
};
