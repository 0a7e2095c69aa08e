//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackseed-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Preset, TemplateKind};
use crate::error::StackseedResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackseed_adapters::filesystem::LocalFilesystem` (production)
/// - `stackseed_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StackseedResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> StackseedResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> StackseedResult<()>;
}

/// Port for preset lookup.
///
/// Implemented by:
/// - `stackseed_adapters::preset_store::InMemoryPresetStore` (bundled presets
///   plus any loaded from a user directory)
pub trait PresetStore: Send + Sync {
    /// All presets, bundled first.
    fn list(&self) -> StackseedResult<Vec<Preset>>;

    /// Presets of one template family.
    fn list_kind(&self, kind: TemplateKind) -> StackseedResult<Vec<Preset>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.kind() == kind)
            .collect())
    }

    /// Get a preset by name (case-insensitive).
    fn get(&self, name: &str) -> StackseedResult<Preset>;

    /// Insert or replace a preset.
    fn insert(&self, preset: Preset) -> StackseedResult<()>;
}
