//! In-memory preset store with the bundled presets and optional user presets.
//!
//! User presets live in a directory as `*.toml` or `*.json` files, one preset
//! per file. The file stem is the preset name; an optional `description` key
//! is lifted out and every other key is a partial configuration, merged onto
//! the family defaults:
//!
//! ```toml
//! # ~/.config/stackseed/presets/shop.toml
//! description = "Storefront on MySQL"
//! template = "webapp"
//! package_manager = "pnpm"
//!
//! [database]
//! provider = "mysql"
//! ```

use std::{
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use stackseed_core::{
    application::{ApplicationError, ports::PresetStore},
    domain::{ConfigValidator, DomainError, Preset, defaults, merge_config, presets},
    error::{StackseedError, StackseedResult},
};

use crate::config_loader::{ConfigFileLoader, ConfigFormat};

const DESCRIPTION_KEY: &str = "description";

/// Thread-safe in-memory preset store.
///
/// Presets keep insertion order; inserting a name that already exists
/// (case-insensitively) replaces the earlier preset in place.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPresetStore {
    inner: Arc<RwLock<Vec<Preset>>>,
}

impl InMemoryPresetStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the bundled presets loaded.
    pub fn with_builtin() -> Self {
        Self {
            inner: Arc::new(RwLock::new(presets::builtin().to_vec())),
        }
    }

    /// Get the number of presets.
    pub fn len(&self) -> usize {
        self.inner.read().map(|presets| presets.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load every valid preset file under `dir`.
    ///
    /// Returns how many presets were added or replaced. Files that fail to
    /// parse or validate are **skipped with a `WARN` log** rather than
    /// failing the whole batch.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::ConfigLoad`] if `dir` does not exist.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_user_presets(&self, dir: &Path) -> StackseedResult<usize> {
        if !dir.is_dir() {
            return Err(ApplicationError::ConfigLoad {
                path: dir.to_path_buf(),
                reason: "preset directory not found".into(),
            }
            .into());
        }

        let mut loaded = 0;
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable preset entry");
                    None
                }
            });

        for entry in entries {
            let path = entry.path();
            if !entry.file_type().is_file() || ConfigFormat::from_path(path).is_none() {
                continue;
            }

            match load_preset_file(path) {
                Ok(preset) => {
                    debug!(name = %preset.name, template = %preset.kind(), "loaded user preset");
                    self.insert(preset)?;
                    loaded += 1;
                }
                Err(e) => {
                    // One bad preset must not block the others.
                    warn!(
                        file  = %path.display(),
                        error = %e,
                        "skipping preset file due to load error"
                    );
                }
            }
        }

        debug!(count = loaded, "finished loading user presets");
        Ok(loaded)
    }
}

/// Parse, validate and merge one preset file.
fn load_preset_file(path: &Path) -> StackseedResult<Preset> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if name.is_empty() {
        return Err(ApplicationError::ConfigLoad {
            path: path.to_path_buf(),
            reason: "preset file has no usable name".into(),
        }
        .into());
    }

    let loader = ConfigFileLoader::new();
    let mut document = loader.read_document(path)?;
    let description = document
        .as_object_mut()
        .and_then(|table| table.remove(DESCRIPTION_KEY))
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("User preset from {}", path.display()));

    let partial = ConfigFileLoader::from_document(path, document)?;
    let errors = ConfigValidator::validate(&partial);
    if !errors.is_empty() {
        return Err(DomainError::InvalidConfiguration { errors }.into());
    }

    let base = defaults::defaults_for(partial.kind());
    let config = merge_config(&partial, &base).ok_or_else(|| StackseedError::Internal {
        message: format!("{} preset merged onto a {} base", partial.kind(), base.kind()),
    })?;

    Ok(Preset::new(name, description, config))
}

impl PresetStore for InMemoryPresetStore {
    fn list(&self) -> StackseedResult<Vec<Preset>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.clone())
    }

    fn get(&self, name: &str) -> StackseedResult<Preset> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let wanted = name.trim();
        inner
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| {
                DomainError::UnknownPreset {
                    name: wanted.to_string(),
                }
                .into()
            })
    }

    fn insert(&self, preset: Preset) -> StackseedResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        match inner
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&preset.name))
        {
            Some(existing) => {
                debug!(name = %preset.name, "replacing preset");
                *existing = preset;
            }
            None => inner.push(preset),
        }
        Ok(())
    }
}
