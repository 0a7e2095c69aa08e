//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod init;
pub mod new;
pub mod presets;
pub mod validate;

use tracing::{debug, warn};

use stackseed_adapters::InMemoryPresetStore;

use crate::{config::AppConfig, error::CliResult};

/// Bundled presets plus any user presets from the configured directory.
///
/// A missing default directory is normal; a missing directory the user
/// configured explicitly is worth a warning.
pub(crate) fn preset_store(config: &AppConfig) -> CliResult<InMemoryPresetStore> {
    let store = InMemoryPresetStore::with_builtin();

    let Some(dir) = config.presets_dir() else {
        return Ok(store);
    };

    if dir.is_dir() {
        let loaded = store.load_user_presets(&dir)?;
        debug!(dir = %dir.display(), count = loaded, "User presets loaded");
    } else if config.paths.presets_dir.is_some() {
        warn!(dir = %dir.display(), "Configured presets directory does not exist");
    }

    Ok(store)
}
