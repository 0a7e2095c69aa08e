//! Infrastructure adapters for stackseed.
//!
//! This crate implements the ports defined in `stackseed-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod config_loader;
pub mod filesystem;
pub mod preset_store;

// Re-export commonly used adapters
pub use config_loader::{ConfigFileLoader, ConfigFormat};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use preset_store::InMemoryPresetStore;
