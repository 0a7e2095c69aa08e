//! Preset store adapters.

mod memory;

pub use memory::InMemoryPresetStore;
