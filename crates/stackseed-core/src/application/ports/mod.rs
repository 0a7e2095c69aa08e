//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stackseed-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations used to materialize a generated project
//!   - `PresetStore`: Bundled and user-defined presets
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The CLI calls the library functions and services directly)

pub mod output;

pub use output::{Filesystem, PresetStore};

#[cfg(test)]
pub use output::MockFilesystem;
