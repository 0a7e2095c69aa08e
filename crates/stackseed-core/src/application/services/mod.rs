//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project" or "write it to disk".

pub mod assembler;
pub mod project_writer;

pub use assembler::{
    GenerateOptions, GeneratedProject, GenerationResult, TemplateAssembler, banner_line,
};
pub use project_writer::{ProjectWriter, WriteOptions, WriteReport};
