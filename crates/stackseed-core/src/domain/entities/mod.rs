pub mod file_record;
pub mod render_context;

pub use file_record::{FileRecord, RelativePath};
pub use render_context::RenderContext;
