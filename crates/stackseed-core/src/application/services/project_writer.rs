//! Project Writer - materializes a generated project.
//!
//! Writes every file of a [`GeneratedProject`] under a root directory through
//! the [`Filesystem`] port, with rollback of a freshly created root on
//! failure.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Filesystem, services::GeneratedProject},
    domain::FileRecord,
    error::StackseedResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Write into an existing root instead of refusing.
    pub overwrite: bool,
}

/// What a successful write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    pub root: PathBuf,
    pub files_written: usize,
    pub bytes_written: usize,
}

/// Writes generated projects to a filesystem.
pub struct ProjectWriter {
    filesystem: Box<dyn Filesystem>,
}

impl ProjectWriter {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    pub fn write(
        &self,
        project: &GeneratedProject,
        root: &Path,
        options: WriteOptions,
    ) -> StackseedResult<WriteReport> {
        self.write_with_progress(project, root, options, |_| {})
    }

    /// Write the project, calling `on_file` after each file lands.
    #[instrument(
        skip_all,
        fields(
            root = %root.display(),
            files = project.files.len(),
            overwrite = options.overwrite
        )
    )]
    pub fn write_with_progress(
        &self,
        project: &GeneratedProject,
        root: &Path,
        options: WriteOptions,
        mut on_file: impl FnMut(&FileRecord),
    ) -> StackseedResult<WriteReport> {
        let existed = self.filesystem.exists(root);
        if existed && !options.overwrite {
            return Err(ApplicationError::ProjectExists {
                path: root.to_path_buf(),
            }
            .into());
        }

        match self.write_all(project, root, &mut on_file) {
            Ok(report) => {
                info!(bytes = report.bytes_written, "Successfully wrote all files");
                Ok(report)
            }
            Err(e) => {
                if existed {
                    // Never delete a directory we did not create.
                    warn!("Write failed inside an existing directory; leaving it as is");
                } else {
                    warn!("Write failed, attempting rollback");
                    if let Err(rollback) = self.rollback(root) {
                        warn!(error = %rollback, "Rollback failed");
                    } else {
                        info!("Rollback successful");
                    }
                }
                Err(e)
            }
        }
    }

    fn write_all(
        &self,
        project: &GeneratedProject,
        root: &Path,
        on_file: &mut impl FnMut(&FileRecord),
    ) -> StackseedResult<WriteReport> {
        self.filesystem.create_dir_all(root)?;

        let mut bytes_written = 0;
        for file in &project.files {
            let path = root.join(file.path.as_path());
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &file.content)?;
            bytes_written += file.content.len();
            on_file(file);
        }

        Ok(WriteReport {
            root: root.to_path_buf(),
            files_written: project.files.len(),
            bytes_written,
        })
    }

    fn rollback(&self, root: &Path) -> Result<(), ApplicationError> {
        self.filesystem
            .remove_dir_all(root)
            .map_err(|e| ApplicationError::RollbackFailed {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })
    }
}
