use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::domain::DomainError;

/// A forward-slash path guaranteed to be relative.
///
/// Invariant: never absolute, never empty, no `.`/`..` or empty segments.
/// Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path is not a valid relative path (use `try_new` for fallible).
    pub fn new(path: impl AsRef<str>) -> Self {
        match Self::try_new(path.as_ref()) {
            Ok(p) => p,
            Err(e) => panic!("RelativePath invariant violated: {e}"),
        }
    }

    /// Fallible constructor. Backslashes are normalized to `/` and a leading
    /// `./` is dropped before checking.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = path.as_ref();
        let normalized = raw.replace('\\', "/");
        let normalized = normalized.strip_prefix("./").unwrap_or(&normalized);

        let invalid = |reason| DomainError::InvalidPath {
            path: raw.to_string(),
            reason,
        };

        if normalized.is_empty() {
            return Err(invalid("path is empty"));
        }
        if normalized.starts_with('/') || normalized.chars().nth(1) == Some(':') {
            return Err(invalid("absolute paths are not allowed"));
        }
        for segment in normalized.split('/') {
            match segment {
                "" => return Err(invalid("empty path segment")),
                "." | ".." => return Err(invalid("relative segments are not allowed")),
                _ => {}
            }
        }

        Ok(Self(normalized.to_string()))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: &str) -> Result<Self, DomainError> {
        Self::try_new(format!("{}/{}", self.0, segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Final segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Extension of the final segment, without the dot.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        name.rfind('.')
            .filter(|&i| i > 0)
            .map(|i| &name[i + 1..])
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// One virtual output file before materialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: RelativePath,
    pub content: String,
}

impl FileRecord {
    /// # Panics
    /// Panics when `path` is not a valid relative path. Generator paths are
    /// built from literals and validated names, so this is a defect.
    pub fn new(path: impl AsRef<str>, content: impl Into<String>) -> Self {
        Self {
            path: RelativePath::new(path),
            content: content.into(),
        }
    }

    /// Line-comment prefix for this file's format, if it has one.
    pub fn comment_prefix(&self) -> Option<&'static str> {
        let name = self.path.file_name();
        match name {
            "Dockerfile" | ".gitignore" | ".dockerignore" | ".env.example" => return Some("#"),
            _ => {}
        }
        match self.path.extension()? {
            "ts" | "tsx" | "js" | "jsx" | "mjs" | "prisma" => Some("//"),
            "yml" | "yaml" => Some("#"),
            _ => None,
        }
    }

    /// Copy of this record with `line` prepended as a comment.
    ///
    /// Files whose format has no line comments (JSON, Markdown, CSS) are
    /// returned unchanged.
    pub fn with_banner(&self, line: &str) -> Self {
        match self.comment_prefix() {
            Some(prefix) => Self {
                path: self.path.clone(),
                content: format!("{prefix} {line}\n{}", self.content),
            },
            None => self.clone(),
        }
    }
}
