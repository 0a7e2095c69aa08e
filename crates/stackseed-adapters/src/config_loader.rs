//! Configuration file loader.
//!
//! Reads a partial configuration from a `.toml` or `.json` file. Both formats
//! share one schema:
//!
//! ```toml
//! template = "webapp"          # webapp | forms | rbac (default: webapp)
//! project_name = "shop"
//! package_manager = "pnpm"
//! features = ["database", "auth"]
//!
//! [database]
//! provider = "postgresql"
//! orm = "prisma"
//! ```
//!
//! Keys that do not belong to the selected family are load errors. Values
//! are only checked later, by the validator, so an unknown package manager
//! loads fine and is reported with every other problem.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, instrument};

use stackseed_core::{
    PartialConfig, application::ApplicationError, domain::DomainError, error::StackseedResult,
};

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse `content` into a generic document.
    pub fn parse(self, content: &str) -> Result<Value, String> {
        match self {
            Self::Toml => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "toml",
            Self::Json => "json",
        })
    }
}

/// Loads partial configurations from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigFileLoader;

impl ConfigFileLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a partial configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::ConfigLoad`] when the file cannot be read,
    /// has an unsupported extension, fails to parse, or uses keys outside
    /// the selected family's schema.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> StackseedResult<PartialConfig> {
        let document = self.read_document(path)?;
        let partial = Self::from_document(path, document)?;
        debug!(template = %partial.kind(), "configuration loaded");
        Ok(partial)
    }

    /// Read and parse a configuration file without interpreting its keys.
    pub fn read_document(&self, path: &Path) -> StackseedResult<Value> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| load_error(path, "unsupported file extension (expected .toml or .json)"))?;

        let content = fs::read_to_string(path).map_err(|e| load_error(path, e))?;
        format.parse(&content).map_err(|e| load_error(path, e).into())
    }

    /// Interpret a parsed document as a partial configuration.
    pub fn from_document(path: &Path, document: Value) -> StackseedResult<PartialConfig> {
        PartialConfig::from_value(document).map_err(|e| match e {
            // Unknown `template` values are reported like any other bad choice.
            DomainError::UnknownChoice { .. } => e.into(),
            other => load_error(path, other).into(),
        })
    }
}

fn load_error(path: &Path, reason: impl fmt::Display) -> ApplicationError {
    ApplicationError::ConfigLoad {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackseed_core::TemplateKind;
    use stackseed_core::error::StackseedError;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.TOML")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn loads_toml_and_json_alike() {
        let dir = TempDir::new().unwrap();
        let toml_path = write(
            &dir,
            "app.toml",
            "template = \"rbac\"\nproject_name = \"portal\"\nroles = [\"admin\", \"user\"]\n",
        );
        let json_path = write(
            &dir,
            "app.json",
            r#"{"template": "rbac", "project_name": "portal", "roles": ["admin", "user"]}"#,
        );

        let loader = ConfigFileLoader::new();
        let from_toml = loader.load(&toml_path).unwrap();
        let from_json = loader.load(&json_path).unwrap();
        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.kind(), TemplateKind::Rbac);
    }

    #[test]
    fn missing_template_defaults_to_webapp() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.toml", "project_name = \"shop\"\n");
        assert_eq!(ConfigFileLoader::new().load(&path).unwrap().kind(), TemplateKind::Webapp);
    }

    #[test]
    fn unknown_keys_are_load_errors() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.json", r#"{"projectName": "shop"}"#);
        let err = ConfigFileLoader::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            StackseedError::Application(ApplicationError::ConfigLoad { .. })
        ));
        assert!(err.to_string().contains("projectName"));
    }

    #[test]
    fn syntax_errors_name_the_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.toml", "project_name = \n");
        let err = ConfigFileLoader::new().load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.yaml", "project_name: shop\n");
        assert!(ConfigFileLoader::new().load(&path).is_err());
    }

    #[test]
    fn unknown_template_is_a_domain_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.toml", "template = \"cms\"\n");
        let err = ConfigFileLoader::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            StackseedError::Domain(DomainError::UnknownChoice { .. })
        ));
    }
}
