//! Configuration families.
//!
//! Each family has a *full* config (every field populated, consumed by the
//! generators) and a *partial* config (every field optional, supplied by the
//! caller). [`PartialConfig`] and [`FullConfig`] tag them by family.

pub mod forms;
pub mod rbac;
pub mod webapp;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::value_objects::TemplateKind;

pub use forms::{
    FieldSpec, FormSpec, FormValidationConfig, FormsConfig, PartialFieldSpec,
    PartialFormSpec, PartialFormValidationConfig, PartialFormsConfig, StepSpec,
};
pub use rbac::{
    PartialRbacConfig, PartialRbacSecurityConfig, PartialRouteRule, RbacConfig,
    RbacSecurityConfig, RouteRule,
};
pub use webapp::{
    DatabaseConfig, ModelsConfig, PartialDatabaseConfig, PartialModelsConfig,
    PartialPerformanceConfig, PartialSecurityConfig, PartialValidationConfig,
    PartialWebAppConfig, PerformanceConfig, SecurityConfig, ValidationConfig, WebAppConfig,
};

/// Key naming the family in serialized configs.
pub const TEMPLATE_KEY: &str = "template";

/// A caller-supplied configuration for one template family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "template", rename_all = "lowercase")]
pub enum PartialConfig {
    Webapp(PartialWebAppConfig),
    Forms(PartialFormsConfig),
    Rbac(PartialRbacConfig),
}

impl Default for PartialConfig {
    /// An empty web-app configuration: generates the web-app defaults.
    fn default() -> Self {
        Self::Webapp(PartialWebAppConfig::default())
    }
}

impl PartialConfig {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Webapp(_) => TemplateKind::Webapp,
            Self::Forms(_) => TemplateKind::Forms,
            Self::Rbac(_) => TemplateKind::Rbac,
        }
    }

    /// An empty partial for `kind`.
    pub fn empty(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Webapp => Self::Webapp(PartialWebAppConfig::default()),
            TemplateKind::Forms => Self::Forms(PartialFormsConfig::default()),
            TemplateKind::Rbac => Self::Rbac(PartialRbacConfig::default()),
        }
    }

    /// Overwrite the project name, whatever the family.
    pub fn set_project_name(&mut self, name: impl Into<String>) {
        let name = Some(name.into());
        match self {
            Self::Webapp(p) => p.project_name = name,
            Self::Forms(p) => p.project_name = name,
            Self::Rbac(p) => p.project_name = name,
        }
    }

    /// Build a partial from a JSON document.
    ///
    /// The optional `template` key selects the family (default `webapp`);
    /// every other key must belong to that family.
    pub fn from_value(mut value: serde_json::Value) -> Result<Self, DomainError> {
        let malformed = |message: String| DomainError::MalformedConfig { message };

        let object = value
            .as_object_mut()
            .ok_or_else(|| malformed("expected a table of configuration keys".into()))?;

        let kind = match object.remove(TEMPLATE_KEY) {
            None => TemplateKind::Webapp,
            Some(serde_json::Value::String(raw)) => raw.parse()?,
            Some(other) => {
                return Err(malformed(format!(
                    "'{TEMPLATE_KEY}' must be a string, found {other}"
                )));
            }
        };

        let parsed = match kind {
            TemplateKind::Webapp => serde_json::from_value(value).map(Self::Webapp),
            TemplateKind::Forms => serde_json::from_value(value).map(Self::Forms),
            TemplateKind::Rbac => serde_json::from_value(value).map(Self::Rbac),
        };
        parsed.map_err(|e| malformed(e.to_string()))
    }
}

/// A fully-populated configuration for one template family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "lowercase")]
pub enum FullConfig {
    Webapp(WebAppConfig),
    Forms(FormsConfig),
    Rbac(RbacConfig),
}

impl FullConfig {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Webapp(_) => TemplateKind::Webapp,
            Self::Forms(_) => TemplateKind::Forms,
            Self::Rbac(_) => TemplateKind::Rbac,
        }
    }

    pub fn project_name(&self) -> &str {
        match self {
            Self::Webapp(c) => &c.project_name,
            Self::Forms(c) => &c.project_name,
            Self::Rbac(c) => &c.project_name,
        }
    }

    /// A partial with every field set to this config's values.
    pub fn to_partial(&self) -> PartialConfig {
        match self {
            Self::Webapp(c) => PartialConfig::Webapp(c.into()),
            Self::Forms(c) => PartialConfig::Forms(c.into()),
            Self::Rbac(c) => PartialConfig::Rbac(c.into()),
        }
    }
}

impl From<WebAppConfig> for FullConfig {
    fn from(c: WebAppConfig) -> Self {
        Self::Webapp(c)
    }
}

impl From<FormsConfig> for FullConfig {
    fn from(c: FormsConfig) -> Self {
        Self::Forms(c)
    }
}

impl From<RbacConfig> for FullConfig {
    fn from(c: RbacConfig) -> Self {
        Self::Rbac(c)
    }
}
