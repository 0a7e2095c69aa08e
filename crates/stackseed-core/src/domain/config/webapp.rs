//! Web-app family: a Next.js application with optional data layer, auth and
//! tooling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::value_objects::{
    Choice, DatabaseProvider, Orm, PackageManager, WebAppFeature,
};

// ── Full configuration ───────────────────────────────────────────────────────

/// Fully-populated web-app configuration. Every generator input comes from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppConfig {
    pub project_name: String,
    pub package_manager: PackageManager,
    pub use_typescript: bool,
    pub use_src_directory: bool,
    pub use_app_router: bool,
    pub features: BTreeSet<WebAppFeature>,
    pub database: DatabaseConfig,
    pub validation: ValidationConfig,
    pub performance: PerformanceConfig,
    pub security: SecurityConfig,
    pub models: ModelsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub provider: DatabaseProvider,
    pub orm: Orm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub strict: bool,
    pub coerce_numbers: bool,
    pub custom_messages: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub image_optimization: bool,
    pub bundle_analyzer: bool,
    pub cache_headers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub security_headers: bool,
    pub rate_limiting: bool,
    pub csrf_protection: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub user: bool,
    pub post: bool,
    pub comment: bool,
    pub timestamps: bool,
    pub soft_delete: bool,
}

impl WebAppConfig {
    pub fn has(&self, feature: WebAppFeature) -> bool {
        self.features.contains(&feature)
    }

    /// Prefix for application sources: `"src/"` or `""`.
    pub fn src(&self) -> &'static str {
        if self.use_src_directory { "src/" } else { "" }
    }

    /// Extension for plain modules: `ts` or `js`.
    pub fn ext(&self) -> &'static str {
        if self.use_typescript { "ts" } else { "js" }
    }

    /// Extension for modules containing JSX: `tsx` or `jsx`.
    pub fn jsx_ext(&self) -> &'static str {
        if self.use_typescript { "tsx" } else { "jsx" }
    }

    /// Whether a data layer is generated.
    pub fn uses_database(&self) -> bool {
        self.has(WebAppFeature::Database)
    }

    pub fn uses_prisma(&self) -> bool {
        self.uses_database() && self.database.orm == Orm::Prisma
    }

    pub fn uses_drizzle(&self) -> bool {
        self.uses_database() && self.database.orm == Orm::Drizzle
    }
}

// ── Partial configuration ────────────────────────────────────────────────────

/// Caller-supplied web-app configuration; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialWebAppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<Choice<PackageManager>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_typescript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_src_directory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_app_router: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Choice<WebAppFeature>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PartialDatabaseConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<PartialValidationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PartialPerformanceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<PartialSecurityConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<PartialModelsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialDatabaseConfig {
    pub provider: Option<Choice<DatabaseProvider>>,
    pub orm: Option<Choice<Orm>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialValidationConfig {
    pub strict: Option<bool>,
    pub coerce_numbers: Option<bool>,
    pub custom_messages: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialPerformanceConfig {
    pub image_optimization: Option<bool>,
    pub bundle_analyzer: Option<bool>,
    pub cache_headers: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialSecurityConfig {
    pub security_headers: Option<bool>,
    pub rate_limiting: Option<bool>,
    pub csrf_protection: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialModelsConfig {
    pub user: Option<bool>,
    pub post: Option<bool>,
    pub comment: Option<bool>,
    pub timestamps: Option<bool>,
    pub soft_delete: Option<bool>,
}

impl From<&WebAppConfig> for PartialWebAppConfig {
    /// Every field set: merging the result onto any base yields `full` again.
    fn from(full: &WebAppConfig) -> Self {
        Self {
            project_name: Some(full.project_name.clone()),
            package_manager: Some(full.package_manager.into()),
            use_typescript: Some(full.use_typescript),
            use_src_directory: Some(full.use_src_directory),
            use_app_router: Some(full.use_app_router),
            features: Some(full.features.iter().map(|&f| f.into()).collect()),
            database: Some(PartialDatabaseConfig {
                provider: Some(full.database.provider.into()),
                orm: Some(full.database.orm.into()),
            }),
            validation: Some(PartialValidationConfig {
                strict: Some(full.validation.strict),
                coerce_numbers: Some(full.validation.coerce_numbers),
                custom_messages: Some(full.validation.custom_messages),
            }),
            performance: Some(PartialPerformanceConfig {
                image_optimization: Some(full.performance.image_optimization),
                bundle_analyzer: Some(full.performance.bundle_analyzer),
                cache_headers: Some(full.performance.cache_headers),
            }),
            security: Some(PartialSecurityConfig {
                security_headers: Some(full.security.security_headers),
                rate_limiting: Some(full.security.rate_limiting),
                csrf_protection: Some(full.security.csrf_protection),
            }),
            models: Some(PartialModelsConfig {
                user: Some(full.models.user),
                post: Some(full.models.post),
                comment: Some(full.models.comment),
                timestamps: Some(full.models.timestamps),
                soft_delete: Some(full.models.soft_delete),
            }),
        }
    }
}
