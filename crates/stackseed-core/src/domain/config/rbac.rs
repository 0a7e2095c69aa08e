//! RBAC family: role hierarchy, permission matrix, route guards and audit log.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::value_objects::{Choice, PackageManager, RbacFeature, Role, SessionStrategy};

// ── Full configuration ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacConfig {
    pub project_name: String,
    pub package_manager: PackageManager,
    pub use_src_directory: bool,
    pub features: BTreeSet<RbacFeature>,
    /// Most privileged first; order defines the hierarchy.
    pub roles: Vec<Role>,
    pub default_role: Role,
    pub security: RbacSecurityConfig,
    pub protected_routes: Vec<RouteRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbacSecurityConfig {
    pub session_strategy: SessionStrategy,
    pub rate_limiting: bool,
    pub session_max_age_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Path prefix, always starting with `/`.
    pub path: String,
    pub roles: Vec<Role>,
}

impl RbacConfig {
    pub fn has(&self, feature: RbacFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn src(&self) -> &'static str {
        if self.use_src_directory { "src/" } else { "" }
    }
}

impl RouteRule {
    pub fn new(path: &str, roles: &[Role]) -> Self {
        Self {
            path: path.to_string(),
            roles: roles.to_vec(),
        }
    }
}

// ── Partial configuration ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialRbacConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<Choice<PackageManager>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_src_directory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Choice<RbacFeature>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Choice<Role>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_role: Option<Choice<Role>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<PartialRbacSecurityConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected_routes: Option<Vec<PartialRouteRule>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialRbacSecurityConfig {
    pub session_strategy: Option<Choice<SessionStrategy>>,
    pub rate_limiting: Option<bool>,
    pub session_max_age_hours: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialRouteRule {
    pub path: String,
    pub roles: Vec<Choice<Role>>,
}

impl PartialRouteRule {
    pub fn new(path: &str, roles: &[Role]) -> Self {
        Self {
            path: path.to_string(),
            roles: roles.iter().map(|&r| r.into()).collect(),
        }
    }
}

impl From<&RbacConfig> for PartialRbacConfig {
    fn from(full: &RbacConfig) -> Self {
        Self {
            project_name: Some(full.project_name.clone()),
            package_manager: Some(full.package_manager.into()),
            use_src_directory: Some(full.use_src_directory),
            features: Some(full.features.iter().map(|&f| f.into()).collect()),
            roles: Some(full.roles.iter().map(|&r| r.into()).collect()),
            default_role: Some(full.default_role.into()),
            security: Some(PartialRbacSecurityConfig {
                session_strategy: Some(full.security.session_strategy.into()),
                rate_limiting: Some(full.security.rate_limiting),
                session_max_age_hours: Some(full.security.session_max_age_hours),
            }),
            protected_routes: Some(
                full.protected_routes
                    .iter()
                    .map(|r| PartialRouteRule::new(&r.path, &r.roles))
                    .collect(),
            ),
        }
    }
}
