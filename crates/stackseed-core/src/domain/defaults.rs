//! Fully-populated fallback configuration for each template family.
//!
//! Every optional field in a partial config resolves to the value here
//! unless a preset supplies a different base.

use std::collections::BTreeSet;

use crate::domain::config::{
    DatabaseConfig, FieldSpec, FormSpec, FormValidationConfig, FormsConfig, FullConfig,
    ModelsConfig, PerformanceConfig, RbacConfig, RbacSecurityConfig, RouteRule, SecurityConfig,
    ValidationConfig, WebAppConfig,
};
use crate::domain::value_objects::{
    DatabaseProvider, FieldKind, FormsFeature, Orm, PackageManager, RbacFeature, Role,
    SessionStrategy, TemplateKind, ValidationMode, WebAppFeature,
};

pub const DEFAULT_PROJECT_NAME: &str = "my-app";

/// Defaults for the family selected by `kind`.
pub fn defaults_for(kind: TemplateKind) -> FullConfig {
    match kind {
        TemplateKind::Webapp => webapp().into(),
        TemplateKind::Forms => forms().into(),
        TemplateKind::Rbac => rbac().into(),
    }
}

/// Next.js + TypeScript + App Router with Prisma on PostgreSQL, Zod
/// validation and seed data.
pub fn webapp() -> WebAppConfig {
    WebAppConfig {
        project_name: DEFAULT_PROJECT_NAME.to_string(),
        package_manager: PackageManager::Npm,
        use_typescript: true,
        use_src_directory: true,
        use_app_router: true,
        features: BTreeSet::from([
            WebAppFeature::Database,
            WebAppFeature::Seeding,
            WebAppFeature::Validation,
            WebAppFeature::Tailwind,
        ]),
        database: DatabaseConfig {
            provider: DatabaseProvider::Postgresql,
            orm: Orm::Prisma,
        },
        validation: ValidationConfig {
            strict: true,
            coerce_numbers: false,
            custom_messages: false,
        },
        performance: PerformanceConfig {
            image_optimization: true,
            bundle_analyzer: false,
            cache_headers: false,
        },
        security: SecurityConfig {
            security_headers: true,
            rate_limiting: false,
            csrf_protection: false,
        },
        models: ModelsConfig {
            user: true,
            post: true,
            comment: false,
            timestamps: true,
            soft_delete: false,
        },
    }
}

/// A single contact form with server actions and client-side validation.
pub fn forms() -> FormsConfig {
    FormsConfig {
        project_name: DEFAULT_PROJECT_NAME.to_string(),
        package_manager: PackageManager::Npm,
        use_src_directory: true,
        features: BTreeSet::from([FormsFeature::ServerActions, FormsFeature::ClientValidation]),
        validation: FormValidationConfig {
            mode: ValidationMode::OnBlur,
            strict: true,
            custom_messages: true,
        },
        forms: vec![contact_form()],
    }
}

pub(crate) fn contact_form() -> FormSpec {
    FormSpec {
        name: "contact".to_string(),
        fields: vec![
            FieldSpec::new("name", FieldKind::Text),
            FieldSpec::new("email", FieldKind::Email),
            FieldSpec::new("message", FieldKind::Textarea),
        ],
        multi_step: false,
        steps: Vec::new(),
    }
}

/// Four-level hierarchy with JWT sessions and guarded admin/dashboard routes.
pub fn rbac() -> RbacConfig {
    RbacConfig {
        project_name: DEFAULT_PROJECT_NAME.to_string(),
        package_manager: PackageManager::Npm,
        use_src_directory: true,
        features: BTreeSet::from([RbacFeature::RouteGuards, RbacFeature::PermissionHelpers]),
        roles: vec![Role::Admin, Role::Editor, Role::User, Role::Viewer],
        default_role: Role::User,
        security: RbacSecurityConfig {
            session_strategy: SessionStrategy::Jwt,
            rate_limiting: false,
            session_max_age_hours: 24,
        },
        protected_routes: vec![
            RouteRule::new("/admin", &[Role::Admin]),
            RouteRule::new("/dashboard", &[Role::Admin, Role::Editor, Role::User]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webapp_defaults_enable_seeding_with_database() {
        let cfg = webapp();
        assert!(cfg.has(WebAppFeature::Seeding));
        assert!(cfg.has(WebAppFeature::Database));
    }

    #[test]
    fn rbac_default_role_is_declared() {
        let cfg = rbac();
        assert!(cfg.roles.contains(&cfg.default_role));
    }

    #[test]
    fn defaults_for_matches_kind() {
        for &kind in [TemplateKind::Webapp, TemplateKind::Forms, TemplateKind::Rbac].iter() {
            assert_eq!(defaults_for(kind).kind(), kind);
        }
    }
}
