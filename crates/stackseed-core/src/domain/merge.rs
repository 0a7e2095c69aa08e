//! Two-level merge of a partial config onto a full base.
//!
//! Rules:
//! - a top-level scalar present in the partial replaces the base value
//! - nested sub-configs (`database`, `validation`, `security`, ...) merge key by key
//! - sequences and sets (`features`, `forms`, `roles`, `protected_routes`)
//!   are replaced wholesale, so `features: []` clears every base feature
//!
//! Merge assumes the partial already passed validation. `Choice::Unknown`
//! values cannot appear then; if they do, the base value is kept for scalars
//! and the entry is dropped from sequences.

use std::collections::BTreeSet;

use crate::domain::config::{
    DatabaseConfig, FieldSpec, FormSpec, FormValidationConfig, FormsConfig, FullConfig,
    ModelsConfig, PartialConfig, PartialDatabaseConfig, PartialFieldSpec, PartialFormSpec,
    PartialFormValidationConfig, PartialFormsConfig, PartialModelsConfig,
    PartialPerformanceConfig, PartialRbacConfig, PartialRbacSecurityConfig,
    PartialSecurityConfig, PartialValidationConfig, PartialWebAppConfig, PerformanceConfig,
    RbacConfig, RbacSecurityConfig, RouteRule, SecurityConfig, ValidationConfig, WebAppConfig,
};
use crate::domain::value_objects::{Choice, FieldKind};

/// A full config type that a partial can be merged onto.
pub trait Merge: Sized + Clone {
    type Partial;

    fn merge(partial: &Self::Partial, base: &Self) -> Self;
}

/// Merge a tagged partial onto a tagged base.
///
/// Returns `None` when the two belong to different families.
pub fn merge_config(partial: &PartialConfig, base: &FullConfig) -> Option<FullConfig> {
    match (partial, base) {
        (PartialConfig::Webapp(p), FullConfig::Webapp(b)) => Some(WebAppConfig::merge(p, b).into()),
        (PartialConfig::Forms(p), FullConfig::Forms(b)) => Some(FormsConfig::merge(p, b).into()),
        (PartialConfig::Rbac(p), FullConfig::Rbac(b)) => Some(RbacConfig::merge(p, b).into()),
        _ => None,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn pick<T: Clone>(value: Option<&T>, base: &T) -> T {
    value.cloned().unwrap_or_else(|| base.clone())
}

fn pick_choice<T: Copy>(value: Option<&Choice<T>>, base: T) -> T {
    value.and_then(Choice::known).unwrap_or(base)
}

fn known<T: Copy>(values: &[Choice<T>]) -> impl Iterator<Item = T> + '_ {
    values.iter().filter_map(Choice::known)
}

fn pick_set<T: Copy + Ord>(value: Option<&Vec<Choice<T>>>, base: &BTreeSet<T>) -> BTreeSet<T> {
    match value {
        Some(values) => known(values).collect(),
        None => base.clone(),
    }
}

fn nested<T: Merge>(partial: Option<&T::Partial>, base: &T) -> T {
    match partial {
        Some(p) => T::merge(p, base),
        None => base.clone(),
    }
}

// ── Web app ──────────────────────────────────────────────────────────────────

impl Merge for WebAppConfig {
    type Partial = PartialWebAppConfig;

    fn merge(p: &PartialWebAppConfig, base: &Self) -> Self {
        Self {
            project_name: pick(p.project_name.as_ref(), &base.project_name),
            package_manager: pick_choice(p.package_manager.as_ref(), base.package_manager),
            use_typescript: pick(p.use_typescript.as_ref(), &base.use_typescript),
            use_src_directory: pick(p.use_src_directory.as_ref(), &base.use_src_directory),
            use_app_router: pick(p.use_app_router.as_ref(), &base.use_app_router),
            features: pick_set(p.features.as_ref(), &base.features),
            database: nested(p.database.as_ref(), &base.database),
            validation: nested(p.validation.as_ref(), &base.validation),
            performance: nested(p.performance.as_ref(), &base.performance),
            security: nested(p.security.as_ref(), &base.security),
            models: nested(p.models.as_ref(), &base.models),
        }
    }
}

impl Merge for DatabaseConfig {
    type Partial = PartialDatabaseConfig;

    fn merge(p: &PartialDatabaseConfig, base: &Self) -> Self {
        Self {
            provider: pick_choice(p.provider.as_ref(), base.provider),
            orm: pick_choice(p.orm.as_ref(), base.orm),
        }
    }
}

impl Merge for ValidationConfig {
    type Partial = PartialValidationConfig;

    fn merge(p: &PartialValidationConfig, base: &Self) -> Self {
        Self {
            strict: p.strict.unwrap_or(base.strict),
            coerce_numbers: p.coerce_numbers.unwrap_or(base.coerce_numbers),
            custom_messages: p.custom_messages.unwrap_or(base.custom_messages),
        }
    }
}

impl Merge for PerformanceConfig {
    type Partial = PartialPerformanceConfig;

    fn merge(p: &PartialPerformanceConfig, base: &Self) -> Self {
        Self {
            image_optimization: p.image_optimization.unwrap_or(base.image_optimization),
            bundle_analyzer: p.bundle_analyzer.unwrap_or(base.bundle_analyzer),
            cache_headers: p.cache_headers.unwrap_or(base.cache_headers),
        }
    }
}

impl Merge for SecurityConfig {
    type Partial = PartialSecurityConfig;

    fn merge(p: &PartialSecurityConfig, base: &Self) -> Self {
        Self {
            security_headers: p.security_headers.unwrap_or(base.security_headers),
            rate_limiting: p.rate_limiting.unwrap_or(base.rate_limiting),
            csrf_protection: p.csrf_protection.unwrap_or(base.csrf_protection),
        }
    }
}

impl Merge for ModelsConfig {
    type Partial = PartialModelsConfig;

    fn merge(p: &PartialModelsConfig, base: &Self) -> Self {
        Self {
            user: p.user.unwrap_or(base.user),
            post: p.post.unwrap_or(base.post),
            comment: p.comment.unwrap_or(base.comment),
            timestamps: p.timestamps.unwrap_or(base.timestamps),
            soft_delete: p.soft_delete.unwrap_or(base.soft_delete),
        }
    }
}

// ── Forms ────────────────────────────────────────────────────────────────────

impl Merge for FormsConfig {
    type Partial = PartialFormsConfig;

    fn merge(p: &PartialFormsConfig, base: &Self) -> Self {
        Self {
            project_name: pick(p.project_name.as_ref(), &base.project_name),
            package_manager: pick_choice(p.package_manager.as_ref(), base.package_manager),
            use_src_directory: pick(p.use_src_directory.as_ref(), &base.use_src_directory),
            features: pick_set(p.features.as_ref(), &base.features),
            validation: nested(p.validation.as_ref(), &base.validation),
            forms: match &p.forms {
                Some(forms) => forms.iter().map(resolve_form).collect(),
                None => base.forms.clone(),
            },
        }
    }
}

impl Merge for FormValidationConfig {
    type Partial = PartialFormValidationConfig;

    fn merge(p: &PartialFormValidationConfig, base: &Self) -> Self {
        Self {
            mode: pick_choice(p.mode.as_ref(), base.mode),
            strict: p.strict.unwrap_or(base.strict),
            custom_messages: p.custom_messages.unwrap_or(base.custom_messages),
        }
    }
}

fn resolve_form(form: &PartialFormSpec) -> FormSpec {
    FormSpec {
        name: form.name.clone(),
        fields: form.fields.iter().map(resolve_field).collect(),
        multi_step: form.multi_step,
        steps: form.steps.clone(),
    }
}

fn resolve_field(field: &PartialFieldSpec) -> FieldSpec {
    FieldSpec {
        name: field.name.clone(),
        label: field.label.clone(),
        kind: pick_choice(field.kind.as_ref(), FieldKind::Text),
        required: field.required.unwrap_or(true),
        options: field.options.clone(),
        depends_on: field.depends_on.clone(),
    }
}

// ── RBAC ─────────────────────────────────────────────────────────────────────

impl Merge for RbacConfig {
    type Partial = PartialRbacConfig;

    fn merge(p: &PartialRbacConfig, base: &Self) -> Self {
        Self {
            project_name: pick(p.project_name.as_ref(), &base.project_name),
            package_manager: pick_choice(p.package_manager.as_ref(), base.package_manager),
            use_src_directory: pick(p.use_src_directory.as_ref(), &base.use_src_directory),
            features: pick_set(p.features.as_ref(), &base.features),
            roles: match &p.roles {
                Some(roles) => known(roles).collect(),
                None => base.roles.clone(),
            },
            default_role: pick_choice(p.default_role.as_ref(), base.default_role),
            security: nested(p.security.as_ref(), &base.security),
            protected_routes: match &p.protected_routes {
                Some(routes) => routes
                    .iter()
                    .map(|r| RouteRule {
                        path: r.path.clone(),
                        roles: known(&r.roles).collect(),
                    })
                    .collect(),
                None => base.protected_routes.clone(),
            },
        }
    }
}

impl Merge for RbacSecurityConfig {
    type Partial = PartialRbacSecurityConfig;

    fn merge(p: &PartialRbacSecurityConfig, base: &Self) -> Self {
        Self {
            session_strategy: pick_choice(p.session_strategy.as_ref(), base.session_strategy),
            rate_limiting: p.rate_limiting.unwrap_or(base.rate_limiting),
            session_max_age_hours: p.session_max_age_hours.unwrap_or(base.session_max_age_hours),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;
    use crate::domain::value_objects::{
        DatabaseProvider, Orm, PackageManager, Role, WebAppFeature,
    };

    #[test]
    fn empty_partial_yields_base() {
        let base = defaults::webapp();
        assert_eq!(WebAppConfig::merge(&PartialWebAppConfig::default(), &base), base);
    }

    #[test]
    fn top_level_fields_override() {
        let base = defaults::webapp();
        let partial = PartialWebAppConfig {
            project_name: Some("shop".into()),
            package_manager: Some(PackageManager::Pnpm.into()),
            use_typescript: Some(false),
            ..Default::default()
        };
        let merged = WebAppConfig::merge(&partial, &base);
        assert_eq!(merged.project_name, "shop");
        assert_eq!(merged.package_manager, PackageManager::Pnpm);
        assert!(!merged.use_typescript);
        assert_eq!(merged.use_app_router, base.use_app_router);
    }

    #[test]
    fn nested_records_merge_per_key() {
        let base = defaults::webapp();
        let partial = PartialWebAppConfig {
            security: Some(PartialSecurityConfig {
                rate_limiting: Some(true),
                ..Default::default()
            }),
            database: Some(PartialDatabaseConfig {
                provider: Some(DatabaseProvider::Sqlite.into()),
                orm: None,
            }),
            ..Default::default()
        };
        let merged = WebAppConfig::merge(&partial, &base);
        assert!(merged.security.rate_limiting);
        assert_eq!(merged.security.security_headers, base.security.security_headers);
        assert_eq!(merged.database.provider, DatabaseProvider::Sqlite);
        assert_eq!(merged.database.orm, Orm::Prisma);
    }

    #[test]
    fn features_replace_rather_than_concatenate() {
        let base = defaults::webapp();
        let partial = PartialWebAppConfig {
            features: Some(vec![WebAppFeature::Docker.into()]),
            ..Default::default()
        };
        let merged = WebAppConfig::merge(&partial, &base);
        assert_eq!(merged.features, BTreeSet::from([WebAppFeature::Docker]));
    }

    #[test]
    fn explicit_empty_features_clear_defaults() {
        let partial = PartialWebAppConfig {
            features: Some(Vec::new()),
            ..Default::default()
        };
        assert!(WebAppConfig::merge(&partial, &defaults::webapp()).features.is_empty());
    }

    #[test]
    fn form_fields_take_fixed_fallbacks() {
        let partial = PartialFormsConfig {
            forms: Some(vec![PartialFormSpec {
                name: "signup".into(),
                fields: vec![PartialFieldSpec {
                    name: "nickname".into(),
                    ..Default::default()
                }],
                ..Default::default()
            }]),
            ..Default::default()
        };
        let merged = FormsConfig::merge(&partial, &defaults::forms());
        let field = &merged.forms[0].fields[0];
        assert_eq!(field.kind, FieldKind::Text);
        assert!(field.required);
    }

    #[test]
    fn roles_keep_declared_order() {
        let partial = PartialRbacConfig {
            roles: Some(vec![Role::Viewer.into(), Role::Admin.into()]),
            ..Default::default()
        };
        let merged = RbacConfig::merge(&partial, &defaults::rbac());
        assert_eq!(merged.roles, vec![Role::Viewer, Role::Admin]);
    }

    #[test]
    fn merge_config_rejects_family_mismatch() {
        let partial = PartialConfig::Forms(PartialFormsConfig::default());
        assert!(merge_config(&partial, &defaults::webapp().into()).is_none());
    }
}
