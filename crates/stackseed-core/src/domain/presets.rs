//! Named, fully-populated starting configurations.
//!
//! A preset stands in for the family defaults: callers merge their overrides
//! onto `preset.config` and run the normal pipeline.

use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::domain::config::{
    FieldSpec, FormSpec, FormValidationConfig, FormsConfig, FullConfig, RbacConfig, StepSpec,
    WebAppConfig,
};
use crate::domain::defaults;
use crate::domain::value_objects::{
    ChoiceSet, FieldKind, FormsFeature, PackageManager, RbacFeature, Role, TemplateKind, ValidationMode,
    WebAppFeature,
};

/// A named full configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub config: FullConfig,
}

impl Preset {
    pub fn new(name: impl Into<String>, description: impl Into<String>, config: FullConfig) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            config,
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.config.kind()
    }
}

/// Presets bundled with the library, in display order.
pub fn builtin() -> &'static [Preset] {
    static PRESETS: OnceLock<Vec<Preset>> = OnceLock::new();
    PRESETS.get_or_init(|| {
        vec![
            Preset::new(
                "basic",
                "Next.js with Zod and Tailwind, no database",
                basic().into(),
            ),
            Preset::new(
                "standard",
                "Prisma on PostgreSQL with auth, middleware and tests",
                standard().into(),
            ),
            Preset::new(
                "enterprise",
                "Every web-app feature with hardened security and full models",
                enterprise().into(),
            ),
            Preset::new(
                "contact",
                "Single contact form with server actions and schema tests",
                contact().into(),
            ),
            Preset::new(
                "onboarding",
                "Three-step onboarding form with conditional fields",
                onboarding().into(),
            ),
            Preset::new(
                "starter",
                "Five-role hierarchy with route guards and an audit log",
                starter().into(),
            ),
        ]
    })
}

/// Look up a bundled preset by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static Preset> {
    builtin()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

fn basic() -> WebAppConfig {
    let mut cfg = defaults::webapp();
    cfg.features = BTreeSet::from([WebAppFeature::Validation, WebAppFeature::Tailwind]);
    cfg
}

fn standard() -> WebAppConfig {
    let mut cfg = defaults::webapp();
    cfg.features.extend([
        WebAppFeature::Auth,
        WebAppFeature::Middleware,
        WebAppFeature::Testing,
    ]);
    cfg
}

fn enterprise() -> WebAppConfig {
    let mut cfg = defaults::webapp();
    cfg.package_manager = PackageManager::Pnpm;
    cfg.features = WebAppFeature::all().iter().copied().collect();
    cfg.validation.strict = true;
    cfg.validation.coerce_numbers = true;
    cfg.validation.custom_messages = true;
    cfg.performance.image_optimization = true;
    cfg.performance.bundle_analyzer = true;
    cfg.performance.cache_headers = true;
    cfg.security.security_headers = true;
    cfg.security.rate_limiting = true;
    cfg.security.csrf_protection = true;
    cfg.models.comment = true;
    cfg.models.soft_delete = true;
    cfg
}

fn contact() -> FormsConfig {
    let mut cfg = defaults::forms();
    cfg.features.insert(FormsFeature::Tests);
    cfg
}

fn onboarding() -> FormsConfig {
    let form = FormSpec {
        name: "onboarding".to_string(),
        fields: vec![
            FieldSpec::new("firstName", FieldKind::Text),
            FieldSpec::new("email", FieldKind::Email),
            FieldSpec::new("password", FieldKind::Password),
            FieldSpec::new("role", FieldKind::Select).with_options(&[
                "developer",
                "designer",
                "manager",
            ]),
            FieldSpec::new("newsletter", FieldKind::Checkbox).optional(),
            FieldSpec::new("frequency", FieldKind::Select)
                .with_options(&["weekly", "monthly"])
                .depends_on("newsletter"),
            FieldSpec::new("terms", FieldKind::Checkbox),
        ],
        multi_step: true,
        steps: vec![
            step("Account", &["firstName", "email", "password"]),
            step("Profile", &["role", "newsletter", "frequency"]),
            step("Confirm", &["terms"]),
        ],
    };

    FormsConfig {
        features: FormsFeature::all().iter().copied().collect(),
        validation: FormValidationConfig {
            mode: ValidationMode::OnChange,
            strict: true,
            custom_messages: true,
        },
        forms: vec![form],
        ..defaults::forms()
    }
}

fn step(name: &str, fields: &[&str]) -> StepSpec {
    StepSpec {
        name: name.to_string(),
        fields: fields.iter().map(ToString::to_string).collect(),
    }
}

fn starter() -> RbacConfig {
    let mut cfg = defaults::rbac();
    cfg.features = RbacFeature::all().iter().copied().collect();
    cfg.roles = Role::all().to_vec();
    cfg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ConfigValidator;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = builtin().iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), builtin().len());
    }

    #[test]
    fn every_family_has_a_preset() {
        for kind in TemplateKind::all() {
            assert!(builtin().iter().any(|p| p.kind() == *kind), "no preset for {kind}");
        }
    }

    #[test]
    fn every_preset_validates() {
        for preset in builtin() {
            let errors = ConfigValidator::validate(&preset.config.to_partial());
            assert!(errors.is_empty(), "{}: {errors:?}", preset.name);
        }
    }

    #[test]
    fn find_ignores_case() {
        assert_eq!(find("Enterprise").map(|p| p.kind()), Some(TemplateKind::Webapp));
        assert!(find("missing").is_none());
    }

    #[test]
    fn basic_has_no_database() {
        match &find("basic").unwrap().config {
            FullConfig::Webapp(cfg) => assert!(!cfg.uses_database()),
            other => panic!("unexpected family {:?}", other.kind()),
        }
    }
}
