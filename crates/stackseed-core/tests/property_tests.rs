//! Property tests for the generation pipeline.

use proptest::prelude::*;
use std::collections::BTreeSet;

use stackseed_core::domain::config::{
    PartialDatabaseConfig, PartialFieldSpec, PartialFormSpec, PartialFormValidationConfig,
    PartialFormsConfig, PartialModelsConfig, PartialRbacConfig, PartialRbacSecurityConfig,
    PartialRouteRule, PartialWebAppConfig, StepSpec, WebAppConfig,
};
use stackseed_core::domain::defaults;
use stackseed_core::domain::value_objects::{
    Choice, ChoiceSet, DatabaseProvider, FieldKind, FormsFeature, Orm, PackageManager,
    RbacFeature, Role, SessionStrategy, ValidationMode, WebAppFeature,
};
use stackseed_core::{
    FullConfig, GeneratedProject, GenerationResult, PartialConfig, generate, validate_config,
};

fn project_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}"
}

/// Valid web-app partials: every field optional, cross-field rules respected.
fn valid_webapp() -> impl Strategy<Value = PartialWebAppConfig> {
    let toolchain = (
        proptest::option::of(project_name()),
        proptest::option::of(proptest::sample::select(PackageManager::all().to_vec())),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
    );
    let data = (
        proptest::option::of(proptest::sample::subsequence(
            WebAppFeature::all().to_vec(),
            0..=WebAppFeature::all().len(),
        )),
        proptest::sample::select(DatabaseProvider::all().to_vec()),
        proptest::sample::select(Orm::all().to_vec()),
        proptest::array::uniform5(any::<bool>()),
    );

    (toolchain, data).prop_map(
        |((name, pm, ts, src, app), (features, provider, orm, models))| {
            let features = features.map(|mut set| {
                if set.contains(&WebAppFeature::Seeding) && !set.contains(&WebAppFeature::Database) {
                    set.push(WebAppFeature::Database);
                }
                set.into_iter().map(Choice::Known).collect()
            });
            let orm = if provider == DatabaseProvider::Mongodb {
                Orm::Prisma
            } else {
                orm
            };
            PartialWebAppConfig {
                project_name: name,
                package_manager: pm.map(Choice::Known),
                use_typescript: ts,
                use_src_directory: src,
                use_app_router: app,
                features,
                database: Some(PartialDatabaseConfig {
                    provider: Some(Choice::Known(provider)),
                    orm: Some(Choice::Known(orm)),
                }),
                models: Some(PartialModelsConfig {
                    user: Some(models[0]),
                    post: Some(models[1]),
                    comment: Some(models[2]),
                    timestamps: Some(models[3]),
                    soft_delete: Some(models[4]),
                }),
                ..Default::default()
            }
        },
    )
}

/// Mostly lowercase words, but also `index` and spellings such as `a--b`
/// or `a-` that collapse onto another name's component.
fn form_name() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just("index".to_string()),
        8 => "[a-z][a-z0-9]{0,3}(-{1,2}[a-z0-9]{0,2}){0,2}",
    ]
}

/// Distinct identifiers; select fields carry options and the last field may
/// depend on the first.
fn form_fields() -> impl Strategy<Value = Vec<PartialFieldSpec>> {
    (
        proptest::collection::btree_set("[a-z][a-z0-9_]{0,5}", 1..5),
        proptest::collection::vec(
            (proptest::sample::select(FieldKind::all().to_vec()), any::<bool>()),
            5,
        ),
        any::<bool>(),
    )
        .prop_map(|(names, kinds, linked)| {
            let mut fields: Vec<PartialFieldSpec> = names
                .iter()
                .zip(kinds)
                .map(|(name, (kind, required))| {
                    let mut field = PartialFieldSpec::new(name, kind);
                    field.required = Some(required);
                    if kind == FieldKind::Select {
                        field.options = vec!["low".into(), "high".into()];
                    }
                    field
                })
                .collect();
            if linked && fields.len() > 1 {
                let first = fields[0].name.clone();
                if let Some(last) = fields.last_mut() {
                    last.depends_on = Some(first);
                }
            }
            fields
        })
}

fn form_spec() -> impl Strategy<Value = PartialFormSpec> {
    (form_name(), form_fields(), any::<bool>()).prop_map(|(name, fields, multi_step)| {
        let steps = if multi_step {
            fields
                .chunks(2)
                .enumerate()
                .map(|(k, chunk)| StepSpec {
                    name: format!("Step {}", k + 1),
                    fields: chunk.iter().map(|f| f.name.clone()).collect(),
                })
                .collect()
        } else {
            Vec::new()
        };
        PartialFormSpec {
            name,
            fields,
            multi_step,
            steps,
        }
    })
}

/// Forms partials whose only possible problems are the form names.
fn forms_partials() -> impl Strategy<Value = PartialFormsConfig> {
    (
        proptest::option::of(project_name()),
        proptest::option::of(any::<bool>()),
        proptest::option::of(proptest::sample::subsequence(
            FormsFeature::all().to_vec(),
            0..=FormsFeature::all().len(),
        )),
        proptest::sample::select(ValidationMode::all().to_vec()),
        proptest::collection::vec(form_spec(), 0..4),
    )
        .prop_map(|(name, src, features, mode, forms)| PartialFormsConfig {
            project_name: name,
            use_src_directory: src,
            features: features.map(|set| set.into_iter().map(Choice::Known).collect()),
            validation: Some(PartialFormValidationConfig {
                mode: Some(Choice::Known(mode)),
                ..Default::default()
            }),
            forms: Some(forms),
            ..Default::default()
        })
}

/// RBAC partials with declared roles everywhere. Route paths may repeat,
/// with or without a trailing slash, and may shadow `/api`.
fn rbac_partials() -> impl Strategy<Value = PartialRbacConfig> {
    let routes = proptest::collection::vec(
        (
            "/(api|admin|[a-z]{1,5})(/[a-z]{1,3})?/?",
            any::<prop::sample::Index>(),
            any::<prop::sample::Index>(),
        ),
        0..5,
    );
    (
        proptest::option::of(project_name()),
        proptest::option::of(proptest::sample::subsequence(
            RbacFeature::all().to_vec(),
            0..=RbacFeature::all().len(),
        )),
        proptest::sample::subsequence(Role::all().to_vec(), 1..=Role::all().len()),
        any::<prop::sample::Index>(),
        routes,
        proptest::sample::select(SessionStrategy::all().to_vec()),
        any::<bool>(),
        1u32..72,
    )
        .prop_map(
            |(name, features, roles, default, routes, strategy, rate_limiting, hours)| {
                let protected_routes = routes
                    .into_iter()
                    .map(|(path, a, b)| {
                        let mut allowed = vec![*a.get(&roles)];
                        let extra = *b.get(&roles);
                        if !allowed.contains(&extra) {
                            allowed.push(extra);
                        }
                        PartialRouteRule::new(&path, &allowed)
                    })
                    .collect();
                PartialRbacConfig {
                    project_name: name,
                    features: features.map(|set| set.into_iter().map(Choice::Known).collect()),
                    default_role: Some(Choice::Known(*default.get(&roles))),
                    roles: Some(roles.into_iter().map(Choice::Known).collect()),
                    security: Some(PartialRbacSecurityConfig {
                        session_strategy: Some(Choice::Known(strategy)),
                        rate_limiting: Some(rate_limiting),
                        session_max_age_hours: Some(hours),
                    }),
                    protected_routes: Some(protected_routes),
                    ..Default::default()
                }
            },
        )
}

/// A partial the validator accepts generates, with one file per path; one it
/// rejects fails with exactly those errors.
fn generates_iff_valid(partial: &PartialConfig) -> Result<(), TestCaseError> {
    let errors = validate_config(partial);
    match generate(partial) {
        GenerationResult::Success(project) => {
            prop_assert!(errors.is_empty(), "generated despite {:?}", errors);
            prop_assert_eq!(path_set(&project).len(), project.files.len());
        }
        GenerationResult::Failure { errors: reported } => {
            prop_assert!(!errors.is_empty());
            prop_assert_eq!(reported, errors);
        }
    }
    Ok(())
}

fn run(p: &PartialWebAppConfig) -> GeneratedProject {
    generate(&PartialConfig::Webapp(p.clone()))
        .into_result()
        .expect("valid partial must generate")
}

fn merged(project: &GeneratedProject) -> &WebAppConfig {
    match &project.config {
        FullConfig::Webapp(cfg) => cfg,
        other => panic!("unexpected family {}", other.kind()),
    }
}

fn path_set(project: &GeneratedProject) -> BTreeSet<String> {
    project.files.iter().map(|f| f.path.to_string()).collect()
}

/// One independent violation per flag.
fn violations(flags: [bool; 5]) -> (PartialWebAppConfig, usize) {
    let mut p = PartialWebAppConfig::default();
    if flags[0] {
        p.project_name = Some("Not Valid".into());
    }
    if flags[1] {
        p.package_manager = Some(Choice::Unknown("maven".into()));
    }
    if flags[2] {
        p.features = Some(vec![
            Choice::Known(WebAppFeature::Database),
            Choice::Unknown("graphql".into()),
        ]);
    }
    let provider = flags[3].then(|| Choice::Unknown("oracle".into()));
    let orm = flags[4].then(|| Choice::Unknown("typeorm".into()));
    if provider.is_some() || orm.is_some() {
        p.database = Some(PartialDatabaseConfig { provider, orm });
    }
    (p, flags.iter().filter(|f| **f).count())
}

proptest! {
    #[test]
    fn generation_is_idempotent(p in valid_webapp()) {
        let a = serde_json::to_string(&run(&p).files).unwrap();
        let b = serde_json::to_string(&run(&p).files).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn paths_are_unique(p in valid_webapp()) {
        let project = run(&p);
        prop_assert_eq!(path_set(&project).len(), project.files.len());
    }

    #[test]
    fn partial_values_take_precedence(p in valid_webapp()) {
        let project = run(&p);
        let cfg = merged(&project);
        let base = defaults::webapp();

        prop_assert_eq!(&cfg.project_name, p.project_name.as_ref().unwrap_or(&base.project_name));
        prop_assert_eq!(
            cfg.package_manager,
            p.package_manager.as_ref().and_then(Choice::known).unwrap_or(base.package_manager)
        );
        prop_assert_eq!(cfg.use_typescript, p.use_typescript.unwrap_or(base.use_typescript));
        prop_assert_eq!(cfg.use_app_router, p.use_app_router.unwrap_or(base.use_app_router));
        let expected: BTreeSet<_> = match &p.features {
            Some(values) => values.iter().filter_map(Choice::known).collect(),
            None => base.features.clone(),
        };
        prop_assert_eq!(&cfg.features, &expected);
        // untouched nested groups keep the defaults
        prop_assert_eq!(&cfg.security, &base.security);
        prop_assert_eq!(&cfg.validation, &base.validation);
    }

    #[test]
    fn removing_a_feature_never_adds_files(p in valid_webapp(), pick in any::<prop::sample::Index>()) {
        let project = run(&p);
        let enabled: Vec<_> = merged(&project).features.iter().copied().collect();
        prop_assume!(!enabled.is_empty());
        let removed = *pick.get(&enabled);

        let fewer: Vec<Choice<WebAppFeature>> = enabled
            .iter()
            .copied()
            .filter(|f| *f != removed)
            // seeding cannot outlive the database
            .filter(|f| !(removed == WebAppFeature::Database && *f == WebAppFeature::Seeding))
            .map(Choice::Known)
            .collect();
        let reduced = PartialWebAppConfig { features: Some(fewer), ..p.clone() };

        let before = path_set(&project);
        let after = path_set(&run(&reduced));
        prop_assert!(after.is_subset(&before), "new files: {:?}", after.difference(&before).collect::<Vec<_>>());
    }

    #[test]
    fn forms_generate_whenever_valid(p in forms_partials()) {
        generates_iff_valid(&PartialConfig::Forms(p))?;
    }

    #[test]
    fn rbac_generates_whenever_valid(p in rbac_partials()) {
        generates_iff_valid(&PartialConfig::Rbac(p))?;
    }

    #[test]
    fn every_violation_is_reported(flags in proptest::array::uniform5(any::<bool>())) {
        let (p, expected) = violations(flags);
        let errors = validate_config(&PartialConfig::Webapp(p));
        prop_assert_eq!(errors.len(), expected, "{:?}", errors);
    }
}
