use std::collections::BTreeSet;

use super::{ValidationErrors, check_choice, check_choices, check_project_name};
use crate::domain::config::{PartialWebAppConfig, WebAppConfig};
use crate::domain::value_objects::{Choice, DatabaseProvider, Orm, WebAppFeature};

pub(super) fn validate(p: &PartialWebAppConfig, base: &WebAppConfig, errors: &mut ValidationErrors) {
    check_project_name(errors, p.project_name.as_ref());
    check_choice(errors, "package_manager", p.package_manager.as_ref());
    check_choices(errors, "features", p.features.as_ref());

    if let Some(db) = &p.database {
        check_choice(errors, "database.provider", db.provider.as_ref());
        check_choice(errors, "database.orm", db.orm.as_ref());
    }

    let features = effective_features(p, base);

    if features.contains(&WebAppFeature::Seeding) && !features.contains(&WebAppFeature::Database) {
        errors.push(
            "features",
            "the 'seeding' feature requires the 'database' feature",
        );
    }

    if features.contains(&WebAppFeature::Database) {
        let db = p.database.as_ref();
        let provider = db
            .and_then(|d| d.provider.as_ref())
            .and_then(Choice::known)
            .unwrap_or(base.database.provider);
        let orm = db
            .and_then(|d| d.orm.as_ref())
            .and_then(Choice::known)
            .unwrap_or(base.database.orm);

        if provider == DatabaseProvider::Mongodb && orm == Orm::Drizzle {
            errors.push(
                "database.orm",
                "the drizzle ORM does not support mongodb; use prisma or a SQL provider",
            );
        }
    }
}

fn effective_features(p: &PartialWebAppConfig, base: &WebAppConfig) -> BTreeSet<WebAppFeature> {
    match &p.features {
        Some(values) => values.iter().filter_map(Choice::known).collect(),
        None => base.features.clone(),
    }
}
