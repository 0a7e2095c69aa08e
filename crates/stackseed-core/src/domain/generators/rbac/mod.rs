//! RBAC sections.
//!
//! | Section | Owns |
//! |---------|------|
//! | `project` | package.json, tsconfig.json, next-env.d.ts, .env.example, README.md |
//! | `roles` | `<src>lib/rbac/**` |
//! | `middleware` | `<src>middleware.ts` |
//! | `audit` | `<src>lib/audit/**` |
//! | `types` | `<src>types/rbac.ts` |

mod audit;
mod middleware;
mod project;
mod roles;
mod types;

use std::collections::BTreeMap;

use super::Section;
use crate::domain::config::RbacConfig;
use crate::domain::defaults;
use crate::domain::family::TemplateFamily;
use crate::domain::value_objects::{RbacFeature, TemplateKind};

pub static SECTIONS: &[Section<RbacConfig>] = &[
    Section::new("project", project::generate),
    Section::new("roles", roles::generate),
    Section::new("middleware", middleware::generate),
    Section::new("audit", audit::generate),
    Section::new("types", types::generate),
];

impl TemplateFamily for RbacConfig {
    const KIND: TemplateKind = TemplateKind::Rbac;

    fn defaults() -> Self {
        defaults::rbac()
    }

    fn sections() -> &'static [Section<Self>] {
        SECTIONS
    }

    fn package_scripts(&self) -> BTreeMap<String, String> {
        package_scripts(self)
    }

    fn instructions(&self) -> Vec<String> {
        instructions(self)
    }
}

pub fn package_scripts(_cfg: &RbacConfig) -> BTreeMap<String, String> {
    [
        ("dev", "next dev"),
        ("build", "next build"),
        ("start", "next start"),
        ("lint", "next lint"),
        ("typecheck", "tsc --noEmit"),
    ]
    .into_iter()
    .map(|(name, command)| (name.to_string(), command.to_string()))
    .collect()
}

pub fn instructions(cfg: &RbacConfig) -> Vec<String> {
    let pm = cfg.package_manager;
    let mut steps = vec![
        format!("cd {}", cfg.project_name),
        format!("Install dependencies: {}", pm.install_command()),
        "Copy .env.example to .env and set AUTH_SECRET (openssl rand -base64 32)".to_string(),
        format!("New users are assigned the '{}' role", cfg.default_role),
    ];
    if cfg.has(RbacFeature::RouteGuards) && !cfg.protected_routes.is_empty() {
        let rules: Vec<String> = cfg
            .protected_routes
            .iter()
            .map(|rule| {
                let roles: Vec<String> = rule.roles.iter().map(ToString::to_string).collect();
                format!("{} ({})", rule.path, roles.join(", "))
            })
            .collect();
        steps.push(format!("Guarded routes: {}", rules.join("; ")));
    }
    steps.push(format!("Start the dev server: {}", pm.run("dev")));
    steps
}
