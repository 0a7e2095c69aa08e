//! Web-app sections.
//!
//! | Section | Owns |
//! |---------|------|
//! | `project` | root manifests: package.json, ts/jsconfig, next.config.mjs, .gitignore, .env.example, README.md |
//! | `routes` | `<src>app/**` or `<src>pages/**` + `<src>styles/**` |
//! | `middleware` | `<src>middleware.{ts,js}` |
//! | `schema` | `prisma/**`, `drizzle.config.*`, `<src>db/**`, `<src>lib/db.*` |
//! | `validation` | `<src>lib/validation/**` |
//! | `types` | `<src>types/**` |
//! | `auth` | `<src>lib/auth/**` |
//! | `testing` | `tests/**`, `vitest.config.*` |
//! | `docker` | `Dockerfile`, `.dockerignore`, `docker-compose.yml` |
//! | `styling` | `tailwind.config.*`, `postcss.config.mjs` |

mod auth;
mod docker;
mod middleware;
mod project;
mod routes;
mod schema;
mod styling;
mod testing;
mod types;
mod validation;

use std::collections::BTreeMap;

use super::Section;
use crate::domain::config::WebAppConfig;
use crate::domain::family::TemplateFamily;
use crate::domain::defaults;
use crate::domain::value_objects::{Orm, TemplateKind, WebAppFeature};

pub static SECTIONS: &[Section<WebAppConfig>] = &[
    Section::new("project", project::generate),
    Section::new("routes", routes::generate),
    Section::new("middleware", middleware::generate),
    Section::new("schema", schema::generate),
    Section::new("validation", validation::generate),
    Section::new("types", types::generate),
    Section::new("auth", auth::generate),
    Section::new("testing", testing::generate),
    Section::new("docker", docker::generate),
    Section::new("styling", styling::generate),
];

impl TemplateFamily for WebAppConfig {
    const KIND: TemplateKind = TemplateKind::Webapp;

    fn defaults() -> Self {
        defaults::webapp()
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

/// Data models the `models` sub-config can switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Model {
    User,
    Post,
    Comment,
}

impl Model {
    /// Singular camelCase name: Prisma delegate and schema prefix.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }

    /// Plural name: table and API route segment.
    pub(crate) const fn plural(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Post => "posts",
            Self::Comment => "comments",
        }
    }

    pub(crate) const fn pascal(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Post => "Post",
            Self::Comment => "Comment",
        }
    }
}

/// Enabled models, in dependency order.
pub(crate) fn models(cfg: &WebAppConfig) -> Vec<Model> {
    let m = cfg.models;
    [(m.user, Model::User), (m.post, Model::Post), (m.comment, Model::Comment)]
        .into_iter()
        .filter_map(|(on, model)| on.then_some(model))
        .collect()
}

/// Module specifier of the database client.
pub(crate) fn db_import(cfg: &WebAppConfig) -> &'static str {
    match cfg.database.orm {
        Orm::Prisma => "@/lib/db",
        Orm::Drizzle => "@/db",
    }
}

/// Path of the seed script, when seeding is on.
pub(crate) fn seed_path(cfg: &WebAppConfig) -> Option<String> {
    if !cfg.has(WebAppFeature::Seeding) || !cfg.uses_database() {
        return None;
    }
    Some(match cfg.database.orm {
        Orm::Prisma => format!("prisma/seed.{}", cfg.ext()),
        Orm::Drizzle => format!("{}db/seed.{}", cfg.src(), cfg.ext()),
    })
}

/// Command that runs the seed script.
pub(crate) fn seed_command(cfg: &WebAppConfig) -> Option<String> {
    let path = seed_path(cfg)?;
    let runner = if cfg.use_typescript { "tsx" } else { "node" };
    Some(format!("{runner} {path}"))
}

pub fn package_scripts(cfg: &WebAppConfig) -> BTreeMap<String, String> {
    let mut scripts = BTreeMap::new();
    let mut add = |name: &str, command: String| {
        scripts.insert(name.to_string(), command);
    };

    add("dev", "next dev".into());
    add("build", "next build".into());
    add("start", "next start".into());
    add("lint", "next lint".into());

    if cfg.use_typescript {
        add("typecheck", "tsc --noEmit".into());
    }

    if cfg.uses_prisma() {
        add("db:generate", "prisma generate".into());
        add("db:migrate", "prisma migrate dev".into());
        add("db:studio", "prisma studio".into());
    }
    if cfg.uses_drizzle() {
        add("db:generate", "drizzle-kit generate".into());
        add("db:migrate", "drizzle-kit migrate".into());
        add("db:studio", "drizzle-kit studio".into());
    }
    if let Some(command) = seed_command(cfg) {
        add("db:seed", command);
    }

    if cfg.has(WebAppFeature::Testing) {
        add("test", "vitest run".into());
        add("test:watch", "vitest".into());
    }

    if cfg.has(WebAppFeature::Docker) {
        add("docker:build", format!("docker build -t {} .", cfg.project_name));
        add("docker:up", "docker compose up -d".into());
    }

    if cfg.performance.bundle_analyzer {
        add("analyze", "ANALYZE=true next build".into());
    }

    scripts
}

pub fn instructions(cfg: &WebAppConfig) -> Vec<String> {
    let pm = cfg.package_manager;
    let mut steps = vec![
        format!("cd {}", cfg.project_name),
        format!("Install dependencies: {}", pm.install_command()),
    ];

    if cfg.uses_database() || cfg.has(WebAppFeature::Auth) {
        steps.push("Copy .env.example to .env and fill in the values".into());
    }
    if cfg.has(WebAppFeature::Auth) {
        steps.push("Set AUTH_SECRET in .env (generate one with: openssl rand -base64 32)".into());
    }
    if cfg.has(WebAppFeature::Docker) && cfg.uses_database() && cfg.database.provider.is_server() {
        steps.push("Start the database container: docker compose up -d db".into());
    }
    if cfg.uses_database() {
        steps.push(format!("Apply the schema: {}", pm.run("db:migrate")));
    }
    if seed_path(cfg).is_some() {
        steps.push(format!("Load sample data: {}", pm.run("db:seed")));
    }

    steps.push(format!("Start the dev server: {}", pm.run("dev")));

    if cfg.has(WebAppFeature::Testing) {
        steps.push(format!("Run the tests: {}", pm.run("test")));
    }

    steps
}
