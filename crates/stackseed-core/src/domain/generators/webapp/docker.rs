use crate::domain::config::WebAppConfig;
use crate::domain::entities::{FileRecord, RenderContext};
use crate::domain::generators::support::{blocks, indent, when};
use crate::domain::value_objects::{DatabaseProvider, PackageManager, WebAppFeature};

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if !cfg.has(WebAppFeature::Docker) {
        return Vec::new();
    }
    vec![
        FileRecord::new("Dockerfile", dockerfile(cfg)),
        FileRecord::new(".dockerignore", DOCKERIGNORE),
        FileRecord::new("docker-compose.yml", compose(cfg)),
    ]
}

/// Line that makes the package manager available in `node:*-alpine`.
fn toolchain_setup(pm: PackageManager) -> &'static str {
    match pm {
        PackageManager::Npm => "",
        PackageManager::Yarn | PackageManager::Pnpm => "RUN corepack enable",
        PackageManager::Bun => "RUN npm install -g bun",
    }
}

fn dockerfile(cfg: &WebAppConfig) -> String {
    let pm = cfg.package_manager;
    let setup = toolchain_setup(pm);
    let prisma = when(cfg.uses_prisma(), format!("RUN {}", pm.run("db:generate")));

    let install = format!(
        "COPY package.json {}* ./\nRUN {}",
        pm.lockfile(),
        pm.ci_install_command()
    );
    let build = format!("ENV NEXT_TELEMETRY_DISABLED=1\nRUN {}", pm.run("build"));

    let deps = blocks([
        "FROM node:20-alpine AS deps\nWORKDIR /app",
        setup,
        install.as_str(),
    ]);

    let builder = blocks([
        "FROM node:20-alpine AS builder\nWORKDIR /app",
        setup,
        "COPY --from=deps /app/node_modules ./node_modules\nCOPY . .",
        prisma.as_str(),
        build.as_str(),
    ]);

    let runner = blocks([
        "FROM node:20-alpine AS runner\nWORKDIR /app\nENV NODE_ENV=production\nENV NEXT_TELEMETRY_DISABLED=1",
        "COPY --from=builder /app/.next ./.next\nCOPY --from=builder /app/node_modules ./node_modules\nCOPY --from=builder /app/package.json ./package.json",
        "EXPOSE 3000\nCMD [\"node_modules/.bin/next\", \"start\"]",
    ]);

    blocks([deps, builder, runner])
}

const DOCKERIGNORE: &str = "node_modules
.next
.git
.env
.env*.local
coverage
Dockerfile
docker-compose.yml
";

/// Compose service for a server database, keyed by service name `db`.
fn database_service(cfg: &WebAppConfig) -> Option<String> {
    if !cfg.uses_database() || !cfg.database.provider.is_server() {
        return None;
    }
    let db = cfg.project_name.replace('-', "_");
    let service = match cfg.database.provider {
        DatabaseProvider::Postgresql => format!(
            r#"image: postgres:16-alpine
environment:
  POSTGRES_USER: postgres
  POSTGRES_PASSWORD: postgres
  POSTGRES_DB: {db}
ports:
  - "5432:5432"
volumes:
  - db-data:/var/lib/postgresql/data"#
        ),
        DatabaseProvider::Mysql => format!(
            r#"image: mysql:8
environment:
  MYSQL_ROOT_PASSWORD: root
  MYSQL_DATABASE: {db}
ports:
  - "3306:3306"
volumes:
  - db-data:/var/lib/mysql"#
        ),
        DatabaseProvider::Mongodb => r#"image: mongo:7
ports:
  - "27017:27017"
volumes:
  - db-data:/data/db"#
            .to_string(),
        DatabaseProvider::Sqlite => return None,
    };
    Some(service)
}

fn compose(cfg: &WebAppConfig) -> String {
    let db = database_service(cfg);

    let mut app = vec![
        "build: .".to_string(),
        "ports:\n  - \"3000:3000\"".to_string(),
    ];
    if cfg.uses_database() || cfg.has(WebAppFeature::Auth) {
        app.push("env_file:\n  - .env".to_string());
    }
    if db.is_some() {
        // Inside the compose network the database is reachable as `db`.
        let url = cfg
            .database
            .provider
            .example_url(&cfg.project_name)
            .replace("localhost", "db");
        app.push(format!("environment:\n  DATABASE_URL: {url}"));
        app.push("depends_on:\n  - db".to_string());
    }

    let mut services = format!("  app:\n{}", indent(&app.join("\n"), 4));
    if let Some(service) = &db {
        services.push_str(&format!("\n  db:\n{}", indent(service, 4)));
    }

    let volumes = when(db.is_some(), "\n\nvolumes:\n  db-data:");
    RenderContext::new(&cfg.project_name)
        .with_variable("SERVICES", services)
        .with_variable("VOLUMES", volumes)
        .render("name: {{PROJECT_NAME}}\n\nservices:\n{{SERVICES}}{{VOLUMES}}\n")
}
