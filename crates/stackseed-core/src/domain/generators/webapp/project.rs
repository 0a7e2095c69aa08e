use serde_json::json;

use super::{package_scripts, seed_command, instructions};
use crate::domain::config::WebAppConfig;
use crate::domain::entities::{FileRecord, RenderContext};
use crate::domain::generators::support::{
    NEXT_ENV_DTS, PackageManifest, blocks, indent, json_file, tsconfig, when,
};
use crate::domain::value_objects::{DatabaseProvider, Orm, WebAppFeature};

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    let mut files = vec![package_json(cfg)];

    if cfg.use_typescript {
        files.push(tsconfig(cfg.src(), &[]));
        files.push(FileRecord::new("next-env.d.ts", NEXT_ENV_DTS));
    } else {
        files.push(jsconfig(cfg));
    }

    files.push(next_config(cfg));
    files.push(json_file(".eslintrc.json", &json!({ "extends": "next/core-web-vitals" })));
    files.push(FileRecord::new(".gitignore", gitignore(cfg)));
    files.push(FileRecord::new(".env.example", env_example(cfg)));
    files.push(FileRecord::new("README.md", readme(cfg)));
    files
}

fn package_json(cfg: &WebAppConfig) -> FileRecord {
    let ts = cfg.use_typescript;
    let tailwind = cfg.has(WebAppFeature::Tailwind);
    let testing = cfg.has(WebAppFeature::Testing);
    let drizzle = cfg.uses_drizzle();
    let provider = cfg.database.provider;

    let mut manifest = PackageManifest::new(&cfg.project_name)
        .scripts(package_scripts(cfg))
        .dependency("next")
        .dependency("react")
        .dependency("react-dom")
        .dependency_if(cfg.has(WebAppFeature::Validation), "zod")
        .dependency_if(cfg.has(WebAppFeature::Auth), "next-auth")
        .dependency_if(cfg.uses_prisma(), "@prisma/client")
        .dev_dependency_if(cfg.uses_prisma(), "prisma")
        .dependency_if(drizzle, "drizzle-orm")
        .dev_dependency_if(drizzle, "drizzle-kit")
        .dependency_if(drizzle && provider == DatabaseProvider::Postgresql, "pg")
        .dev_dependency_if(drizzle && ts && provider == DatabaseProvider::Postgresql, "@types/pg")
        .dependency_if(drizzle && provider == DatabaseProvider::Mysql, "mysql2")
        .dependency_if(drizzle && provider == DatabaseProvider::Sqlite, "better-sqlite3")
        .dev_dependency_if(
            drizzle && ts && provider == DatabaseProvider::Sqlite,
            "@types/better-sqlite3",
        )
        .dev_dependency("eslint")
        .dev_dependency("eslint-config-next")
        .dev_dependency_if(ts, "typescript")
        .dev_dependency_if(ts, "@types/node")
        .dev_dependency_if(ts, "@types/react")
        .dev_dependency_if(ts, "@types/react-dom")
        .dev_dependency_if(ts && seed_command(cfg).is_some(), "tsx")
        .dev_dependency_if(tailwind, "tailwindcss")
        .dev_dependency_if(tailwind, "postcss")
        .dev_dependency_if(tailwind, "autoprefixer")
        .dev_dependency_if(testing, "vitest")
        .dev_dependency_if(testing, "@vitejs/plugin-react")
        .dev_dependency_if(testing, "@testing-library/react")
        .dev_dependency_if(testing, "@testing-library/jest-dom")
        .dev_dependency_if(testing, "jsdom")
        .dev_dependency_if(cfg.performance.bundle_analyzer, "@next/bundle-analyzer");

    if cfg.uses_prisma() {
        if let Some(seed) = seed_command(cfg) {
            manifest = manifest.field("prisma", json!({ "seed": seed }));
        }
    }

    manifest.into_record()
}

fn jsconfig(cfg: &WebAppConfig) -> FileRecord {
    json_file(
        "jsconfig.json",
        &json!({
            "compilerOptions": {
                "paths": { "@/*": [format!("./{}*", cfg.src())] }
            }
        }),
    )
}

fn next_config(cfg: &WebAppConfig) -> FileRecord {
    let perf = cfg.performance;
    let sec = cfg.security;

    let images = if perf.image_optimization {
        "images: {\n  formats: [\"image/avif\", \"image/webp\"],\n},"
    } else {
        "images: {\n  unoptimized: true,\n},"
    };

    let mut header_rules = Vec::new();
    if sec.security_headers {
        header_rules.push(
            r#"{
  source: "/(.*)",
  headers: [
    { key: "X-Frame-Options", value: "DENY" },
    { key: "X-Content-Type-Options", value: "nosniff" },
    { key: "Referrer-Policy", value: "strict-origin-when-cross-origin" },
    { key: "Permissions-Policy", value: "camera=(), microphone=(), geolocation=()" },
  ],
},"#,
        );
    }
    if perf.cache_headers {
        header_rules.push(
            r#"{
  source: "/_next/static/(.*)",
  headers: [{ key: "Cache-Control", value: "public, max-age=31536000, immutable" }],
},"#,
        );
    }

    let headers = when(
        !header_rules.is_empty(),
        format!(
            "async headers() {{\n  return [\n{}\n  ];\n}},",
            indent(&header_rules.join("\n"), 4)
        ),
    );

    let body = blocks([images.to_string(), headers]);
    let config = format!(
        "/** @type {{import('next').NextConfig}} */\nconst nextConfig = {{\n  reactStrictMode: true,\n{}\n}};",
        indent(body.trim_end(), 2)
    );

    let content = if perf.bundle_analyzer {
        blocks([
            "import bundleAnalyzer from \"@next/bundle-analyzer\";".to_string(),
            "const withBundleAnalyzer = bundleAnalyzer({\n  enabled: process.env.ANALYZE === \"true\",\n});".to_string(),
            config,
            "export default withBundleAnalyzer(nextConfig);".to_string(),
        ])
    } else {
        blocks([config, "export default nextConfig;".to_string()])
    };

    FileRecord::new("next.config.mjs", content)
}

fn gitignore(cfg: &WebAppConfig) -> String {
    blocks([
        "# dependencies\n/node_modules\n/.pnp\n.pnp.js",
        "# testing\n/coverage",
        "# next.js\n/.next/\n/out/\nnext-env.d.ts\n*.tsbuildinfo",
        "# env files\n.env\n.env*.local",
        "# debug\nnpm-debug.log*\nyarn-debug.log*\nyarn-error.log*",
        when(
            cfg.uses_database() && cfg.database.provider == DatabaseProvider::Sqlite,
            "# local database\n*.db\n*.db-journal",
        )
        .as_str(),
    ])
}

fn env_example(cfg: &WebAppConfig) -> String {
    let database = when(
        cfg.uses_database(),
        format!(
            "# Database\nDATABASE_URL=\"{}\"",
            cfg.database.provider.example_url(&cfg.project_name)
        ),
    );
    let auth = when(
        cfg.has(WebAppFeature::Auth),
        "# Auth\nAUTH_SECRET=\"change-me\"\nAUTH_URL=\"http://localhost:3000\"",
    );
    let rate_limit = when(
        cfg.security.rate_limiting,
        "# Rate limiting (requests per minute per client)\nRATE_LIMIT_MAX=\"60\"",
    );
    blocks([
        "# Copy to .env and adjust for your environment\nNEXT_PUBLIC_APP_URL=\"http://localhost:3000\"".to_string(),
        database,
        auth,
        rate_limit,
    ])
}

const README: &str = r#"# {{PROJECT_NAME_TITLE}}

A Next.js application scaffolded by stackseed.

## Stack

{{STACK}}

## Getting started

{{STEPS}}

## Scripts

| Script | Command |
|--------|---------|
{{SCRIPTS}}
"#;

fn readme(cfg: &WebAppConfig) -> String {
    let mut stack = vec![format!(
        "- Next.js ({} router) with {}",
        if cfg.use_app_router { "App" } else { "Pages" },
        if cfg.use_typescript { "TypeScript" } else { "JavaScript" }
    )];
    if cfg.uses_database() {
        let orm = match cfg.database.orm {
            Orm::Prisma => "Prisma",
            Orm::Drizzle => "Drizzle ORM",
        };
        stack.push(format!("- {orm} on {}", cfg.database.provider));
    }
    for feature in &cfg.features {
        let line = match feature {
            WebAppFeature::Auth => "- Auth.js sessions",
            WebAppFeature::Validation => "- Zod validation",
            WebAppFeature::Middleware => "- Edge middleware",
            WebAppFeature::Testing => "- Vitest + Testing Library",
            WebAppFeature::Docker => "- Docker image and compose file",
            WebAppFeature::Tailwind => "- Tailwind CSS",
            WebAppFeature::Database | WebAppFeature::Seeding => continue,
        };
        stack.push(line.to_string());
    }

    let steps = instructions(cfg)
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    let scripts = package_scripts(cfg)
        .iter()
        .map(|(name, command)| format!("| `{name}` | `{command}` |"))
        .collect::<Vec<_>>()
        .join("\n");

    RenderContext::new(&cfg.project_name)
        .with_variable("STACK", stack.join("\n"))
        .with_variable("STEPS", steps)
        .with_variable("SCRIPTS", scripts)
        .render(README)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    fn find<'a>(files: &'a [FileRecord], path: &str) -> Option<&'a FileRecord> {
        files.iter().find(|f| f.path.as_str() == path)
    }

    #[test]
    fn typescript_project_gets_tsconfig() {
        let files = generate(&defaults::webapp());
        assert!(find(&files, "tsconfig.json").is_some());
        assert!(find(&files, "jsconfig.json").is_none());
    }

    #[test]
    fn javascript_project_gets_jsconfig() {
        let mut cfg = defaults::webapp();
        cfg.use_typescript = false;
        let files = generate(&cfg);
        assert!(find(&files, "jsconfig.json").is_some());
        assert!(find(&files, "tsconfig.json").is_none());
    }

    #[test]
    fn package_json_parses_and_has_prisma_seed_hook() {
        let files = generate(&defaults::webapp());
        let pkg: serde_json::Value =
            serde_json::from_str(&find(&files, "package.json").unwrap().content).unwrap();
        assert_eq!(pkg["name"], "my-app");
        assert_eq!(pkg["prisma"]["seed"], "tsx prisma/seed.ts");
        assert!(pkg["dependencies"]["@prisma/client"].is_string());
    }

    #[test]
    fn next_config_reflects_headers() {
        let mut cfg = defaults::webapp();
        cfg.security.security_headers = false;
        cfg.performance.cache_headers = false;
        let files = generate(&cfg);
        let next = &find(&files, "next.config.mjs").unwrap().content;
        assert!(!next.contains("headers()"));

        cfg.performance.cache_headers = true;
        let files = generate(&cfg);
        let next = &find(&files, "next.config.mjs").unwrap().content;
        assert!(next.contains("immutable"));
    }

    #[test]
    fn env_example_has_database_url() {
        let files = generate(&defaults::webapp());
        let env = &find(&files, ".env.example").unwrap().content;
        assert!(env.contains("DATABASE_URL=\"postgresql://"));
    }

    #[test]
    fn readme_lists_steps_and_scripts() {
        let files = generate(&defaults::webapp());
        let readme = &find(&files, "README.md").unwrap().content;
        assert!(readme.starts_with("# My App"));
        assert!(readme.contains("2. Install dependencies: npm install"));
        assert!(readme.contains("| `dev` | `next dev` |"));
    }
}
