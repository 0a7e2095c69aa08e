//! String-building helpers shared by the section generators.

use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

use crate::domain::entities::FileRecord;

/// Pinned npm version ranges for every package a generator may reference.
pub static PACKAGE_VERSIONS: &[(&str, &str)] = &[
    ("@hookform/resolvers", "^3.9.0"),
    ("@next/bundle-analyzer", "^15.0.0"),
    ("@prisma/client", "^5.22.0"),
    ("@testing-library/jest-dom", "^6.6.0"),
    ("@testing-library/react", "^16.0.0"),
    ("@types/better-sqlite3", "^7.6.11"),
    ("@types/node", "^22.0.0"),
    ("@types/pg", "^8.11.10"),
    ("@types/react", "^19.0.0"),
    ("@types/react-dom", "^19.0.0"),
    ("@vitejs/plugin-react", "^4.3.0"),
    ("autoprefixer", "^10.4.20"),
    ("better-sqlite3", "^11.5.0"),
    ("drizzle-kit", "^0.28.0"),
    ("drizzle-orm", "^0.36.0"),
    ("eslint", "^9.0.0"),
    ("eslint-config-next", "^15.0.0"),
    ("jose", "^5.9.0"),
    ("jsdom", "^25.0.0"),
    ("mysql2", "^3.11.0"),
    ("next", "^15.0.0"),
    ("next-auth", "^5.0.0-beta.25"),
    ("pg", "^8.13.0"),
    ("postcss", "^8.4.47"),
    ("prisma", "^5.22.0"),
    ("react", "^19.0.0"),
    ("react-dom", "^19.0.0"),
    ("react-hook-form", "^7.53.0"),
    ("tailwindcss", "^3.4.14"),
    ("tsx", "^4.19.0"),
    ("typescript", "^5.6.0"),
    ("vitest", "^2.1.0"),
    ("zod", "^3.23.8"),
];

/// Version range for `package`, `"latest"` when it is not pinned.
pub fn version_of(package: &str) -> &'static str {
    PACKAGE_VERSIONS
        .binary_search_by(|(name, _)| name.cmp(&package))
        .map(|i| PACKAGE_VERSIONS[i].1)
        .unwrap_or("latest")
}

/// Builder for `package.json`.
#[derive(Debug, Default)]
pub struct PackageManifest {
    name: String,
    scripts: BTreeMap<String, String>,
    dependencies: BTreeMap<String, String>,
    dev_dependencies: BTreeMap<String, String>,
    extra: Map<String, Value>,
}

impl PackageManifest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn scripts(mut self, scripts: BTreeMap<String, String>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn dependency(mut self, package: &str) -> Self {
        self.dependencies
            .insert(package.to_string(), version_of(package).to_string());
        self
    }

    pub fn dev_dependency(mut self, package: &str) -> Self {
        self.dev_dependencies
            .insert(package.to_string(), version_of(package).to_string());
        self
    }

    /// Add `package` to dependencies when `enabled`.
    pub fn dependency_if(self, enabled: bool, package: &str) -> Self {
        if enabled { self.dependency(package) } else { self }
    }

    pub fn dev_dependency_if(self, enabled: bool, package: &str) -> Self {
        if enabled { self.dev_dependency(package) } else { self }
    }

    /// Extra top-level key, e.g. the `prisma` seed hook.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut root = json!({
            "name": self.name,
            "version": "0.1.0",
            "private": true,
            "scripts": self.scripts,
            "dependencies": self.dependencies,
            "devDependencies": self.dev_dependencies,
        });
        if let Value::Object(map) = &mut root {
            map.extend(self.extra.clone());
        }
        root
    }

    pub fn into_record(self) -> FileRecord {
        json_file("package.json", &self.to_value())
    }
}

/// A pretty-printed JSON file with a trailing newline.
pub fn json_file(path: &str, value: &Value) -> FileRecord {
    FileRecord::new(path, format!("{value:#}\n"))
}

/// A JavaScript/TypeScript string literal with JSON escaping.
pub fn js_string(s: &str) -> String {
    Value::from(s).to_string()
}

/// A JavaScript/TypeScript array literal of strings.
pub fn js_string_array<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| js_string(s.as_ref())).collect();
    format!("[{}]", quoted.join(", "))
}

/// A chained zod check such as `.min(1)`, with a `{ message }` argument when
/// `custom_messages` is on.
pub fn zod_check(custom_messages: bool, method: &str, args: &str, message: &str) -> String {
    let message = when(
        custom_messages,
        format!("{{ message: {} }}", js_string(message)),
    );
    let all = [args, message.as_str()]
        .into_iter()
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    format!(".{method}({all})")
}

/// Join non-empty blocks with a blank line, ending with one newline.
pub fn blocks<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = parts
        .into_iter()
        .map(|p| p.as_ref().trim_matches('\n').to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{joined}\n")
}

/// `text` when `enabled`, otherwise empty. Pairs with [`blocks`].
pub fn when(enabled: bool, text: impl Into<String>) -> String {
    if enabled { text.into() } else { String::new() }
}

/// Prefix every non-empty line with `width` spaces.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// In-memory fixed-window rate limiter used by generated middleware.
///
/// Defines `rateLimited(key)`; the limit comes from `RATE_LIMIT_MAX`.
pub fn rate_limiter(typed: bool) -> String {
    let t = |annotation: &'static str| if typed { annotation } else { "" };
    format!(
        r#"const WINDOW_MS = 60_000;
const MAX_REQUESTS = Number(process.env.RATE_LIMIT_MAX ?? 60);
const hits = new Map{}();

function rateLimited(key{}){} {{
  const now = Date.now();
  const entry = hits.get(key);
  if (!entry || entry.resetAt < now) {{
    hits.set(key, {{ count: 1, resetAt: now + WINDOW_MS }});
    return false;
  }}
  entry.count += 1;
  return entry.count > MAX_REQUESTS;
}}"#,
        t("<string, { count: number; resetAt: number }>"),
        t(": string"),
        t(": boolean"),
    )
}

/// Body of the `next-env.d.ts` file Next.js expects in TypeScript projects.
pub const NEXT_ENV_DTS: &str = r#"/// <reference types="next" />
/// <reference types="next/image-types/global" />

// NOTE: This file should not be edited
// see https://nextjs.org/docs/basic-features/typescript for more information.
"#;

/// `tsconfig.json` for a Next.js project; `@/*` maps to the source root.
pub fn tsconfig(src: &str, extra_includes: &[&str]) -> FileRecord {
    let mut include = vec![
        "next-env.d.ts".to_string(),
        "**/*.ts".to_string(),
        "**/*.tsx".to_string(),
        ".next/types/**/*.ts".to_string(),
    ];
    include.extend(extra_includes.iter().map(ToString::to_string));

    json_file(
        "tsconfig.json",
        &json!({
            "compilerOptions": {
                "target": "ES2022",
                "lib": ["dom", "dom.iterable", "esnext"],
                "allowJs": true,
                "skipLibCheck": true,
                "strict": true,
                "noEmit": true,
                "esModuleInterop": true,
                "module": "esnext",
                "moduleResolution": "bundler",
                "resolveJsonModule": true,
                "isolatedModules": true,
                "jsx": "preserve",
                "incremental": true,
                "plugins": [{ "name": "next" }],
                "paths": { "@/*": [format!("./{src}*")] }
            },
            "include": include,
            "exclude": ["node_modules"]
        }),
    )
}
