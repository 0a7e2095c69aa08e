//! Data layer: Prisma schema and client, or Drizzle tables and client, plus
//! the optional seed script.

use super::{Model, models, seed_path};
use crate::domain::config::WebAppConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, indent, when};
use crate::domain::value_objects::{DatabaseProvider, Orm};

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if !cfg.uses_database() {
        return Vec::new();
    }
    match cfg.database.orm {
        Orm::Prisma => prisma(cfg),
        Orm::Drizzle => drizzle(cfg),
    }
}

// ── Prisma ───────────────────────────────────────────────────────────────────

fn prisma(cfg: &WebAppConfig) -> Vec<FileRecord> {
    let mut files = vec![
        FileRecord::new("prisma/schema.prisma", prisma_schema(cfg)),
        FileRecord::new(format!("{}lib/db.{}", cfg.src(), cfg.ext()), prisma_client(cfg)),
    ];
    if let Some(path) = seed_path(cfg) {
        files.push(FileRecord::new(path, prisma_seed(cfg)));
    }
    files
}

fn prisma_schema(cfg: &WebAppConfig) -> String {
    let provider = cfg.database.provider;
    let header = format!(
        r#"generator client {{
  provider = "prisma-client-js"
}}

datasource db {{
  provider = "{provider}"
  url      = env("DATABASE_URL")
}}"#
    );

    let mut parts = vec![header];
    parts.extend(models(cfg).into_iter().map(|m| prisma_model(cfg, m)));
    blocks(parts)
}

fn prisma_model(cfg: &WebAppConfig, model: Model) -> String {
    let mongo = cfg.database.provider == DatabaseProvider::Mongodb;
    let m = cfg.models;
    let id = if mongo {
        "id String @id @default(auto()) @map(\"_id\") @db.ObjectId"
    } else {
        "id String @id @default(cuid())"
    };
    let fk = |name: &str| {
        if mongo {
            format!("{name} String @db.ObjectId")
        } else {
            format!("{name} String")
        }
    };

    let mut lines = vec![id.to_string()];
    match model {
        Model::User => {
            lines.push("email String @unique".into());
            lines.push("name String?".into());
            if m.post {
                lines.push("posts Post[]".into());
            }
            if m.comment {
                lines.push("comments Comment[]".into());
            }
        }
        Model::Post => {
            lines.push("title String".into());
            lines.push("content String?".into());
            lines.push("published Boolean @default(false)".into());
            if m.user {
                lines.push("author User @relation(fields: [authorId], references: [id])".into());
                lines.push(fk("authorId"));
            }
            if m.comment {
                lines.push("comments Comment[]".into());
            }
        }
        Model::Comment => {
            lines.push("body String".into());
            if m.post {
                lines.push("post Post @relation(fields: [postId], references: [id])".into());
                lines.push(fk("postId"));
            }
            if m.user {
                lines.push("author User @relation(fields: [authorId], references: [id])".into());
                lines.push(fk("authorId"));
            }
        }
    }
    if m.timestamps {
        lines.push("createdAt DateTime @default(now())".into());
        lines.push("updatedAt DateTime @updatedAt".into());
    }
    if m.soft_delete {
        lines.push("deletedAt DateTime?".into());
    }

    format!("model {} {{\n{}\n}}", model.pascal(), indent(&lines.join("\n"), 2))
}

fn prisma_client(cfg: &WebAppConfig) -> String {
    let global = if cfg.use_typescript {
        "const globalForPrisma = globalThis as unknown as { prisma?: PrismaClient };"
    } else {
        "const globalForPrisma = globalThis;"
    };
    format!(
        r#"import {{ PrismaClient }} from "@prisma/client";

{global}

export const db = globalForPrisma.prisma ?? new PrismaClient();

if (process.env.NODE_ENV !== "production") {{
  globalForPrisma.prisma = db;
}}
"#
    )
}

fn prisma_seed(cfg: &WebAppConfig) -> String {
    let m = cfg.models;
    let mut steps = Vec::new();
    if m.user {
        steps.push(
            r#"const user = await db.user.upsert({
  where: { email: "demo@example.com" },
  update: {},
  create: { email: "demo@example.com", name: "Demo User" },
});"#
                .to_string(),
        );
    }
    if m.post {
        steps.push(format!(
            r#"const post = await db.post.create({{
  data: {{ title: "Hello, world", content: "Seeded by stackseed.", published: true{} }},
}});"#,
            when(m.user, ", authorId: user.id")
        ));
    }
    if m.comment {
        let mut refs = Vec::new();
        if m.post {
            refs.push("postId: post.id");
        }
        if m.user {
            refs.push("authorId: user.id");
        }
        let refs = when(!refs.is_empty(), format!(", {}", refs.join(", ")));
        steps.push(format!(
            "await db.comment.create({{ data: {{ body: \"First!\"{refs} }} }});"
        ));
    }
    if steps.is_empty() {
        steps.push("console.log(\"No models enabled; nothing to seed.\");".into());
    }

    format!(
        r#"import {{ PrismaClient }} from "@prisma/client";

const db = new PrismaClient();

async function main() {{
{}
}}

main()
  .catch((error) => {{
    console.error(error);
    process.exit(1);
  }})
  .finally(async () => {{
    await db.$disconnect();
  }});
"#,
        indent(&steps.join("\n"), 2)
    )
}

// ── Drizzle ──────────────────────────────────────────────────────────────────

/// Per-dialect column builders.
struct Dialect {
    kit_dialect: &'static str,
    core_module: &'static str,
    table_fn: &'static str,
    imports: &'static str,
}

impl Dialect {
    fn for_provider(provider: DatabaseProvider) -> Self {
        match provider {
            DatabaseProvider::Mysql => Self {
                kit_dialect: "mysql",
                core_module: "drizzle-orm/mysql-core",
                table_fn: "mysqlTable",
                imports: "mysqlTable, varchar, text, boolean, timestamp",
            },
            DatabaseProvider::Sqlite => Self {
                kit_dialect: "sqlite",
                core_module: "drizzle-orm/sqlite-core",
                table_fn: "sqliteTable",
                imports: "sqliteTable, text, integer",
            },
            // MongoDB never reaches here: the validator rejects it with Drizzle.
            DatabaseProvider::Postgresql | DatabaseProvider::Mongodb => Self {
                kit_dialect: "postgresql",
                core_module: "drizzle-orm/pg-core",
                table_fn: "pgTable",
                imports: "pgTable, text, boolean, timestamp",
            },
        }
    }

    fn key(&self, column: &str) -> String {
        if self.table_fn == "mysqlTable" {
            format!("varchar(\"{column}\", {{ length: 36 }})")
        } else {
            format!("text(\"{column}\")")
        }
    }

    fn short_text(&self, column: &str) -> String {
        if self.table_fn == "mysqlTable" {
            format!("varchar(\"{column}\", {{ length: 255 }})")
        } else {
            format!("text(\"{column}\")")
        }
    }

    fn long_text(&self, column: &str) -> String {
        format!("text(\"{column}\")")
    }

    fn boolean(&self, column: &str) -> String {
        if self.table_fn == "sqliteTable" {
            format!("integer(\"{column}\", {{ mode: \"boolean\" }})")
        } else {
            format!("boolean(\"{column}\")")
        }
    }

    fn timestamp(&self, column: &str) -> String {
        if self.table_fn == "sqliteTable" {
            format!("integer(\"{column}\", {{ mode: \"timestamp\" }})")
        } else {
            format!("timestamp(\"{column}\")")
        }
    }
}

fn drizzle(cfg: &WebAppConfig) -> Vec<FileRecord> {
    let (src, ext) = (cfg.src(), cfg.ext());
    let mut files = vec![
        FileRecord::new(format!("drizzle.config.{ext}"), drizzle_config(cfg)),
        FileRecord::new(format!("{src}db/schema.{ext}"), drizzle_schema(cfg)),
        FileRecord::new(format!("{src}db/index.{ext}"), drizzle_client(cfg)),
    ];
    if let Some(path) = seed_path(cfg) {
        files.push(FileRecord::new(path, drizzle_seed(cfg)));
    }
    files
}

fn drizzle_config(cfg: &WebAppConfig) -> String {
    let dialect = Dialect::for_provider(cfg.database.provider);
    format!(
        r#"import {{ defineConfig }} from "drizzle-kit";

export default defineConfig({{
  schema: "./{}db/schema.{}",
  out: "./drizzle",
  dialect: "{}",
  dbCredentials: {{ url: process.env.DATABASE_URL{} }},
}});
"#,
        cfg.src(),
        cfg.ext(),
        dialect.kit_dialect,
        when(cfg.use_typescript, "!"),
    )
}

fn drizzle_schema(cfg: &WebAppConfig) -> String {
    let d = Dialect::for_provider(cfg.database.provider);
    let m = cfg.models;
    let id = format!("id: {}.primaryKey().$defaultFn(() => crypto.randomUUID()),", d.key("id"));

    let mut tables = vec![format!("import {{ {} }} from \"{}\";", d.imports, d.core_module)];
    for model in models(cfg) {
        let mut cols = vec![id.clone()];
        match model {
            Model::User => {
                cols.push(format!("email: {}.notNull().unique(),", d.short_text("email")));
                cols.push(format!("name: {},", d.short_text("name")));
            }
            Model::Post => {
                cols.push(format!("title: {}.notNull(),", d.short_text("title")));
                cols.push(format!("content: {},", d.long_text("content")));
                cols.push(format!("published: {}.notNull().default(false),", d.boolean("published")));
                if m.user {
                    cols.push(format!(
                        "authorId: {}.notNull().references(() => users.id),",
                        d.key("author_id")
                    ));
                }
            }
            Model::Comment => {
                cols.push(format!("body: {}.notNull(),", d.long_text("body")));
                if m.post {
                    cols.push(format!(
                        "postId: {}.notNull().references(() => posts.id),",
                        d.key("post_id")
                    ));
                }
                if m.user {
                    cols.push(format!(
                        "authorId: {}.notNull().references(() => users.id),",
                        d.key("author_id")
                    ));
                }
            }
        }
        if m.timestamps {
            for (field, column) in [("createdAt", "created_at"), ("updatedAt", "updated_at")] {
                cols.push(format!(
                    "{field}: {}.notNull().$defaultFn(() => new Date()),",
                    d.timestamp(column)
                ));
            }
        }
        if m.soft_delete {
            cols.push(format!("deletedAt: {},", d.timestamp("deleted_at")));
        }

        tables.push(format!(
            "export const {} = {}(\"{}\", {{\n{}\n}});",
            model.plural(),
            d.table_fn,
            model.plural(),
            indent(&cols.join("\n"), 2)
        ));
    }
    blocks(tables)
}

fn drizzle_client(cfg: &WebAppConfig) -> String {
    let url = if cfg.use_typescript {
        "process.env.DATABASE_URL!"
    } else {
        "process.env.DATABASE_URL"
    };
    match cfg.database.provider {
        DatabaseProvider::Mysql => format!(
            r#"import {{ drizzle }} from "drizzle-orm/mysql2";
import mysql from "mysql2/promise";
import * as schema from "./schema";

const pool = mysql.createPool({url});

export const db = drizzle(pool, {{ schema, mode: "default" }});
"#
        ),
        DatabaseProvider::Sqlite => r#"import { drizzle } from "drizzle-orm/better-sqlite3";
import Database from "better-sqlite3";
import * as schema from "./schema";

const sqlite = new Database("dev.db");

export const db = drizzle(sqlite, { schema });
"#
        .to_string(),
        DatabaseProvider::Postgresql | DatabaseProvider::Mongodb => format!(
            r#"import {{ drizzle }} from "drizzle-orm/node-postgres";
import {{ Pool }} from "pg";
import * as schema from "./schema";

const pool = new Pool({{ connectionString: {url} }});

export const db = drizzle(pool, {{ schema }});
"#
        ),
    }
}

fn drizzle_seed(cfg: &WebAppConfig) -> String {
    let m = cfg.models;
    let enabled = models(cfg);
    let tables: Vec<&str> = enabled.iter().map(|m| m.plural()).collect();

    let mut steps = Vec::new();
    if m.user {
        steps.push(
            "const userId = crypto.randomUUID();\nawait db.insert(users).values({ id: userId, email: \"demo@example.com\", name: \"Demo User\" });"
                .to_string(),
        );
    }
    if m.post {
        steps.push(format!(
            "const postId = crypto.randomUUID();\nawait db.insert(posts).values({{ id: postId, title: \"Hello, world\", content: \"Seeded by stackseed.\", published: true{} }});",
            when(m.user, ", authorId: userId")
        ));
    }
    if m.comment {
        let mut refs = Vec::new();
        if m.post {
            refs.push("postId");
        }
        if m.user {
            refs.push("authorId: userId");
        }
        let refs = when(!refs.is_empty(), format!(", {}", refs.join(", ")));
        steps.push(format!(
            "await db.insert(comments).values({{ body: \"First!\"{refs} }});"
        ));
    }
    if steps.is_empty() {
        steps.push("console.log(\"No models enabled; nothing to seed.\");".into());
    }

    let imports = blocks([
        "import { db } from \"./index\";".to_string(),
        when(
            !tables.is_empty(),
            format!("import {{ {} }} from \"./schema\";", tables.join(", ")),
        ),
    ])
    .replace("\n\n", "\n");

    format!(
        r#"{imports}
async function main() {{
{}
}}

main()
  .then(() => process.exit(0))
  .catch((error) => {{
    console.error(error);
    process.exit(1);
  }});
"#,
        indent(&steps.join("\n"), 2)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;
    use crate::domain::value_objects::WebAppFeature;

    fn find<'a>(files: &'a [FileRecord], path: &str) -> &'a FileRecord {
        files
            .iter()
            .find(|f| f.path.as_str() == path)
            .unwrap_or_else(|| panic!("missing {path}"))
    }

    #[test]
    fn default_prisma_schema_has_enabled_models() {
        let files = generate(&defaults::webapp());
        let schema = &find(&files, "prisma/schema.prisma").content;
        assert!(schema.contains("provider = \"postgresql\""));
        assert!(schema.contains("model User {"));
        assert!(schema.contains("model Post {"));
        assert!(!schema.contains("model Comment {"));
        assert!(schema.contains("author User @relation(fields: [authorId], references: [id])"));
        assert!(schema.contains("createdAt DateTime @default(now())"));
    }

    #[test]
    fn seed_follows_seeding_feature() {
        let files = generate(&defaults::webapp());
        assert!(find(&files, "prisma/seed.ts").content.contains("db.user.upsert"));

        let mut cfg = defaults::webapp();
        cfg.features.remove(&WebAppFeature::Seeding);
        let files = generate(&cfg);
        assert!(!files.iter().any(|f| f.path.as_str() == "prisma/seed.ts"));
    }

    #[test]
    fn mongodb_uses_object_ids() {
        let mut cfg = defaults::webapp();
        cfg.database.provider = DatabaseProvider::Mongodb;
        let files = generate(&cfg);
        let schema = &find(&files, "prisma/schema.prisma").content;
        assert!(schema.contains("@map(\"_id\") @db.ObjectId"));
        assert!(schema.contains("authorId String @db.ObjectId"));
    }

    #[test]
    fn drizzle_sqlite_uses_integer_modes() {
        let mut cfg = defaults::webapp();
        cfg.database.orm = Orm::Drizzle;
        cfg.database.provider = DatabaseProvider::Sqlite;
        let files = generate(&cfg);
        let schema = &find(&files, "src/db/schema.ts").content;
        assert!(schema.contains("sqliteTable(\"users\""));
        assert!(schema.contains("integer(\"published\", { mode: \"boolean\" })"));
        assert!(find(&files, "drizzle.config.ts").content.contains("dialect: \"sqlite\""));
        assert!(find(&files, "src/db/seed.ts").content.contains("import { users, posts } from \"./schema\";"));
        assert!(!files.iter().any(|f| f.path.as_str().starts_with("prisma/")));
    }

    #[test]
    fn no_files_without_database() {
        let mut cfg = defaults::webapp();
        cfg.features.clear();
        assert!(generate(&cfg).is_empty());
    }

    #[test]
    fn seed_without_models_still_runs() {
        let mut cfg = defaults::webapp();
        cfg.models.user = false;
        cfg.models.post = false;
        let files = generate(&cfg);
        assert!(find(&files, "prisma/seed.ts").content.contains("nothing to seed"));
    }
}
