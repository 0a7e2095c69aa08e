//! Zod schemas for the enabled models, request pagination and environment.

use super::{Model, models};
use crate::domain::config::WebAppConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, indent, when, zod_check};
use crate::domain::value_objects::{DatabaseProvider, WebAppFeature};

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if !cfg.has(WebAppFeature::Validation) {
        return Vec::new();
    }

    let dir = format!("{}lib/validation", cfg.src());
    let ext = cfg.ext();
    let enabled = models(cfg);

    let mut files = vec![
        FileRecord::new(format!("{dir}/common.{ext}"), common(cfg)),
        FileRecord::new(format!("{dir}/env.{ext}"), env(cfg)),
    ];
    for &model in &enabled {
        files.push(FileRecord::new(
            format!("{dir}/{}.{ext}", model.name()),
            model_schema(cfg, model),
        ));
    }

    let mut exports = vec!["export * from \"./common\";".to_string()];
    exports.extend(
        enabled
            .iter()
            .map(|m| format!("export * from \"./{}\";", m.name())),
    );
    files.push(FileRecord::new(
        format!("{dir}/index.{ext}"),
        format!("{}\n", exports.join("\n")),
    ));

    files
}

fn check(cfg: &WebAppConfig, method: &str, args: &str, message: &str) -> String {
    zod_check(cfg.validation.custom_messages, method, args, message)
}

fn object(cfg: &WebAppConfig, name: &str, fields: &[String]) -> String {
    let strict = when(cfg.validation.strict, "\n  .strict()");
    format!(
        "export const {name} = z\n  .object({{\n{}\n  }}){strict};",
        indent(&fields.join("\n"), 4)
    )
}

fn infer(cfg: &WebAppConfig, type_name: &str, schema: &str) -> String {
    when(
        cfg.use_typescript,
        format!("export type {type_name} = z.infer<typeof {schema}>;"),
    )
}

fn model_schema(cfg: &WebAppConfig, model: Model) -> String {
    let m = cfg.models;
    let mut fields = Vec::new();
    match model {
        Model::User => {
            fields.push(format!(
                "email: z.string(){},",
                check(cfg, "email", "", "Enter a valid email address")
            ));
            fields.push(format!(
                "name: z.string(){}{}.optional(),",
                check(cfg, "min", "1", "Name cannot be empty"),
                check(cfg, "max", "100", "Name is too long")
            ));
        }
        Model::Post => {
            fields.push(format!(
                "title: z.string(){}{},",
                check(cfg, "min", "1", "Title is required"),
                check(cfg, "max", "200", "Title is too long")
            ));
            fields.push("content: z.string().optional(),".to_string());
            fields.push("published: z.boolean().default(false),".to_string());
            if m.user {
                fields.push(format!(
                    "authorId: z.string(){},",
                    check(cfg, "min", "1", "Author is required")
                ));
            }
        }
        Model::Comment => {
            fields.push(format!(
                "body: z.string(){}{},",
                check(cfg, "min", "1", "Comment cannot be empty"),
                check(cfg, "max", "2000", "Comment is too long")
            ));
            if m.post {
                fields.push(format!(
                    "postId: z.string(){},",
                    check(cfg, "min", "1", "Post is required")
                ));
            }
            if m.user {
                fields.push(format!(
                    "authorId: z.string(){},",
                    check(cfg, "min", "1", "Author is required")
                ));
            }
        }
    }

    let schema = format!("{}Schema", model.name());
    blocks([
        "import { z } from \"zod\";".to_string(),
        object(cfg, &schema, &fields),
        infer(cfg, &format!("{}Input", model.pascal()), &schema),
    ])
}

fn common(cfg: &WebAppConfig) -> String {
    let number = if cfg.validation.coerce_numbers {
        "z.coerce.number()"
    } else {
        "z.number()"
    };
    let fields = vec![
        format!(
            "page: {number}.int(){}.default(1),",
            check(cfg, "min", "1", "Page must be at least 1")
        ),
        format!(
            "perPage: {number}.int(){}{}.default(20),",
            check(cfg, "min", "1", "Page size must be at least 1"),
            check(cfg, "max", "100", "Page size must be at most 100")
        ),
    ];
    blocks([
        "import { z } from \"zod\";".to_string(),
        format!(
            "export const idSchema = z.string(){};",
            check(cfg, "min", "1", "An id is required")
        ),
        object(cfg, "paginationSchema", &fields),
        infer(cfg, "Pagination", "paginationSchema"),
    ])
}

fn env(cfg: &WebAppConfig) -> String {
    let mut fields = vec![
        "NODE_ENV: z.enum([\"development\", \"test\", \"production\"]).default(\"development\"),"
            .to_string(),
        "NEXT_PUBLIC_APP_URL: z.string().url().optional(),".to_string(),
    ];
    if cfg.uses_database() {
        // SQLite URLs (`file:./dev.db`) are not WHATWG URLs.
        let rule = if cfg.database.provider == DatabaseProvider::Sqlite {
            "z.string().min(1)"
        } else {
            "z.string().url()"
        };
        fields.push(format!("DATABASE_URL: {rule},"));
    }
    if cfg.has(WebAppFeature::Auth) {
        fields.push("AUTH_SECRET: z.string().min(32),".to_string());
        fields.push("AUTH_URL: z.string().url().optional(),".to_string());
    }
    if cfg.security.rate_limiting {
        fields.push("RATE_LIMIT_MAX: z.coerce.number().int().positive().default(60),".to_string());
    }

    blocks([
        "import { z } from \"zod\";".to_string(),
        format!(
            "const envSchema = z.object({{\n{}\n}});",
            indent(&fields.join("\n"), 2)
        ),
        "export const env = envSchema.parse(process.env);".to_string(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    fn content(cfg: &WebAppConfig, path: &str) -> String {
        generate(cfg)
            .into_iter()
            .find(|f| f.path.as_str() == path)
            .map(|f| f.content)
            .unwrap_or_else(|| panic!("missing {path}"))
    }

    #[test]
    fn strict_schemas_by_default() {
        let user = content(&defaults::webapp(), "src/lib/validation/user.ts");
        assert!(user.contains("export const userSchema = z"));
        assert!(user.contains(".strict();"));
        assert!(user.contains("email: z.string().email(),"));
        assert!(user.contains("export type UserInput = z.infer<typeof userSchema>;"));
    }

    #[test]
    fn custom_messages_add_message_arguments() {
        let mut cfg = defaults::webapp();
        cfg.validation.custom_messages = true;
        let post = content(&cfg, "src/lib/validation/post.ts");
        assert!(post.contains(".min(1, { message: \"Title is required\" })"));
    }

    #[test]
    fn coerce_numbers_switches_pagination() {
        let mut cfg = defaults::webapp();
        cfg.validation.coerce_numbers = true;
        let common = content(&cfg, "src/lib/validation/common.ts");
        assert!(common.contains("page: z.coerce.number().int()"));
    }

    #[test]
    fn javascript_skips_type_exports() {
        let mut cfg = defaults::webapp();
        cfg.use_typescript = false;
        let user = content(&cfg, "src/lib/validation/user.js");
        assert!(!user.contains("export type"));
    }

    #[test]
    fn index_reexports_enabled_models() {
        let index = content(&defaults::webapp(), "src/lib/validation/index.ts");
        assert_eq!(
            index,
            "export * from \"./common\";\nexport * from \"./user\";\nexport * from \"./post\";\n"
        );
    }

    #[test]
    fn absent_without_feature() {
        let mut cfg = defaults::webapp();
        cfg.features.remove(&WebAppFeature::Validation);
        assert!(generate(&cfg).is_empty());
    }
}
