//! Shared TypeScript declarations. JavaScript projects get none.

use super::{Model, models};
use crate::domain::config::WebAppConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, indent};
use crate::domain::value_objects::WebAppFeature;

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if !cfg.use_typescript {
        return Vec::new();
    }

    let dir = format!("{}types", cfg.src());
    let mut files = vec![
        FileRecord::new(format!("{dir}/index.ts"), index(cfg)),
        FileRecord::new(format!("{dir}/env.d.ts"), env(cfg)),
    ];
    if cfg.has(WebAppFeature::Auth) {
        files.push(FileRecord::new(format!("{dir}/next-auth.d.ts"), NEXT_AUTH));
    }
    files
}

fn interface(cfg: &WebAppConfig, model: Model) -> String {
    let m = cfg.models;
    let mut fields = vec!["id: string;".to_string()];
    match model {
        Model::User => {
            fields.push("email: string;".into());
            fields.push("name: string | null;".into());
        }
        Model::Post => {
            fields.push("title: string;".into());
            fields.push("content: string | null;".into());
            fields.push("published: boolean;".into());
            if m.user {
                fields.push("authorId: string;".into());
            }
        }
        Model::Comment => {
            fields.push("body: string;".into());
            if m.post {
                fields.push("postId: string;".into());
            }
            if m.user {
                fields.push("authorId: string;".into());
            }
        }
    }
    if m.timestamps {
        fields.push("createdAt: Date;".into());
        fields.push("updatedAt: Date;".into());
    }
    if m.soft_delete {
        fields.push("deletedAt: Date | null;".into());
    }

    format!(
        "export interface {} {{\n{}\n}}",
        model.pascal(),
        indent(&fields.join("\n"), 2)
    )
}

fn index(cfg: &WebAppConfig) -> String {
    let mut parts: Vec<String> = models(cfg)
        .into_iter()
        .map(|model| interface(cfg, model))
        .collect();
    parts.push(
        r#"export type ApiResponse<T> =
  | { data: T; error?: never }
  | { data?: never; error: { message: string; issues?: unknown } };"#
            .to_string(),
    );
    blocks(parts)
}

fn env(cfg: &WebAppConfig) -> String {
    let mut vars = vec![
        "NODE_ENV: \"development\" | \"test\" | \"production\";".to_string(),
        "NEXT_PUBLIC_APP_URL?: string;".to_string(),
    ];
    if cfg.uses_database() {
        vars.push("DATABASE_URL: string;".into());
    }
    if cfg.has(WebAppFeature::Auth) {
        vars.push("AUTH_SECRET: string;".into());
        vars.push("AUTH_URL?: string;".into());
    }
    if cfg.security.rate_limiting {
        vars.push("RATE_LIMIT_MAX?: string;".into());
    }

    format!(
        "declare namespace NodeJS {{\n  interface ProcessEnv {{\n{}\n  }}\n}}\n",
        indent(&vars.join("\n"), 4)
    )
}

const NEXT_AUTH: &str = r#"import type { DefaultSession } from "next-auth";

declare module "next-auth" {
  interface Session {
    user: {
      id: string;
    } & DefaultSession["user"];
  }
}
"#;
