use super::db_import;
use crate::domain::config::WebAppConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, when};
use crate::domain::value_objects::{Orm, WebAppFeature};

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if !cfg.has(WebAppFeature::Auth) {
        return Vec::new();
    }
    let dir = format!("{}lib/auth", cfg.src());
    let ext = cfg.ext();
    vec![
        FileRecord::new(format!("{dir}/config.{ext}"), config(cfg)),
        FileRecord::new(format!("{dir}/session.{ext}"), SESSION),
    ]
}

/// Body of `authorize`: a user lookup when a user table exists, else an echo.
fn authorize_body(cfg: &WebAppConfig) -> &'static str {
    if !cfg.uses_database() || !cfg.models.user {
        return r#"const email = credentials?.email;
if (typeof email !== "string" || email.length === 0) {
  return null;
}
return { id: email, email };"#;
    }
    match cfg.database.orm {
        Orm::Prisma => {
            r#"const email = credentials?.email;
if (typeof email !== "string") {
  return null;
}
return db.user.findUnique({ where: { email } });"#
        }
        Orm::Drizzle => {
            r#"const email = credentials?.email;
if (typeof email !== "string") {
  return null;
}
const [user] = await db.select().from(users).where(eq(users.email, email));
return user ?? null;"#
        }
    }
}

fn config(cfg: &WebAppConfig) -> String {
    let ts = cfg.use_typescript;
    let lookup = cfg.uses_database() && cfg.models.user;
    let drizzle = lookup && cfg.database.orm == Orm::Drizzle;

    let imports = [
        "import NextAuth from \"next-auth\";".to_string(),
        when(ts, "import type { NextAuthConfig } from \"next-auth\";"),
        "import Credentials from \"next-auth/providers/credentials\";".to_string(),
        when(drizzle, "import { eq } from \"drizzle-orm\";"),
        when(lookup, format!("import {{ db }} from \"{}\";", db_import(cfg))),
        when(drizzle, "import { users } from \"@/db/schema\";"),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n");

    let body = authorize_body(cfg)
        .lines()
        .map(|line| format!("        {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    let config = format!(
        r#"export const authConfig{} = {{
  session: {{ strategy: "jwt" }},
  pages: {{ signIn: "/sign-in" }},
  providers: [
    Credentials({{
      credentials: {{ email: {{}}, password: {{}} }},
      async authorize(credentials) {{
{body}
      }},
    }}),
  ],
  callbacks: {{
    session({{ session, token }}) {{
      if (token.sub) {{
        session.user.id = token.sub;
      }}
      return session;
    }},
  }},
}};"#,
        when(ts, ": NextAuthConfig"),
    );

    blocks([
        imports,
        config,
        "export const { handlers, auth, signIn, signOut } = NextAuth(authConfig);".to_string(),
    ])
}

const SESSION: &str = r#"import { redirect } from "next/navigation";
import { auth } from "./config";

export async function currentUser() {
  const session = await auth();
  return session?.user ?? null;
}

export async function requireUser() {
  const user = await currentUser();
  if (!user) {
    redirect("/sign-in");
  }
  return user;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    fn with_auth() -> WebAppConfig {
        let mut cfg = defaults::webapp();
        cfg.features.insert(WebAppFeature::Auth);
        cfg
    }

    #[test]
    fn absent_without_feature() {
        assert!(generate(&defaults::webapp()).is_empty());
    }

    #[test]
    fn config_exports_handlers() {
        let files = generate(&with_auth());
        assert_eq!(files[0].path.as_str(), "src/lib/auth/config.ts");
        assert_eq!(files[1].path.as_str(), "src/lib/auth/session.ts");
        let config = &files[0].content;
        assert!(config.contains("export const authConfig: NextAuthConfig = {"));
        assert!(config.contains("export const { handlers, auth, signIn, signOut } = NextAuth(authConfig);"));
        assert!(config.contains("import { db } from \"@/lib/db\";"));
        assert!(config.contains("db.user.findUnique"));
    }

    #[test]
    fn drizzle_lookup_imports_schema() {
        let mut cfg = with_auth();
        cfg.database.orm = Orm::Drizzle;
        let config = &generate(&cfg)[0].content;
        assert!(config.contains("import { users } from \"@/db/schema\";"));
        assert!(config.contains("eq(users.email, email)"));
    }

    #[test]
    fn without_user_model_echoes_credentials() {
        let mut cfg = with_auth();
        cfg.models.user = false;
        cfg.use_typescript = false;
        let config = &generate(&cfg)[0].content;
        assert!(!config.contains("import { db }"));
        assert!(config.contains("return { id: email, email };"));
        assert!(config.contains("export const authConfig = {"));
    }
}
