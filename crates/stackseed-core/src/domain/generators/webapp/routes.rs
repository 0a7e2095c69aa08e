use super::{Model, db_import, models};
use crate::domain::config::WebAppConfig;
use crate::domain::entities::{FileRecord, RenderContext};
use crate::domain::generators::support::{blocks, when};
use crate::domain::value_objects::{Orm, WebAppFeature};

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if cfg.use_app_router {
        app_router(cfg)
    } else {
        pages_router(cfg)
    }
}

// ── App Router ───────────────────────────────────────────────────────────────

fn app_router(cfg: &WebAppConfig) -> Vec<FileRecord> {
    let app = format!("{}app", cfg.src());
    let (ext, jsx) = (cfg.ext(), cfg.jsx_ext());

    let mut files = vec![
        FileRecord::new(format!("{app}/layout.{jsx}"), layout(cfg)),
        FileRecord::new(format!("{app}/page.{jsx}"), home_page(cfg, &format!("{app}/page.{jsx}"))),
        FileRecord::new(format!("{app}/globals.css"), globals_css(cfg)),
        FileRecord::new(format!("{app}/api/health/route.{ext}"), HEALTH_ROUTE),
    ];

    if cfg.has(WebAppFeature::Auth) {
        files.push(FileRecord::new(
            format!("{app}/api/auth/[...nextauth]/route.{ext}"),
            "import { handlers } from \"@/lib/auth/config\";\n\nexport const { GET, POST } = handlers;\n",
        ));
        files.push(FileRecord::new(
            format!("{app}/sign-in/page.{jsx}"),
            sign_in_page(cfg),
        ));
    }

    if cfg.uses_database() {
        for model in models(cfg) {
            files.push(FileRecord::new(
                format!("{app}/api/{}/route.{ext}", model.plural()),
                app_model_route(cfg, model),
            ));
        }
    }

    files
}

fn layout(cfg: &WebAppConfig) -> String {
    let ctx = RenderContext::new(&cfg.project_name);
    if cfg.use_typescript {
        ctx.render(
            r#"import type { Metadata } from "next";
import "./globals.css";

export const metadata: Metadata = {
  title: "{{PROJECT_NAME_TITLE}}",
  description: "Generated by stackseed",
};

export default function RootLayout({ children }: { children: React.ReactNode }) {
  return (
    <html lang="en">
      <body>{children}</body>
    </html>
  );
}
"#,
        )
    } else {
        ctx.render(
            r#"import "./globals.css";

export const metadata = {
  title: "{{PROJECT_NAME_TITLE}}",
  description: "Generated by stackseed",
};

export default function RootLayout({ children }) {
  return (
    <html lang="en">
      <body>{children}</body>
    </html>
  );
}
"#,
        )
    }
}

fn home_page(cfg: &WebAppConfig, path: &str) -> String {
    let class = if cfg.has(WebAppFeature::Tailwind) {
        "mx-auto max-w-2xl p-8"
    } else {
        "container"
    };
    RenderContext::new(&cfg.project_name)
        .with_variable("CLASS", class)
        .with_variable("PATH", path)
        .render(
            r#"export default function HomePage() {
  return (
    <main className="{{CLASS}}">
      <h1>{{PROJECT_NAME_TITLE}}</h1>
      <p>
        Edit <code>{{PATH}}</code> to get started.
      </p>
    </main>
  );
}
"#,
        )
}

fn globals_css(cfg: &WebAppConfig) -> String {
    if cfg.has(WebAppFeature::Tailwind) {
        "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n".to_string()
    } else {
        r#":root {
  --foreground: #171717;
  --background: #ffffff;
}

body {
  margin: 0;
  color: var(--foreground);
  background: var(--background);
  font-family: system-ui, sans-serif;
}

.container {
  max-width: 42rem;
  margin: 0 auto;
  padding: 2rem;
}
"#
        .to_string()
    }
}

const HEALTH_ROUTE: &str = r#"import { NextResponse } from "next/server";

export function GET() {
  return NextResponse.json({ status: "ok" });
}
"#;

fn sign_in_page(cfg: &WebAppConfig) -> String {
    let param = if cfg.use_typescript { "formData: FormData" } else { "formData" };
    format!(
        r#"import {{ signIn }} from "@/lib/auth/config";

export default function SignInPage() {{
  async function authenticate({param}) {{
    "use server";
    await signIn("credentials", formData);
  }}

  return (
    <form action={{authenticate}}>
      <label>
        Email
        <input name="email" type="email" required />
      </label>
      <label>
        Password
        <input name="password" type="password" required />
      </label>
      <button type="submit">Sign in</button>
    </form>
  );
}}
"#
    )
}

/// Statement lines that read and write one model through the configured ORM.
struct DataAccess {
    imports: String,
    list: String,
    create: String,
}

fn data_access(cfg: &WebAppConfig, model: Model) -> DataAccess {
    let db = format!("import {{ db }} from \"{}\";", db_import(cfg));
    let (name, table) = (model.name(), model.plural());
    match cfg.database.orm {
        Orm::Prisma => DataAccess {
            imports: db,
            list: if cfg.models.soft_delete {
                format!("await db.{name}.findMany({{ where: {{ deletedAt: null }} }})")
            } else {
                format!("await db.{name}.findMany()")
            },
            create: format!("await db.{name}.create({{ data }})"),
        },
        Orm::Drizzle => DataAccess {
            imports: format!("{db}\nimport {{ {table} }} from \"@/db/schema\";"),
            list: format!("await db.select().from({table})"),
            create: format!("await db.insert({table}).values(data)"),
        },
    }
}

fn parse_body(cfg: &WebAppConfig, model: Model) -> (String, String) {
    if cfg.has(WebAppFeature::Validation) {
        let schema = format!("{}Schema", model.name());
        (
            format!("import {{ {schema} }} from \"@/lib/validation/{}\";", model.name()),
            format!(
                "const parsed = {schema}.safeParse(body);\n  if (!parsed.success) {{\n    return RESPOND_INVALID;\n  }}\n  const data = parsed.data;"
            ),
        )
    } else {
        (String::new(), "const data = body;".to_string())
    }
}

fn app_model_route(cfg: &WebAppConfig, model: Model) -> String {
    let access = data_access(cfg, model);
    let (validation_import, parse) = parse_body(cfg, model);
    let parse = parse.replace(
        "RESPOND_INVALID",
        "NextResponse.json({ errors: parsed.error.flatten() }, { status: 400 })",
    );
    let request = if cfg.use_typescript { "request: Request" } else { "request" };

    let imports = blocks([
        "import { NextResponse } from \"next/server\";".to_string(),
        access.imports,
        validation_import,
    ])
    .replace("\n\n", "\n");

    format!(
        r#"{imports}
export async function GET() {{
  const rows = {list};
  return NextResponse.json(rows);
}}

export async function POST({request}) {{
  const body = await request.json();
  {parse}
  const created = {create};
  return NextResponse.json(created, {{ status: 201 }});
}}
"#,
        list = access.list,
        create = access.create,
    )
}

// ── Pages Router ─────────────────────────────────────────────────────────────

fn pages_router(cfg: &WebAppConfig) -> Vec<FileRecord> {
    let pages = format!("{}pages", cfg.src());
    let (ext, jsx) = (cfg.ext(), cfg.jsx_ext());

    let mut files = vec![
        FileRecord::new(format!("{pages}/_app.{jsx}"), app_shell(cfg)),
        FileRecord::new(
            format!("{pages}/index.{jsx}"),
            home_page(cfg, &format!("{pages}/index.{jsx}")),
        ),
        FileRecord::new(format!("{}styles/globals.css", cfg.src()), globals_css(cfg)),
        FileRecord::new(format!("{pages}/api/health.{ext}"), pages_health(cfg)),
    ];

    if cfg.has(WebAppFeature::Auth) {
        files.push(FileRecord::new(
            format!("{pages}/api/auth/[...nextauth].{ext}"),
            "import NextAuth from \"next-auth\";\nimport { authConfig } from \"@/lib/auth/config\";\n\nexport default NextAuth(authConfig);\n",
        ));
    }

    if cfg.uses_database() {
        for model in models(cfg) {
            files.push(FileRecord::new(
                format!("{pages}/api/{}.{ext}", model.plural()),
                pages_model_route(cfg, model),
            ));
        }
    }

    files
}

fn app_shell(cfg: &WebAppConfig) -> String {
    if cfg.use_typescript {
        r#"import type { AppProps } from "next/app";
import "@/styles/globals.css";

export default function App({ Component, pageProps }: AppProps) {
  return <Component {...pageProps} />;
}
"#
        .to_string()
    } else {
        r#"import "@/styles/globals.css";

export default function App({ Component, pageProps }) {
  return <Component {...pageProps} />;
}
"#
        .to_string()
    }
}

fn api_signature(cfg: &WebAppConfig) -> (&'static str, &'static str) {
    if cfg.use_typescript {
        (
            "import type { NextApiRequest, NextApiResponse } from \"next\";\n",
            "req: NextApiRequest, res: NextApiResponse",
        )
    } else {
        ("", "req, res")
    }
}

fn pages_health(cfg: &WebAppConfig) -> String {
    let (import, params) = api_signature(cfg);
    let import = when(!import.is_empty(), format!("{import}\n"));
    format!(
        "{import}export default function handler({params}) {{\n  res.status(200).json({{ status: \"ok\" }});\n}}\n"
    )
}

fn pages_model_route(cfg: &WebAppConfig, model: Model) -> String {
    let access = data_access(cfg, model);
    let (validation_import, parse) = parse_body(cfg, model);
    let parse = parse
        .replace(
            "RESPOND_INVALID",
            "res.status(400).json({ errors: parsed.error.flatten() })",
        )
        .replace("\n  ", "\n    ");
    let (type_import, params) = api_signature(cfg);

    let imports = blocks([
        type_import.trim_end().to_string(),
        access.imports,
        validation_import,
    ])
    .replace("\n\n", "\n");

    format!(
        r#"{imports}
export default async function handler({params}) {{
  if (req.method === "GET") {{
    const rows = {list};
    return res.status(200).json(rows);
  }}

  if (req.method === "POST") {{
    const body = req.body;
    {parse}
    const created = {create};
    return res.status(201).json(created);
  }}

  res.setHeader("Allow", "GET, POST");
  return res.status(405).end();
}}
"#,
        list = access.list,
        create = access.create,
    )
}
