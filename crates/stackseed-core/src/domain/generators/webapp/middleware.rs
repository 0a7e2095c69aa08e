use crate::domain::config::WebAppConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, indent, rate_limiter, when};
use crate::domain::value_objects::WebAppFeature;

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if !cfg.has(WebAppFeature::Middleware) {
        return Vec::new();
    }
    vec![FileRecord::new(
        format!("{}middleware.{}", cfg.src(), cfg.ext()),
        middleware(cfg),
    )]
}

fn middleware(cfg: &WebAppConfig) -> String {
    let ts = cfg.use_typescript;
    let t = |typed: &'static str, plain: &'static str| if ts { typed } else { plain };
    let sec = cfg.security;
    let auth = cfg.has(WebAppFeature::Auth);

    let imports = blocks([
        "import { NextResponse } from \"next/server\";",
        when(ts, "import type { NextRequest } from \"next/server\";").as_str(),
        when(auth, "import { auth } from \"@/lib/auth/config\";").as_str(),
    ])
    .replace("\n\n", "\n");

    let rate_limit_helpers = when(sec.rate_limiting, rate_limiter(ts));

    let csrf_helpers = when(
        sec.csrf_protection,
        format!(
            r#"const SAFE_METHODS = new Set(["GET", "HEAD", "OPTIONS"]);

function crossOrigin(request{}){} {{
  const origin = request.headers.get("origin");
  return origin !== null && origin !== request.nextUrl.origin;
}}"#,
            t(": NextRequest", ""),
            t(": boolean", ""),
        ),
    );

    let checks = blocks([
        when(
            sec.rate_limiting,
            r#"const key = request.headers.get("x-forwarded-for") ?? "anonymous";
if (request.nextUrl.pathname.startsWith("/api") && rateLimited(key)) {
  return new NextResponse("Too Many Requests", { status: 429 });
}"#,
        ),
        when(
            sec.csrf_protection,
            r#"if (!SAFE_METHODS.has(request.method) && crossOrigin(request)) {
  return new NextResponse("Forbidden", { status: 403 });
}"#,
        ),
        when(
            auth,
            r#"if (request.nextUrl.pathname.startsWith("/dashboard")) {
  const session = await auth();
  if (!session) {
    return NextResponse.redirect(new URL("/sign-in", request.url));
  }
}"#,
        ),
        "return NextResponse.next();".to_string(),
    ]);

    let handler = format!(
        "export async function middleware(request{}) {{\n{}\n}}",
        t(": NextRequest", ""),
        indent(checks.trim_end(), 2)
    );

    blocks([
        imports,
        rate_limit_helpers,
        csrf_helpers,
        handler,
        "export const config = {\n  matcher: [\"/((?!_next/static|_next/image|favicon.ico).*)\"],\n};"
            .to_string(),
    ])
}
