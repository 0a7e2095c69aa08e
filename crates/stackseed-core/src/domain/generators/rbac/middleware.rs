use std::collections::HashSet;

use crate::domain::config::RbacConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, indent, js_string, js_string_array, rate_limiter, when};
use crate::domain::value_objects::{RbacFeature, SessionStrategy};

/// Emitted when routes are guarded or requests are rate limited.
pub(super) fn generate(cfg: &RbacConfig) -> Vec<FileRecord> {
    let guards = cfg.has(RbacFeature::RouteGuards);
    if !guards && !cfg.security.rate_limiting {
        return Vec::new();
    }
    vec![FileRecord::new(
        format!("{}middleware.ts", cfg.src()),
        middleware(cfg, guards),
    )]
}

fn current_role(strategy: SessionStrategy) -> &'static str {
    match strategy {
        SessionStrategy::Jwt => {
            r#"async function currentRole(request: NextRequest): Promise<Role | null> {
  const token = await getToken({ req: request, secret: process.env.AUTH_SECRET });
  const role = token?.role;
  return isRole(role) ? role : null;
}"#
        }
        // Database sessions are not readable at the edge; ask the session endpoint.
        SessionStrategy::Database => {
            r#"async function currentRole(request: NextRequest): Promise<Role | null> {
  const response = await fetch(new URL("/api/auth/session", request.url), {
    headers: { cookie: request.headers.get("cookie") ?? "" },
  });
  if (!response.ok) {
    return null;
  }
  const session = await response.json();
  const role = session?.user?.role;
  return isRole(role) ? role : null;
}"#
        }
    }
}

/// Matcher entries: every guarded prefix, plus the API when rate limited.
fn matchers(cfg: &RbacConfig, guards: bool) -> Vec<String> {
    let mut paths = Vec::new();
    if guards {
        for rule in &cfg.protected_routes {
            let prefix = rule.path.trim_end_matches('/');
            paths.push(format!("{prefix}/:path*"));
        }
    }
    if cfg.security.rate_limiting {
        paths.push("/api/:path*".to_string());
    }
    let mut seen = HashSet::new();
    paths.retain(|p| seen.insert(p.clone()));
    paths
}

fn middleware(cfg: &RbacConfig, guards: bool) -> String {
    let rate = cfg.security.rate_limiting;
    let audit = guards && cfg.has(RbacFeature::AuditLog);
    let jwt = cfg.security.session_strategy == SessionStrategy::Jwt;

    let imports = [
        "import { NextResponse } from \"next/server\";".to_string(),
        "import type { NextRequest } from \"next/server\";".to_string(),
        when(guards && jwt, "import { getToken } from \"next-auth/jwt\";"),
        when(guards, "import type { Role } from \"@/types/rbac\";"),
        when(guards, "import { isRole } from \"@/lib/rbac/roles\";"),
        when(guards, "import { rolesFor } from \"@/lib/rbac/routes\";"),
        when(audit, "import { recordAudit } from \"@/lib/audit\";"),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n");

    let checks = blocks([
        when(
            rate,
            r#"const key = request.headers.get("x-forwarded-for") ?? "anonymous";
if (request.nextUrl.pathname.startsWith("/api") && rateLimited(key)) {
  return new NextResponse("Too Many Requests", { status: 429 });
}"#,
        ),
        when(
            guards,
            format!(
                r#"const allowed = rolesFor(request.nextUrl.pathname);
if (!allowed) {{
  return NextResponse.next();
}}

const role = await currentRole(request);
if (!role) {{
  return NextResponse.redirect(new URL("/sign-in", request.url));
}}

const permitted = allowed.includes(role);
{}if (!permitted) {{
  return new NextResponse("Forbidden", {{ status: 403 }});
}}"#,
                when(
                    audit,
                    "recordAudit({ actor: null, role, action: \"access\", resource: request.nextUrl.pathname, allowed: permitted });\n",
                )
            ),
        ),
        "return NextResponse.next();".to_string(),
    ]);

    let handler = format!(
        "export async function middleware(request: NextRequest) {{\n{}\n}}",
        indent(checks.trim_end(), 2)
    );

    let matcher: Vec<String> = matchers(cfg, guards);
    let config = if matcher.is_empty() {
        // Guards with no rules still need a valid matcher.
        format!("export const config = {{\n  matcher: {},\n}};", js_string("/:path*"))
    } else {
        format!(
            "export const config = {{\n  matcher: {},\n}};",
            js_string_array(&matcher)
        )
    };

    blocks([
        imports,
        when(rate, rate_limiter(true)),
        when(guards, current_role(cfg.security.session_strategy)),
        handler,
        config,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::RouteRule;
    use crate::domain::defaults;
    use crate::domain::value_objects::Role;

    fn content(cfg: &RbacConfig) -> String {
        generate(cfg).remove(0).content
    }

    #[test]
    fn guards_use_jwt_by_default() {
        let cfg = defaults::rbac();
        let files = generate(&cfg);
        assert_eq!(files[0].path.as_str(), "src/middleware.ts");
        let ts = &files[0].content;
        assert!(ts.contains("import { getToken } from \"next-auth/jwt\";"));
        assert!(ts.contains("const allowed = rolesFor(request.nextUrl.pathname);"));
        assert!(ts.contains("matcher: [\"/admin/:path*\", \"/dashboard/:path*\"],"));
        assert!(!ts.contains("rateLimited"));
    }

    #[test]
    fn database_sessions_query_endpoint() {
        let mut cfg = defaults::rbac();
        cfg.security.session_strategy = SessionStrategy::Database;
        let ts = content(&cfg);
        assert!(!ts.contains("getToken"));
        assert!(ts.contains("/api/auth/session"));
    }

    #[test]
    fn audit_records_decisions() {
        let mut cfg = defaults::rbac();
        cfg.features.insert(RbacFeature::AuditLog);
        let ts = content(&cfg);
        assert!(ts.contains("import { recordAudit } from \"@/lib/audit\";"));
        assert!(ts.contains("recordAudit({ actor: null, role, action: \"access\""));
    }

    #[test]
    fn rate_limiting_without_guards() {
        let mut cfg = defaults::rbac();
        cfg.features.remove(&RbacFeature::RouteGuards);
        assert!(generate(&cfg).is_empty());

        cfg.security.rate_limiting = true;
        let ts = content(&cfg);
        assert!(ts.contains("function rateLimited(key: string): boolean {"));
        assert!(!ts.contains("rolesFor"));
        assert!(ts.contains("matcher: [\"/api/:path*\"],"));
    }

    #[test]
    fn repeated_matchers_are_listed_once() {
        let mut cfg = defaults::rbac();
        cfg.security.rate_limiting = true;
        cfg.protected_routes = vec![
            RouteRule {
                path: "/api".into(),
                roles: vec![Role::User],
            },
            RouteRule {
                path: "/admin".into(),
                roles: vec![Role::Admin],
            },
        ];
        assert_eq!(matchers(&cfg, true), vec!["/api/:path*", "/admin/:path*"]);
    }
}
