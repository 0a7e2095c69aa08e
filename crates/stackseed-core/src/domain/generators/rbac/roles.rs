//! Role hierarchy, permission matrix and route table under `lib/rbac`.

use super::types::granted_actions;
use crate::domain::config::RbacConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, indent, js_string, js_string_array, when};
use crate::domain::value_objects::{RbacFeature, SessionStrategy};

pub(super) fn generate(cfg: &RbacConfig) -> Vec<FileRecord> {
    let dir = format!("{}lib/rbac", cfg.src());
    let helpers = cfg.has(RbacFeature::PermissionHelpers);

    let mut files = vec![
        FileRecord::new(format!("{dir}/roles.ts"), roles(cfg)),
        FileRecord::new(format!("{dir}/permissions.ts"), permissions(cfg)),
        FileRecord::new(format!("{dir}/routes.ts"), routes(cfg)),
        FileRecord::new(format!("{dir}/session.ts"), session(cfg)),
    ];
    if helpers {
        files.push(FileRecord::new(format!("{dir}/guards.ts"), guards(cfg)));
    }

    let mut modules = vec!["roles", "permissions", "routes", "session"];
    if helpers {
        modules.push("guards");
    }
    let index: Vec<String> = modules
        .iter()
        .map(|m| format!("export * from \"./{m}\";"))
        .collect();
    files.push(FileRecord::new(
        format!("{dir}/index.ts"),
        format!("{}\n", index.join("\n")),
    ));
    files
}

fn role_names(cfg: &RbacConfig) -> Vec<String> {
    cfg.roles.iter().map(ToString::to_string).collect()
}

fn roles(cfg: &RbacConfig) -> String {
    let names = role_names(cfg);
    let count = names.len();
    let ranks: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{name}: {},", count - i))
        .collect();

    blocks([
        "import type { Role } from \"@/types/rbac\";".to_string(),
        format!(
            "/** Declared roles, most privileged first. */\nexport const ROLES: readonly Role[] = {};",
            js_string_array(&names)
        ),
        format!(
            "export const DEFAULT_ROLE: Role = {};",
            js_string(&cfg.default_role.to_string())
        ),
        format!(
            "const RANK: Record<Role, number> = {{\n{}\n}};",
            indent(&ranks.join("\n"), 2)
        ),
        r#"export function isRole(value: unknown): value is Role {
  return typeof value === "string" && (ROLES as readonly string[]).includes(value);
}"#
        .to_string(),
        r#"/** Whether `role` is at least as privileged as `minimum`. */
export function atLeast(role: Role, minimum: Role): boolean {
  return RANK[role] >= RANK[minimum];
}"#
        .to_string(),
    ])
}

fn permissions(cfg: &RbacConfig) -> String {
    let granted = granted_actions(&cfg.roles);
    let rows: Vec<String> = cfg
        .roles
        .iter()
        .map(|role| {
            let actions: Vec<&str> = granted
                .iter()
                .copied()
                .filter(|a| role.permissions().contains(a))
                .collect();
            format!("{role}: {},", js_string_array(&actions))
        })
        .collect();

    blocks([
        "import type { Action, Role } from \"@/types/rbac\";".to_string(),
        format!(
            "export const PERMISSIONS: Record<Role, readonly Action[]> = {{\n{}\n}};",
            indent(&rows.join("\n"), 2)
        ),
        r#"export function can(role: Role, action: Action): boolean {
  return PERMISSIONS[role].includes(action);
}"#
        .to_string(),
    ])
}

const ROLES_FOR: &str = r#"/** Roles allowed on `pathname` by the longest matching rule; null when unguarded. */
export function rolesFor(pathname: string): readonly Role[] | null {
  let match: RouteRule | null = null;
  for (const rule of PROTECTED_ROUTES) {
    const hit = pathname === rule.path || pathname.startsWith(`${rule.path}/`);
    if (hit && (!match || rule.path.length > match.path.length)) {
      match = rule;
    }
  }
  return match ? match.roles : null;
}"#;

fn routes(cfg: &RbacConfig) -> String {
    let rules: Vec<String> = cfg
        .protected_routes
        .iter()
        .map(|rule| {
            let roles: Vec<String> = rule.roles.iter().map(ToString::to_string).collect();
            format!(
                "{{ path: {}, roles: {} }},",
                js_string(&rule.path),
                js_string_array(&roles)
            )
        })
        .collect();
    let table = if rules.is_empty() {
        "export const PROTECTED_ROUTES: readonly RouteRule[] = [];".to_string()
    } else {
        format!(
            "export const PROTECTED_ROUTES: readonly RouteRule[] = [\n{}\n];",
            indent(&rules.join("\n"), 2)
        )
    };

    blocks([
        "import type { Role, RouteRule } from \"@/types/rbac\";",
        table.as_str(),
        ROLES_FOR,
    ])
}

fn session(cfg: &RbacConfig) -> String {
    let strategy = match cfg.security.session_strategy {
        SessionStrategy::Jwt => "jwt",
        SessionStrategy::Database => "database",
    };
    format!(
        "export const SESSION_STRATEGY = \"{strategy}\" as const;\n\n/** Session lifetime in seconds. */\nexport const SESSION_MAX_AGE = {} * 60 * 60;\n",
        cfg.security.session_max_age_hours
    )
}

fn guards(cfg: &RbacConfig) -> String {
    let audit = cfg.has(RbacFeature::AuditLog);
    let imports = [
        "import type { Action, Role, SessionUser } from \"@/types/rbac\";".to_string(),
        when(audit, "import { recordAudit } from \"@/lib/audit\";"),
        "import { can } from \"./permissions\";".to_string(),
        "import { atLeast } from \"./roles\";".to_string(),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join("\n");

    let record = when(
        audit,
        "  recordAudit({ actor: user?.id ?? null, role: user?.role ?? null, action, resource, allowed });\n",
    );

    blocks([
        imports,
        r#"export class ForbiddenError extends Error {
  constructor(message = "Forbidden") {
    super(message);
    this.name = "ForbiddenError";
  }
}"#
        .to_string(),
        r#"/** Returns the user when their role ranks at least `minimum`, otherwise throws. */
export function requireRole(user: SessionUser | null, minimum: Role): SessionUser {
  if (!user || !atLeast(user.role, minimum)) {
    throw new ForbiddenError(`Requires the ${minimum} role`);
  }
  return user;
}"#
        .to_string(),
        format!(
            r#"/** Returns the user when their role grants `action`, otherwise throws. */
export function requirePermission(
  user: SessionUser | null,
  action: Action,
  resource: string,
): SessionUser {{
  const allowed = user !== null && can(user.role, action);
{record}  if (!user || !allowed) {{
    throw new ForbiddenError(`Cannot ${{action}} ${{resource}}`);
  }}
  return user;
}}"#
        ),
    ])
}
