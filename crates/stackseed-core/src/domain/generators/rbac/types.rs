use crate::domain::config::RbacConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, js_string, when};
use crate::domain::value_objects::{RbacFeature, Role};

/// Every action any role may be granted, in matrix column order.
pub(crate) const ACTIONS: &[&str] = &["create", "read", "update", "delete", "manage"];

/// Actions granted to at least one declared role.
pub(crate) fn granted_actions(roles: &[Role]) -> Vec<&'static str> {
    ACTIONS
        .iter()
        .copied()
        .filter(|action| roles.iter().any(|r| r.permissions().contains(action)))
        .collect()
}

fn union<I: IntoIterator<Item = String>>(items: I) -> String {
    let members: Vec<String> = items.into_iter().collect();
    if members.is_empty() {
        "never".to_string()
    } else {
        members.join(" | ")
    }
}

pub(super) fn generate(cfg: &RbacConfig) -> Vec<FileRecord> {
    vec![FileRecord::new(
        format!("{}types/rbac.ts", cfg.src()),
        types(cfg),
    )]
}

fn types(cfg: &RbacConfig) -> String {
    let roles = union(cfg.roles.iter().map(|r| js_string(&r.to_string())));
    let actions = union(granted_actions(&cfg.roles).into_iter().map(js_string));

    blocks([
        format!("export type Role = {roles};"),
        format!("export type Action = {actions};"),
        r#"export interface SessionUser {
  id: string;
  email?: string | null;
  role: Role;
}"#
        .to_string(),
        r#"export interface RouteRule {
  path: string;
  roles: readonly Role[];
}"#
        .to_string(),
        when(
            cfg.has(RbacFeature::AuditLog),
            r#"export interface AuditEvent {
  at: string;
  actor: string | null;
  role: Role | null;
  action: string;
  resource: string;
  allowed: boolean;
}"#,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    #[test]
    fn role_union_follows_declared_roles() {
        let files = generate(&defaults::rbac());
        assert_eq!(files[0].path.as_str(), "src/types/rbac.ts");
        let ts = &files[0].content;
        assert!(ts.contains("export type Role = \"admin\" | \"editor\" | \"user\" | \"viewer\";"));
        assert!(ts.contains(
            "export type Action = \"create\" | \"read\" | \"update\" | \"delete\" | \"manage\";"
        ));
        assert!(!ts.contains("AuditEvent"));
    }

    #[test]
    fn actions_shrink_with_roles() {
        assert_eq!(granted_actions(&[Role::Viewer]), ["read"]);
        assert_eq!(
            granted_actions(&[Role::User, Role::Viewer]),
            ["create", "read"]
        );
    }

    #[test]
    fn audit_log_adds_event_type() {
        let mut cfg = defaults::rbac();
        cfg.features.insert(RbacFeature::AuditLog);
        assert!(generate(&cfg)[0].content.contains("export interface AuditEvent {"));
    }
}
