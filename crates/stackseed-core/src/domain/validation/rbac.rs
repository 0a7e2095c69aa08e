use std::collections::HashSet;

use super::{ValidationErrors, check_choice, check_choices, check_project_name};
use crate::domain::config::{PartialRbacConfig, RbacConfig};
use crate::domain::value_objects::{Choice, Role};

pub(super) fn validate(p: &PartialRbacConfig, base: &RbacConfig, errors: &mut ValidationErrors) {
    check_project_name(errors, p.project_name.as_ref());
    check_choice(errors, "package_manager", p.package_manager.as_ref());
    check_choices(errors, "features", p.features.as_ref());

    if let Some(roles) = &p.roles {
        if roles.is_empty() {
            errors.push("roles", "at least one role is required");
        }
        let mut seen = HashSet::new();
        for (i, role) in roles.iter().enumerate() {
            match role {
                Choice::Unknown(_) => check_choice(errors, &format!("roles[{i}]"), Some(role)),
                Choice::Known(r) if !seen.insert(*r) => {
                    errors.push(format!("roles[{i}]"), format!("duplicate role '{r}'"));
                }
                Choice::Known(_) => {}
            }
        }
    }

    let declared: Vec<Role> = match &p.roles {
        Some(roles) => roles.iter().filter_map(Choice::known).collect(),
        None => base.roles.clone(),
    };
    let declared_list = declared
        .iter()
        .map(Role::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    match &p.default_role {
        Some(Choice::Unknown(_)) => check_choice(errors, "default_role", p.default_role.as_ref()),
        Some(Choice::Known(role)) if !declared.contains(role) => errors.push(
            "default_role",
            format!("default role '{role}' is not one of the declared roles ({declared_list})"),
        ),
        // An omitted default must still be declared once `roles` changes.
        None if !declared.is_empty() && !declared.contains(&base.default_role) => errors.push(
            "default_role",
            format!(
                "default role '{}' is not one of the declared roles ({declared_list}); set default_role",
                base.default_role
            ),
        ),
        _ => {}
    }

    if let Some(security) = &p.security {
        check_choice(
            errors,
            "security.session_strategy",
            security.session_strategy.as_ref(),
        );
        if security.session_max_age_hours == Some(0) {
            errors.push(
                "security.session_max_age_hours",
                "session lifetime must be at least one hour",
            );
        }
    }

    let Some(routes) = &p.protected_routes else {
        // Base routes are kept; they must still fit a changed role list.
        if !declared.is_empty() {
            for rule in &base.protected_routes {
                if let Some(missing) = rule.roles.iter().find(|r| !declared.contains(r)) {
                    errors.push(
                        "protected_routes",
                        format!(
                            "default route '{}' allows undeclared role '{missing}'; set protected_routes",
                            rule.path
                        ),
                    );
                }
            }
        }
        return;
    };

    let mut paths = HashSet::new();
    for (i, route) in routes.iter().enumerate() {
        let path = format!("protected_routes[{i}]");

        if !route.path.starts_with('/') {
            errors.push(
                format!("{path}.path"),
                format!("route path '{}' must start with '/'", route.path),
            );
        } else if route.path.chars().any(char::is_whitespace) {
            errors.push(
                format!("{path}.path"),
                format!("route path '{}' must not contain whitespace", route.path),
            );
        } else if !paths.insert(route.path.trim_end_matches('/')) {
            errors.push(
                format!("{path}.path"),
                format!("duplicate route path '{}'", route.path),
            );
        }

        if route.roles.is_empty() {
            errors.push(format!("{path}.roles"), "a route must allow at least one role");
        }
        for (j, role) in route.roles.iter().enumerate() {
            let role_path = format!("{path}.roles[{j}]");
            match role {
                Choice::Unknown(_) => check_choice(errors, &role_path, Some(role)),
                Choice::Known(r) if !declared.contains(r) => errors.push(
                    role_path,
                    format!("role '{r}' is not one of the declared roles ({declared_list})"),
                ),
                Choice::Known(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::config::{PartialConfig, PartialRbacConfig, PartialRouteRule};
    use crate::domain::validation::{ConfigError, ConfigValidator};
    use crate::domain::value_objects::{Choice, Role};

    fn run(p: PartialRbacConfig) -> Vec<ConfigError> {
        ConfigValidator::validate(&PartialConfig::Rbac(p))
    }

    fn paths(errors: &[ConfigError]) -> Vec<&str> {
        errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn unknown_and_duplicate_roles() {
        let errors = run(PartialRbacConfig {
            roles: Some(vec![
                Role::Admin.into(),
                Choice::Unknown("root".into()),
                Role::Admin.into(),
            ]),
            default_role: Some(Role::Admin.into()),
            protected_routes: Some(Vec::new()),
            ..Default::default()
        });
        assert_eq!(paths(&errors), vec!["roles[1]", "roles[2]"]);
        assert!(errors[0].message.contains("admin, editor, moderator, user, viewer"));
    }

    #[test]
    fn default_role_must_be_declared() {
        let errors = run(PartialRbacConfig {
            roles: Some(vec![Role::Admin.into(), Role::Editor.into()]),
            default_role: Some(Role::Viewer.into()),
            protected_routes: Some(Vec::new()),
            ..Default::default()
        });
        assert_eq!(paths(&errors), vec!["default_role"]);
        assert!(errors[0].message.contains("admin, editor"));
    }

    #[test]
    fn omitted_default_role_is_checked_against_new_roles() {
        let errors = run(PartialRbacConfig {
            roles: Some(vec![Role::Admin.into()]),
            protected_routes: Some(Vec::new()),
            ..Default::default()
        });
        assert_eq!(paths(&errors), vec!["default_role"]);
    }

    #[test]
    fn route_rules_are_checked() {
        let errors = run(PartialRbacConfig {
            protected_routes: Some(vec![
                PartialRouteRule::new("admin", &[Role::Admin]),
                PartialRouteRule::new("/reports", &[Role::Moderator]),
                PartialRouteRule::new("/reports", &[]),
            ]),
            ..Default::default()
        });
        assert_eq!(
            paths(&errors),
            vec![
                "protected_routes[0].path",
                "protected_routes[1].roles[0]",
                "protected_routes[2].path",
                "protected_routes[2].roles",
            ]
        );
    }

    #[test]
    fn trailing_slash_does_not_make_a_new_route() {
        let errors = run(PartialRbacConfig {
            protected_routes: Some(vec![
                PartialRouteRule::new("/admin", &[Role::Admin]),
                PartialRouteRule::new("/dashboard", &[Role::User]),
                PartialRouteRule::new("/admin/", &[Role::Admin]),
            ]),
            ..Default::default()
        });
        assert_eq!(paths(&errors), vec!["protected_routes[2].path"]);
        assert!(errors[0].message.contains("duplicate route path '/admin/'"));
    }

    #[test]
    fn kept_default_routes_must_fit_new_roles() {
        let errors = run(PartialRbacConfig {
            roles: Some(vec![Role::Admin.into(), Role::User.into()]),
            ..Default::default()
        });
        assert_eq!(paths(&errors), vec!["protected_routes"]);
        assert!(errors[0].message.contains("/dashboard"));
    }

    #[test]
    fn default_config_routes_are_valid() {
        assert!(run(PartialRbacConfig::default()).is_empty());
    }
}
