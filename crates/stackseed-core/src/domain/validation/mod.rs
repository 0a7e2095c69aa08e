//! Configuration validation.
//!
//! Validation never short-circuits: every check runs and every violation is
//! recorded as one [`ConfigError`], so callers can fix all problems in one
//! pass. Cross-field rules look at *effective* values: a field the partial
//! omits is read from the base config it will be merged onto.

mod forms;
mod rbac;
mod webapp;

use serde::Serialize;
use std::fmt;

use crate::domain::config::{FullConfig, PartialConfig};
use crate::domain::defaults;
use crate::domain::value_objects::{Choice, ChoiceSet};

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConfigError {
    /// Dotted path of the offending field, e.g. `forms[0].fields[2].kind`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Accumulator threaded through the per-family checks.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<ConfigError>);

impl ValidationErrors {
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(ConfigError {
            path: path.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_vec(self) -> Vec<ConfigError> {
        self.0
    }
}

/// Centralized configuration validation.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate against the family defaults.
    pub fn validate(partial: &PartialConfig) -> Vec<ConfigError> {
        Self::validate_against(partial, &defaults::defaults_for(partial.kind()))
    }

    /// Validate a partial that will be merged onto `base`.
    pub fn validate_against(partial: &PartialConfig, base: &FullConfig) -> Vec<ConfigError> {
        let mut errors = ValidationErrors::default();
        match (partial, base) {
            (PartialConfig::Webapp(p), FullConfig::Webapp(b)) => webapp::validate(p, b, &mut errors),
            (PartialConfig::Forms(p), FullConfig::Forms(b)) => forms::validate(p, b, &mut errors),
            (PartialConfig::Rbac(p), FullConfig::Rbac(b)) => rbac::validate(p, b, &mut errors),
            _ => errors.push(
                "template",
                format!(
                    "{} overrides cannot be applied to a {} base",
                    partial.kind(),
                    base.kind()
                ),
            ),
        }
        errors.into_vec()
    }
}

// ── Shared checks ────────────────────────────────────────────────────────────

pub(crate) const PROJECT_NAME_RULE: &str =
    "may only contain lowercase letters a-z, digits 0-9 and hyphens";

/// `^[a-z0-9-]+$`
pub(crate) fn is_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

pub(crate) fn check_project_name(errors: &mut ValidationErrors, name: Option<&String>) {
    let Some(name) = name else {
        return;
    };
    if name.is_empty() {
        errors.push("project_name", "project name must not be empty");
    } else if !is_project_name(name) {
        errors.push(
            "project_name",
            format!("project name '{name}' {PROJECT_NAME_RULE}"),
        );
    }
}

pub(crate) fn unknown_message<T: ChoiceSet>(raw: &str) -> String {
    format!("unknown {} '{raw}'; expected one of: {}", T::LABEL, T::allowed())
}

pub(crate) fn check_choice<T: ChoiceSet>(
    errors: &mut ValidationErrors,
    path: &str,
    choice: Option<&Choice<T>>,
) {
    if let Some(Choice::Unknown(raw)) = choice {
        errors.push(path, unknown_message::<T>(raw));
    }
}

pub(crate) fn check_choices<T: ChoiceSet>(
    errors: &mut ValidationErrors,
    path: &str,
    values: Option<&Vec<Choice<T>>>,
) {
    for (i, value) in values.into_iter().flatten().enumerate() {
        check_choice(errors, &format!("{path}[{i}]"), Some(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{PartialFormsConfig, PartialWebAppConfig};

    fn webapp(p: PartialWebAppConfig) -> Vec<ConfigError> {
        ConfigValidator::validate(&PartialConfig::Webapp(p))
    }

    #[test]
    fn empty_partial_is_valid() {
        assert!(ConfigValidator::validate(&PartialConfig::default()).is_empty());
    }

    #[test]
    fn project_name_pattern() {
        assert!(is_project_name("my-app-2"));
        assert!(!is_project_name("My App!"));
        assert!(!is_project_name("my_app"));
        assert!(!is_project_name(""));
    }

    #[test]
    fn bad_project_name_names_allowed_characters() {
        let errors = webapp(PartialWebAppConfig {
            project_name: Some("My App!".into()),
            ..Default::default()
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "project_name");
        assert!(errors[0].message.contains("lowercase letters a-z"));
        assert!(errors[0].message.contains("hyphens"));
    }

    #[test]
    fn empty_project_name_is_one_error() {
        let errors = webapp(PartialWebAppConfig {
            project_name: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("must not be empty"));
    }

    #[test]
    fn family_mismatch_is_reported() {
        let errors = ConfigValidator::validate_against(
            &PartialConfig::Forms(PartialFormsConfig::default()),
            &defaults::webapp().into(),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "template");
    }

    #[test]
    fn display_joins_path_and_message() {
        let e = ConfigError {
            path: "roles[1]".into(),
            message: "duplicate role 'admin'".into(),
        };
        assert_eq!(e.to_string(), "roles[1]: duplicate role 'admin'");
    }
}
