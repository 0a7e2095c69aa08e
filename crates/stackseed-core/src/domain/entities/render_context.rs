//! Placeholder substitution for static file bodies.
//!
//! Section generators keep their fixed text as `&'static str` blocks with
//! `{{VARIABLE}}` placeholders and render them through a [`RenderContext`].
//! Conditional pieces are assembled with plain `format!` around the rendered
//! blocks.

use std::collections::BTreeMap;

/// Variable substitution context for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    /// Create a context with the project name and its casing variants.
    ///
    /// | Variable | `my-shop` |
    /// |----------|-----------|
    /// | `PROJECT_NAME` | `my-shop` |
    /// | `PROJECT_NAME_SNAKE` | `my_shop` |
    /// | `PROJECT_NAME_PASCAL` | `MyShop` |
    /// | `PROJECT_NAME_TITLE` | `My Shop` |
    pub fn new(project_name: &str) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("PROJECT_NAME".to_string(), project_name.to_string());
        variables.insert("PROJECT_NAME_SNAKE".to_string(), to_snake_case(project_name));
        variables.insert("PROJECT_NAME_PASCAL".to_string(), to_pascal_case(project_name));
        variables.insert("PROJECT_NAME_TITLE".to_string(), to_title_case(project_name));
        Self { variables }
    }

    /// Add a custom variable, consuming self and returning a new context.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` placeholder.
    ///
    /// Unknown placeholders are left as-is. Variables are applied in key
    /// order so output is stable even when a value contains a placeholder.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// Convert to snake_case: `"contactUs"` → `"contact_us"`.
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert to kebab-case: `"ContactUs"` → `"contact-us"`.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert to PascalCase: `"contact-us"` → `"ContactUs"`.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert to camelCase: `"contact-us"` → `"contactUs"`.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert to space-separated Title Case: `"firstName"` → `"First Name"`.
pub fn to_title_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words.
///
/// Boundaries are explicit separators (`_`, `-`, whitespace), a
/// lower→upper transition (`myApp`), and the end of an acronym
/// (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if (c.is_lowercase() || c.is_ascii_digit()) && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase)
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
