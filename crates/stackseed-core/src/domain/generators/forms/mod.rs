//! Forms sections.
//!
//! Every form contributes one file to each per-form namespace, named after
//! the form (`contact` → `lib/forms/contact.ts`, `ContactForm.tsx`).
//!
//! | Section | Owns |
//! |---------|------|
//! | `project` | package.json, tsconfig.json, next-env.d.ts, README.md |
//! | `schemas` | `<src>lib/forms/**` |
//! | `components` | `<src>components/forms/**` |
//! | `types` | `<src>types/forms/**` |
//! | `actions` | `<src>app/actions/**` |
//! | `tests` | `tests/forms/**`, `vitest.config.ts` |

mod actions;
mod components;
mod project;
mod schemas;
mod test_suite;
mod types;

use std::collections::BTreeMap;

use super::Section;
use crate::domain::config::{FieldSpec, FormSpec, FormsConfig};
use crate::domain::defaults;
use crate::domain::entities::render_context::{to_camel_case, to_pascal_case, to_title_case};
use crate::domain::family::TemplateFamily;
use crate::domain::value_objects::{FormsFeature, TemplateKind};

pub static SECTIONS: &[Section<FormsConfig>] = &[
    Section::new("project", project::generate),
    Section::new("schemas", schemas::generate),
    Section::new("components", components::generate),
    Section::new("types", types::generate),
    Section::new("actions", actions::generate),
    Section::new("tests", test_suite::generate),
];

impl TemplateFamily for FormsConfig {
    const KIND: TemplateKind = TemplateKind::Forms;

    fn defaults() -> Self {
        defaults::forms()
    }

    fn sections() -> &'static [Section<Self>] {
        SECTIONS
    }

    fn package_scripts(&self) -> BTreeMap<String, String> {
        package_scripts(self)
    }

    fn instructions(&self) -> Vec<String> {
        instructions(self)
    }
}

/// Identifiers derived from a form's kebab-case name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormNames {
    /// File stem, e.g. `contact-us`.
    pub file: String,
    pub pascal: String,
    pub camel: String,
    pub title: String,
}

impl FormNames {
    pub(crate) fn of(form: &FormSpec) -> Self {
        Self {
            file: form.name.clone(),
            pascal: to_pascal_case(&form.name),
            camel: to_camel_case(&form.name),
            title: to_title_case(&form.name),
        }
    }

    pub(crate) fn component(&self) -> String {
        format!("{}Form", self.pascal)
    }

    pub(crate) fn schema(&self) -> String {
        format!("{}Schema", self.camel)
    }

    pub(crate) fn steps(&self) -> String {
        format!("{}Steps", self.camel)
    }

    pub(crate) fn values_type(&self) -> String {
        format!("{}FormValues", self.pascal)
    }

    pub(crate) fn action(&self) -> String {
        format!("submit{}", self.pascal)
    }
}

/// Display label: the explicit one, else the title-cased field name.
pub(crate) fn label_of(field: &FieldSpec) -> String {
    field
        .label
        .clone()
        .unwrap_or_else(|| to_title_case(&field.name))
}

pub fn package_scripts(cfg: &FormsConfig) -> BTreeMap<String, String> {
    let mut scripts = BTreeMap::new();
    for (name, command) in [
        ("dev", "next dev"),
        ("build", "next build"),
        ("start", "next start"),
        ("lint", "next lint"),
        ("typecheck", "tsc --noEmit"),
    ] {
        scripts.insert(name.to_string(), command.to_string());
    }
    if cfg.has(FormsFeature::Tests) {
        scripts.insert("test".to_string(), "vitest run".to_string());
    }
    scripts
}

pub fn instructions(cfg: &FormsConfig) -> Vec<String> {
    let pm = cfg.package_manager;
    let mut steps = vec![
        format!("cd {}", cfg.project_name),
        format!("Install dependencies: {}", pm.install_command()),
    ];
    if !cfg.forms.is_empty() {
        let components: Vec<String> = cfg
            .forms
            .iter()
            .map(|form| format!("<{} />", FormNames::of(form).component()))
            .collect();
        steps.push(format!(
            "Render {} from @/components/forms in a page",
            components.join(", ")
        ));
    }
    steps.push(format!("Start the dev server: {}", pm.run("dev")));
    if cfg.has(FormsFeature::Tests) {
        steps.push(format!("Run the schema tests: {}", pm.run("test")));
    }
    steps
}
