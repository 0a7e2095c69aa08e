//! Forms family: typed form schemas, React form components and server actions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::value_objects::{
    Choice, FieldKind, FormsFeature, PackageManager, ValidationMode,
};

// ── Full configuration ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    pub project_name: String,
    pub package_manager: PackageManager,
    pub use_src_directory: bool,
    pub features: BTreeSet<FormsFeature>,
    pub validation: FormValidationConfig,
    pub forms: Vec<FormSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidationConfig {
    pub mode: ValidationMode,
    pub strict: bool,
    pub custom_messages: bool,
}

/// One generated form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    /// kebab-case; drives file names and component names.
    pub name: String,
    pub fields: Vec<FieldSpec>,
    pub multi_step: bool,
    pub steps: Vec<StepSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// camelCase identifier used as the schema key.
    pub name: String,
    pub label: Option<String>,
    pub kind: FieldKind,
    pub required: bool,
    pub options: Vec<String>,
    /// Sibling field that must be truthy for this one to be shown and checked.
    pub depends_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl FormsConfig {
    pub fn has(&self, feature: FormsFeature) -> bool {
        self.features.contains(&feature)
    }

    pub fn src(&self) -> &'static str {
        if self.use_src_directory { "src/" } else { "" }
    }
}

impl FormSpec {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl FieldSpec {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            kind,
            required: true,
            options: Vec::new(),
            depends_on: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(ToString::to_string).collect();
        self
    }

    pub fn depends_on(mut self, field: &str) -> Self {
        self.depends_on = Some(field.to_string());
        self
    }
}

// ── Partial configuration ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialFormsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<Choice<PackageManager>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_src_directory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<Choice<FormsFeature>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<PartialFormValidationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forms: Option<Vec<PartialFormSpec>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialFormValidationConfig {
    pub mode: Option<Choice<ValidationMode>>,
    pub strict: Option<bool>,
    pub custom_messages: Option<bool>,
}

/// Form entries are replaced wholesale on merge, so missing members take
/// fixed fallbacks rather than defaults from a base config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialFormSpec {
    pub name: String,
    pub fields: Vec<PartialFieldSpec>,
    pub multi_step: bool,
    pub steps: Vec<StepSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialFieldSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Defaults to `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Choice<FieldKind>>,
    /// Defaults to `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
}

impl PartialFieldSpec {
    pub fn new(name: &str, kind: impl Into<Choice<FieldKind>>) -> Self {
        Self {
            name: name.to_string(),
            kind: Some(kind.into()),
            ..Self::default()
        }
    }
}

impl From<&FieldSpec> for PartialFieldSpec {
    fn from(field: &FieldSpec) -> Self {
        Self {
            name: field.name.clone(),
            label: field.label.clone(),
            kind: Some(field.kind.into()),
            required: Some(field.required),
            options: field.options.clone(),
            depends_on: field.depends_on.clone(),
        }
    }
}

impl From<&FormSpec> for PartialFormSpec {
    fn from(form: &FormSpec) -> Self {
        Self {
            name: form.name.clone(),
            fields: form.fields.iter().map(PartialFieldSpec::from).collect(),
            multi_step: form.multi_step,
            steps: form.steps.clone(),
        }
    }
}

impl From<&FormsConfig> for PartialFormsConfig {
    fn from(full: &FormsConfig) -> Self {
        Self {
            project_name: Some(full.project_name.clone()),
            package_manager: Some(full.package_manager.into()),
            use_src_directory: Some(full.use_src_directory),
            features: Some(full.features.iter().map(|&f| f.into()).collect()),
            validation: Some(PartialFormValidationConfig {
                mode: Some(full.validation.mode.into()),
                strict: Some(full.validation.strict),
                custom_messages: Some(full.validation.custom_messages),
            }),
            forms: Some(full.forms.iter().map(PartialFormSpec::from).collect()),
        }
    }
}
