use std::collections::{HashMap, HashSet};

use super::{ValidationErrors, check_choice, check_choices, check_project_name};
use crate::domain::config::{FormsConfig, PartialFieldSpec, PartialFormSpec, PartialFormsConfig};
use crate::domain::entities::render_context::to_pascal_case;
use crate::domain::value_objects::{Choice, FieldKind};

pub(super) fn validate(p: &PartialFormsConfig, _base: &FormsConfig, errors: &mut ValidationErrors) {
    check_project_name(errors, p.project_name.as_ref());
    check_choice(errors, "package_manager", p.package_manager.as_ref());
    check_choices(errors, "features", p.features.as_ref());

    if let Some(v) = &p.validation {
        check_choice(errors, "validation.mode", v.mode.as_ref());
    }

    let Some(forms) = &p.forms else {
        return;
    };

    // Keyed by the derived component name: `ContactForm`, `contactSchema`
    // and friends must stay distinct across forms.
    let mut seen: HashMap<String, &str> = HashMap::new();
    for (i, form) in forms.iter().enumerate() {
        let path = format!("forms[{i}]");
        validate_form(&path, form, errors);
        if !is_form_name(&form.name) || RESERVED_FORM_NAMES.contains(&form.name.as_str()) {
            continue;
        }
        let ident = to_pascal_case(&form.name);
        match seen.get(&ident) {
            Some(first) if *first == form.name => errors.push(
                format!("{path}.name"),
                format!("duplicate form name '{}'", form.name),
            ),
            Some(first) => errors.push(
                format!("{path}.name"),
                format!(
                    "form name '{}' clashes with '{first}' (both generate {ident}Form)",
                    form.name
                ),
            ),
            None => {
                seen.insert(ident, form.name.as_str());
            }
        }
    }
}

/// File stems the forms sections already use for their barrel modules.
const RESERVED_FORM_NAMES: &[&str] = &["index"];

/// `^[a-z][a-z0-9]*(-[a-z0-9]+)*$`: usable as a file name and convertible to
/// a component name.
fn is_form_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

/// `^[A-Za-z_][A-Za-z0-9_]*$`: a valid object key without quoting.
fn is_field_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn validate_form(path: &str, form: &PartialFormSpec, errors: &mut ValidationErrors) {
    if form.name.is_empty() {
        errors.push(format!("{path}.name"), "form name must not be empty");
    } else if !is_form_name(&form.name) {
        errors.push(
            format!("{path}.name"),
            format!(
                "form name '{}' must start with a lowercase letter and contain only lowercase letters and digits, with single hyphens between words",
                form.name
            ),
        );
    } else if RESERVED_FORM_NAMES.contains(&form.name.as_str()) {
        errors.push(
            format!("{path}.name"),
            format!("form name '{}' is reserved", form.name),
        );
    }

    if form.fields.is_empty() {
        errors.push(format!("{path}.fields"), "form must declare at least one field");
    }

    let names: HashSet<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
    let mut seen = HashSet::new();
    for (j, field) in form.fields.iter().enumerate() {
        let field_path = format!("{path}.fields[{j}]");
        if is_field_name(&field.name) && !seen.insert(field.name.as_str()) {
            errors.push(
                format!("{field_path}.name"),
                format!("duplicate field name '{}'", field.name),
            );
        }
        validate_field(&field_path, field, &names, errors);
    }

    validate_steps(path, form, &names, errors);
}

fn validate_field(
    path: &str,
    field: &PartialFieldSpec,
    siblings: &HashSet<&str>,
    errors: &mut ValidationErrors,
) {
    if field.name.is_empty() {
        errors.push(format!("{path}.name"), "field name must not be empty");
    } else if !is_field_name(&field.name) {
        errors.push(
            format!("{path}.name"),
            format!(
                "field name '{}' must be an identifier (letters, digits, underscores; not starting with a digit)",
                field.name
            ),
        );
    }

    check_choice(errors, &format!("{path}.kind"), field.kind.as_ref());

    if field.kind.as_ref().and_then(Choice::known) == Some(FieldKind::Select)
        && field.options.is_empty()
    {
        errors.push(
            format!("{path}.options"),
            "select fields need a non-empty options list",
        );
    }

    if let Some(dep) = &field.depends_on {
        if dep == &field.name {
            errors.push(format!("{path}.depends_on"), "a field cannot depend on itself");
        } else if !siblings.contains(dep.as_str()) {
            errors.push(
                format!("{path}.depends_on"),
                format!("depends on unknown field '{dep}'"),
            );
        }
    }
}

fn validate_steps(
    path: &str,
    form: &PartialFormSpec,
    fields: &HashSet<&str>,
    errors: &mut ValidationErrors,
) {
    if !form.multi_step {
        if !form.steps.is_empty() {
            errors.push(
                format!("{path}.steps"),
                "steps are only allowed on multi-step forms",
            );
        }
        return;
    }

    if form.steps.is_empty() {
        errors.push(
            format!("{path}.steps"),
            "a multi-step form must declare at least one step",
        );
        return;
    }

    let mut assigned = HashSet::new();
    for (k, step) in form.steps.iter().enumerate() {
        let step_path = format!("{path}.steps[{k}]");
        if step.name.trim().is_empty() {
            errors.push(format!("{step_path}.name"), "step name must not be empty");
        }
        if step.fields.is_empty() {
            errors.push(
                format!("{step_path}.fields"),
                "a step must list at least one field",
            );
        }
        for (n, name) in step.fields.iter().enumerate() {
            if fields.contains(name.as_str()) {
                assigned.insert(name.as_str());
            } else {
                errors.push(
                    format!("{step_path}.fields[{n}]"),
                    format!("step references undeclared field '{name}'"),
                );
            }
        }
    }

    for (j, field) in form.fields.iter().enumerate() {
        if !field.name.is_empty() && !assigned.contains(field.name.as_str()) {
            errors.push(
                format!("{path}.fields[{j}]"),
                format!("field '{}' is not assigned to any step", field.name),
            );
        }
    }
}
