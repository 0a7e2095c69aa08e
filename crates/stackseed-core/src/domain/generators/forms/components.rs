//! React form components.
//!
//! With `client-validation` a component binds its inputs through
//! `react-hook-form` and the form's zod schema; without it the component
//! posts plain `FormData` and validates once on submit. Multi-step forms keep
//! every step mounted and hide the inactive ones so all values submit
//! together.

use std::collections::BTreeSet;

use super::{FormNames, label_of};
use crate::domain::config::{FieldSpec, FormSpec, FormsConfig};
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, indent, js_string, when};
use crate::domain::value_objects::{FieldKind, FormsFeature};

pub(super) fn generate(cfg: &FormsConfig) -> Vec<FileRecord> {
    let dir = format!("{}components/forms", cfg.src());

    let mut files = Vec::with_capacity(cfg.forms.len() + 1);
    let mut exports = Vec::with_capacity(cfg.forms.len());
    for form in &cfg.forms {
        let component = FormNames::of(form).component();
        files.push(FileRecord::new(
            format!("{dir}/{component}.tsx"),
            render(cfg, form),
        ));
        exports.push(format!("export {{ {component} }} from \"./{component}\";"));
    }
    files.push(FileRecord::new(
        format!("{dir}/index.ts"),
        format!("{}\n", exports.join("\n")),
    ));
    files
}

/// Text as a JSX child; anything with markup characters goes through a
/// string expression.
fn jsx_text(text: &str) -> String {
    if text.contains(['{', '}', '<', '>']) {
        format!("{{{}}}", js_string(text))
    } else {
        text.to_string()
    }
}

/// Variable holding the watched value of a dependency field.
fn watched(dep: &str) -> String {
    format!("{dep}Value")
}

struct Options {
    client: bool,
    actions: bool,
    multi_step: bool,
}

impl Options {
    fn of(cfg: &FormsConfig, form: &FormSpec) -> Self {
        Self {
            client: cfg.has(FormsFeature::ClientValidation),
            actions: cfg.has(FormsFeature::ServerActions),
            multi_step: form.multi_step && !form.steps.is_empty(),
        }
    }
}

fn control(form: &FormSpec, field: &FieldSpec, client: bool) -> String {
    let id = format!("{}-{}", form.name, field.name);
    let bind = if client {
        format!("{{...register({})}}", js_string(&field.name))
    } else {
        format!("name={}", js_string(&field.name))
    };
    // Native `required` only without client validation; conditional fields
    // are checked by the schema.
    let required = when(
        !client && field.required && field.depends_on.is_none(),
        " required",
    );

    match field.kind {
        FieldKind::Textarea => format!("<textarea id=\"{id}\" {bind}{required} />"),
        FieldKind::Select => {
            let options: Vec<String> = field
                .options
                .iter()
                .map(|o| {
                    let value = js_string(o);
                    format!("<option value={{{value}}}>{{{value}}}</option>")
                })
                .collect();
            format!(
                "<select id=\"{id}\" {bind}{required}>\n  <option value=\"\">Select an option</option>\n{}\n</select>",
                indent(&options.join("\n"), 2)
            )
        }
        FieldKind::Checkbox => format!("<input id=\"{id}\" type=\"checkbox\" {bind}{required} />"),
        kind => format!(
            "<input id=\"{id}\" type=\"{}\" {bind}{required} />",
            kind.input_type()
        ),
    }
}

fn field_block(form: &FormSpec, field: &FieldSpec, client: bool) -> String {
    let id = format!("{}-{}", form.name, field.name);
    let mut lines = vec![
        format!("<label htmlFor=\"{id}\">{}</label>", jsx_text(&label_of(field))),
        control(form, field, client),
    ];
    if client {
        lines.push(format!(
            "{{errors.{name} && <p role=\"alert\">{{errors.{name}.message}}</p>}}",
            name = field.name
        ));
    }
    let block = format!("<div>\n{}\n</div>", indent(&lines.join("\n"), 2));

    match (&field.depends_on, client) {
        (Some(dep), true) => format!("{{{} && (\n{}\n)}}", watched(dep), indent(&block, 2)),
        _ => block,
    }
}

fn fields_markup(form: &FormSpec, opts: &Options) -> String {
    if !opts.multi_step {
        return form
            .fields
            .iter()
            .map(|f| field_block(form, f, opts.client))
            .collect::<Vec<_>>()
            .join("\n");
    }

    form.steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let mut inner = vec![format!("<legend>{}</legend>", jsx_text(&step.name))];
            inner.extend(
                step.fields
                    .iter()
                    .filter_map(|name| form.field(name))
                    .map(|f| field_block(form, f, opts.client)),
            );
            format!(
                "<fieldset hidden={{step !== {i}}}>\n{}\n</fieldset>",
                indent(&inner.join("\n"), 2)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn imports(names: &FormNames, opts: &Options) -> String {
    let mut lines = Vec::new();
    if opts.actions || opts.multi_step {
        lines.push("import { useState } from \"react\";".to_string());
    }
    if opts.client {
        lines.push("import { useForm } from \"react-hook-form\";".to_string());
        lines.push("import { zodResolver } from \"@hookform/resolvers/zod\";".to_string());
    }
    let mut schema_imports = vec![names.schema()];
    if opts.multi_step {
        schema_imports.push(names.steps());
    }
    lines.push(format!(
        "import {{ {} }} from \"@/lib/forms/{}\";",
        schema_imports.join(", "),
        names.file
    ));
    lines.push(format!(
        "import type {{ {} }} from \"@/types/forms/{}\";",
        names.values_type(),
        names.file
    ));
    if opts.actions {
        lines.push("import type { FormState } from \"@/types/forms\";".to_string());
        lines.push(format!(
            "import {{ {} }} from \"@/app/actions/{}\";",
            names.action(),
            names.file
        ));
    }
    lines.join("\n")
}

fn hooks(cfg: &FormsConfig, form: &FormSpec, names: &FormNames, opts: &Options) -> String {
    let deps: BTreeSet<&str> = form
        .fields
        .iter()
        .filter_map(|f| f.depends_on.as_deref())
        .collect();

    let mut parts = Vec::new();
    if opts.client {
        let mut bindings = vec!["register", "handleSubmit"];
        if !deps.is_empty() {
            bindings.push("watch");
        }
        if opts.multi_step {
            bindings.push("trigger");
        }
        bindings.push("formState: { errors, isSubmitting }");
        parts.push(format!(
            "const {{\n{}\n}} = useForm<{}>({{\n  resolver: zodResolver({}),\n  mode: \"{}\",\n}});",
            indent(&bindings.iter().map(|b| format!("{b},")).collect::<Vec<_>>().join("\n"), 2),
            names.values_type(),
            names.schema(),
            cfg.validation.mode.hook_form_mode(),
        ));
        if !deps.is_empty() {
            parts.push(
                deps.iter()
                    .map(|dep| format!("const {} = watch({});", watched(dep), js_string(dep)))
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }
    }
    if opts.actions {
        parts.push("const [state, setState] = useState<FormState>({ status: \"idle\" });".to_string());
    }
    if opts.multi_step {
        parts.push(format!(
            "const [step, setStep] = useState(0);\nconst last = {}.length - 1;",
            names.steps()
        ));
    }
    blocks(parts)
}

fn handlers(names: &FormNames, opts: &Options) -> String {
    let submit_action = when(
        opts.actions,
        format!("setState(await {}(values));\n", names.action()),
    );

    let submit = if opts.client {
        format!(
            "const submit = handleSubmit(async (values) => {{\n{}\n}});",
            indent(&format!("{submit_action}await onSubmit?.(values);"), 2)
        )
    } else {
        format!(
            "async function submit(formData: FormData) {{\n{}\n}}",
            indent(
                &format!(
                    "const values = Object.fromEntries(formData);\n{submit_action}const parsed = {}.safeParse(values);\nif (parsed.success) {{\n  await onSubmit?.(parsed.data);\n}}",
                    names.schema()
                ),
                2
            )
        )
    };

    let next = when(
        opts.multi_step,
        if opts.client {
            format!(
                "async function next() {{\n  if (await trigger([...{}[step].fields])) {{\n    setStep((current) => Math.min(current + 1, last));\n  }}\n}}",
                names.steps()
            )
        } else {
            "function next() {\n  setStep((current) => Math.min(current + 1, last));\n}".to_string()
        },
    );

    blocks([submit, next])
}

fn buttons(opts: &Options) -> String {
    let disabled = when(opts.client, " disabled={isSubmitting}");
    if !opts.multi_step {
        return format!("<button type=\"submit\"{disabled}>Submit</button>");
    }
    format!(
        r#"<div>
  {{step > 0 && (
    <button type="button" onClick={{() => setStep((current) => current - 1)}}>
      Back
    </button>
  )}}
  {{step < last ? (
    <button type="button" onClick={{next}}>
      Next
    </button>
  ) : (
    <button type="submit"{disabled}>Submit</button>
  )}}
</div>"#
    )
}

fn render(cfg: &FormsConfig, form: &FormSpec) -> String {
    let names = FormNames::of(form);
    let opts = Options::of(cfg, form);
    let component = names.component();

    let props = format!(
        "type {component}Props = {{\n  onSubmit?: (values: {}) => void | Promise<void>;\n}};",
        names.values_type()
    );

    let mut body = vec![fields_markup(form, &opts)];
    if opts.actions {
        body.push(
            "{state.status === \"success\" && <p role=\"status\">Thanks, your submission was received.</p>}\n{state.status === \"error\" && <p role=\"alert\">Please correct the highlighted fields.</p>}"
                .to_string(),
        );
    }
    body.push(buttons(&opts));

    let open = if opts.client {
        "<form onSubmit={submit} noValidate>"
    } else {
        "<form action={submit}>"
    };
    let jsx = format!(
        "return (\n  {open}\n{}\n  </form>\n);",
        indent(&body.join("\n"), 4)
    );

    let function = format!(
        "export function {component}({{ onSubmit }}: {component}Props) {{\n{}\n}}",
        indent(
            blocks([hooks(cfg, form, &names, &opts), handlers(&names, &opts), jsx]).trim_end(),
            2
        )
    );

    blocks([
        "\"use client\";".to_string(),
        imports(&names, &opts),
        props,
        function,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::StepSpec;
    use crate::domain::defaults;

    fn component(cfg: &FormsConfig) -> String {
        generate(cfg).remove(0).content
    }

    #[test]
    fn default_contact_component() {
        let files = generate(&defaults::forms());
        assert_eq!(files[0].path.as_str(), "src/components/forms/ContactForm.tsx");
        assert_eq!(
            files[1].content,
            "export { ContactForm } from \"./ContactForm\";\n"
        );

        let tsx = &files[0].content;
        assert!(tsx.starts_with("\"use client\";\n"));
        assert!(tsx.contains("resolver: zodResolver(contactSchema),"));
        assert!(tsx.contains("mode: \"onBlur\","));
        assert!(tsx.contains("<input id=\"contact-email\" type=\"email\" {...register(\"email\")} />"));
        assert!(tsx.contains("<textarea id=\"contact-message\" {...register(\"message\")} />"));
        assert!(tsx.contains("setState(await submitContact(values));"));
        assert!(tsx.contains("<form onSubmit={submit} noValidate>"));
    }

    #[test]
    fn plain_form_uses_native_required() {
        let mut cfg = defaults::forms();
        cfg.features.clear();
        let tsx = component(&cfg);
        assert!(!tsx.contains("react-hook-form"));
        assert!(!tsx.contains("useState"));
        assert!(tsx.contains("<input id=\"contact-name\" type=\"text\" name=\"name\" required />"));
        assert!(tsx.contains("<form action={submit}>"));
        assert!(tsx.contains("const parsed = contactSchema.safeParse(values);"));
    }

    #[test]
    fn dependent_field_is_watched() {
        let mut cfg = defaults::forms();
        cfg.forms[0].fields = vec![
            FieldSpec::new("subscribe", FieldKind::Checkbox).optional(),
            FieldSpec::new("frequency", FieldKind::Select)
                .with_options(&["daily", "weekly"])
                .depends_on("subscribe"),
        ];
        let tsx = component(&cfg);
        assert!(tsx.contains("const subscribeValue = watch(\"subscribe\");"));
        assert!(tsx.contains("{subscribeValue && ("));
        assert!(tsx.contains("<option value={\"daily\"}>{\"daily\"}</option>"));
    }

    #[test]
    fn multi_step_renders_fieldsets() {
        let mut cfg = defaults::forms();
        cfg.forms[0].multi_step = true;
        cfg.forms[0].steps = vec![
            StepSpec {
                name: "About you".into(),
                fields: vec!["name".into(), "email".into()],
            },
            StepSpec {
                name: "Message".into(),
                fields: vec!["message".into()],
            },
        ];
        let tsx = component(&cfg);
        assert!(tsx.contains("import { contactSchema, contactSteps } from \"@/lib/forms/contact\";"));
        assert!(tsx.contains("<fieldset hidden={step !== 0}>"));
        assert!(tsx.contains("<fieldset hidden={step !== 1}>"));
        assert!(tsx.contains("<legend>About you</legend>"));
        assert!(tsx.contains("if (await trigger([...contactSteps[step].fields])) {"));
        assert!(tsx.contains("Next"));
    }

    #[test]
    fn markup_in_labels_is_escaped() {
        assert_eq!(jsx_text("Name"), "Name");
        assert_eq!(jsx_text("a <b>"), "{\"a <b>\"}");
    }
}
