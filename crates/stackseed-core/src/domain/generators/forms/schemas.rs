//! One zod schema module per form, plus a barrel `index.ts`.

use super::{FormNames, label_of};
use crate::domain::config::{FieldSpec, FormSpec, FormsConfig};
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{
    blocks, indent, js_string, js_string_array, when, zod_check,
};
use crate::domain::value_objects::FieldKind;

pub(super) fn generate(cfg: &FormsConfig) -> Vec<FileRecord> {
    let dir = format!("{}lib/forms", cfg.src());
    let mut files: Vec<FileRecord> = cfg
        .forms
        .iter()
        .map(|form| {
            FileRecord::new(
                format!("{dir}/{}.ts", form.name),
                schema_module(cfg, form),
            )
        })
        .collect();

    let exports: Vec<String> = cfg
        .forms
        .iter()
        .map(|form| format!("export * from \"./{}\";", form.name))
        .collect();
    files.push(FileRecord::new(
        format!("{dir}/index.ts"),
        format!("{}\n", exports.join("\n")),
    ));
    files
}

/// `, { errorMap: ... }` for zod constructors that take no check arguments.
fn error_map(cfg: &FormsConfig, message: &str) -> String {
    when(
        cfg.validation.custom_messages,
        format!(", {{ errorMap: () => ({{ message: {} }}) }}", js_string(message)),
    )
}

/// The zod expression for one field.
///
/// Conditional fields are always optional in the object shape; their
/// requiredness is enforced by the refinement emitted in [`refinement`].
pub(crate) fn field_schema(cfg: &FormsConfig, field: &FieldSpec) -> String {
    let custom = cfg.validation.custom_messages;
    let label = label_of(field);
    let required = field.required && field.depends_on.is_none();
    let filled = format!("{label} is required");

    let base = match field.kind {
        FieldKind::Text | FieldKind::Textarea => format!(
            "z.string().trim(){}",
            when(required, zod_check(custom, "min", "1", &filled))
        ),
        FieldKind::Email => format!(
            "z.string().trim(){}",
            zod_check(custom, "email", "", "Enter a valid email address")
        ),
        FieldKind::Password => format!(
            "z.string(){}",
            zod_check(
                custom,
                "min",
                "8",
                &format!("{label} must be at least 8 characters")
            )
        ),
        FieldKind::Number => format!(
            "z.coerce.number(){}",
            zod_check(custom, "finite", "", &format!("{label} must be a number"))
        ),
        FieldKind::Select => format!(
            "z.enum({}{})",
            js_string_array(&field.options),
            error_map(cfg, &format!("Choose a valid {}", label.to_lowercase()))
        ),
        FieldKind::Checkbox if required => {
            format!("z.literal(true{})", error_map(cfg, &filled))
        }
        FieldKind::Checkbox => "z.boolean()".to_string(),
        FieldKind::Date => format!(
            "z.coerce.date({})",
            when(
                custom,
                format!("{{ message: {} }}", js_string(&format!("{label} must be a date")))
            )
        ),
    };

    if required {
        return base;
    }
    match field.kind {
        // An untouched text input submits "", which must count as absent.
        FieldKind::Email | FieldKind::Password => format!("{base}.optional().or(z.literal(\"\"))"),
        _ => format!("{base}.optional()"),
    }
}

/// Checks that conditional required fields are present when their
/// dependency is set.
fn refinement(form: &FormSpec) -> Option<String> {
    let checks: Vec<String> = form
        .fields
        .iter()
        .filter(|f| f.required)
        .filter_map(|f| {
            let dep = f.depends_on.as_deref()?;
            Some(format!(
                "if (data.{dep} && !data.{name}) {{\n  ctx.addIssue({{\n    code: z.ZodIssueCode.custom,\n    path: [{path}],\n    message: {message},\n  }});\n}}",
                name = f.name,
                path = js_string(&f.name),
                message = js_string(&format!("{} is required", label_of(f))),
            ))
        })
        .collect();

    (!checks.is_empty()).then(|| {
        format!(
            ".superRefine((data, ctx) => {{\n{}\n}})",
            indent(&checks.join("\n"), 2)
        )
    })
}

fn schema_module(cfg: &FormsConfig, form: &FormSpec) -> String {
    let names = FormNames::of(form);
    let shape: Vec<String> = form
        .fields
        .iter()
        .map(|f| format!("{}: {},", f.name, field_schema(cfg, f)))
        .collect();

    let mut chain = vec![format!(".object({{\n{}\n}})", indent(&shape.join("\n"), 2))];
    if cfg.validation.strict {
        chain.push(".strict()".to_string());
    }
    if let Some(refine) = refinement(form) {
        chain.push(refine);
    }
    let schema = format!(
        "export const {} = z\n{};",
        names.schema(),
        indent(&chain.join("\n"), 2)
    );

    let steps = when(form.multi_step, {
        let entries: Vec<String> = form
            .steps
            .iter()
            .map(|step| {
                format!(
                    "{{ name: {}, fields: {} }},",
                    js_string(&step.name),
                    js_string_array(&step.fields)
                )
            })
            .collect();
        format!(
            "export const {} = [\n{}\n] as const;",
            names.steps(),
            indent(&entries.join("\n"), 2)
        )
    });

    blocks([
        "import { z } from \"zod\";".to_string(),
        schema,
        steps,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::StepSpec;
    use crate::domain::defaults;

    fn module(cfg: &FormsConfig) -> String {
        generate(cfg).remove(0).content
    }

    #[test]
    fn default_contact_schema() {
        let files = generate(&defaults::forms());
        assert_eq!(files[0].path.as_str(), "src/lib/forms/contact.ts");
        assert_eq!(files[1].path.as_str(), "src/lib/forms/index.ts");
        assert_eq!(files[1].content, "export * from \"./contact\";\n");

        let schema = &files[0].content;
        assert!(schema.contains("export const contactSchema = z\n  .object({"));
        assert!(schema.contains("name: z.string().trim().min(1, { message: \"Name is required\" }),"));
        assert!(schema.contains("  .strict();"));
    }

    #[test]
    fn plain_messages_without_custom_messages() {
        let mut cfg = defaults::forms();
        cfg.validation.custom_messages = false;
        cfg.validation.strict = false;
        let schema = module(&cfg);
        assert!(schema.contains("name: z.string().trim().min(1),"));
        assert!(schema.contains("email: z.string().trim().email(),"));
        assert!(!schema.contains(".strict()"));
    }

    #[test]
    fn select_and_checkbox_kinds() {
        let mut cfg = defaults::forms();
        cfg.validation.custom_messages = false;
        cfg.forms[0].fields = vec![
            FieldSpec::new("plan", FieldKind::Select).with_options(&["free", "pro"]),
            FieldSpec::new("terms", FieldKind::Checkbox),
            FieldSpec::new("newsletter", FieldKind::Checkbox).optional(),
        ];
        let schema = module(&cfg);
        assert!(schema.contains("plan: z.enum([\"free\", \"pro\"]),"));
        assert!(schema.contains("terms: z.literal(true),"));
        assert!(schema.contains("newsletter: z.boolean().optional(),"));
    }

    #[test]
    fn conditional_field_gets_refinement() {
        let mut cfg = defaults::forms();
        cfg.forms[0].fields = vec![
            FieldSpec::new("subscribe", FieldKind::Checkbox).optional(),
            FieldSpec::new("frequency", FieldKind::Select)
                .with_options(&["daily", "weekly"])
                .depends_on("subscribe"),
        ];
        let schema = module(&cfg);
        assert!(schema.contains("frequency: z.enum("));
        assert!(schema.contains(".optional(),"));
        assert!(schema.contains(".superRefine((data, ctx) => {"));
        assert!(schema.contains("if (data.subscribe && !data.frequency) {"));
    }

    #[test]
    fn multi_step_exports_steps() {
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
        let schema = module(&cfg);
        assert!(schema.contains("export const contactSteps = [\n  { name: \"About you\", fields: [\"name\", \"email\"] },"));
        assert!(schema.contains("] as const;"));
    }
}
