use super::FormNames;
use crate::domain::config::{FormSpec, FormsConfig};
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::blocks;

pub(super) fn generate(cfg: &FormsConfig) -> Vec<FileRecord> {
    let dir = format!("{}types/forms", cfg.src());

    let mut files: Vec<FileRecord> = cfg
        .forms
        .iter()
        .map(|form| FileRecord::new(format!("{dir}/{}.ts", form.name), form_types(form)))
        .collect();

    let mut index = vec![FORM_STATE.to_string()];
    index.extend(
        cfg.forms
            .iter()
            .map(|form| format!("export type * from \"./{}\";", form.name)),
    );
    files.push(FileRecord::new(
        format!("{dir}/index.ts"),
        blocks(&index),
    ));
    files
}

const FORM_STATE: &str = r#"/** Result of a form submission, as returned by its server action. */
export type FormState =
  | { status: "idle" }
  | { status: "success" }
  | { status: "error"; errors: Record<string, string[] | undefined> };"#;

fn form_types(form: &FormSpec) -> String {
    let names = FormNames::of(form);
    let values = names.values_type();
    blocks([
        format!(
            "import type {{ z }} from \"zod\";\nimport type {{ {schema} }} from \"@/lib/forms/{file}\";",
            schema = names.schema(),
            file = names.file,
        ),
        format!(
            "export type {values} = z.infer<typeof {}>;\n\nexport type {}FieldName = keyof {values};",
            names.schema(),
            names.pascal,
        ),
    ])
}
