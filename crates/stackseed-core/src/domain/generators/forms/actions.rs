use super::FormNames;
use crate::domain::config::{FormSpec, FormsConfig};
use crate::domain::entities::FileRecord;
use crate::domain::value_objects::FormsFeature;

pub(super) fn generate(cfg: &FormsConfig) -> Vec<FileRecord> {
    if !cfg.has(FormsFeature::ServerActions) {
        return Vec::new();
    }
    cfg.forms
        .iter()
        .map(|form| {
            FileRecord::new(
                format!("{}app/actions/{}.ts", cfg.src(), form.name),
                action(form),
            )
        })
        .collect()
}

fn action(form: &FormSpec) -> String {
    let names = FormNames::of(form);
    format!(
        r#""use server";

import {{ {schema} }} from "@/lib/forms/{file}";
import type {{ FormState }} from "@/types/forms";

export async function {action}(values: unknown): Promise<FormState> {{
  const parsed = {schema}.safeParse(values);
  if (!parsed.success) {{
    return {{ status: "error", errors: parsed.error.flatten().fieldErrors }};
  }}

  // Persist or forward parsed.data here.
  return {{ status: "success" }};
}}
"#,
        schema = names.schema(),
        file = names.file,
        action = names.action(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    #[test]
    fn one_action_per_form() {
        let files = generate(&defaults::forms());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path.as_str(), "src/app/actions/contact.ts");
        assert!(files[0].content.starts_with("\"use server\";\n"));
        assert!(
            files[0]
                .content
                .contains("export async function submitContact(values: unknown): Promise<FormState> {")
        );
    }

    #[test]
    fn absent_without_feature() {
        let mut cfg = defaults::forms();
        cfg.features.remove(&FormsFeature::ServerActions);
        assert!(generate(&cfg).is_empty());
    }
}
