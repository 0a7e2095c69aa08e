//! Vitest suites exercising each form schema.

use serde_json::{Map, Value};

use super::FormNames;
use crate::domain::config::{FieldSpec, FormSpec, FormsConfig};
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::{blocks, when};
use crate::domain::value_objects::{FieldKind, FormsFeature};

pub(super) fn generate(cfg: &FormsConfig) -> Vec<FileRecord> {
    if !cfg.has(FormsFeature::Tests) {
        return Vec::new();
    }
    let mut files = vec![FileRecord::new("vitest.config.ts", vitest_config(cfg))];
    files.extend(cfg.forms.iter().map(|form| {
        FileRecord::new(format!("tests/forms/{}.test.ts", form.name), suite(form))
    }));
    files
}

fn vitest_config(cfg: &FormsConfig) -> String {
    format!(
        r#"import {{ defineConfig }} from "vitest/config";
import {{ fileURLToPath }} from "node:url";

export default defineConfig({{
  resolve: {{
    alias: {{
      "@": fileURLToPath(new URL("./{}", import.meta.url)),
    }},
  }},
  test: {{
    environment: "node",
  }},
}});
"#,
        cfg.src()
    )
}

/// A value the field's schema accepts.
fn sample(field: &FieldSpec) -> Value {
    match field.kind {
        FieldKind::Text => Value::from("Ada Lovelace"),
        FieldKind::Email => Value::from("ada@example.com"),
        FieldKind::Number => Value::from(42),
        FieldKind::Password => Value::from("correct-horse-battery"),
        FieldKind::Textarea => Value::from("Hello from the test suite."),
        FieldKind::Select => field
            .options
            .first()
            .map_or(Value::Null, |o| Value::from(o.as_str())),
        FieldKind::Checkbox => Value::Bool(true),
        FieldKind::Date => Value::from("2024-01-01"),
    }
}

fn suite(form: &FormSpec) -> String {
    let names = FormNames::of(form);
    let schema = names.schema();

    // Every field filled, so every dependency is satisfied.
    let valid: Map<String, Value> = form
        .fields
        .iter()
        .map(|f| (f.name.clone(), sample(f)))
        .collect();
    let valid = Value::Object(valid);

    let has_required = form.fields.iter().any(|f| f.required);
    let rejects_empty = when(
        has_required,
        format!(
            "\n\n  it(\"rejects an empty submission\", () => {{\n    expect({schema}.safeParse({{}}).success).toBe(false);\n  }});"
        ),
    );

    let email = form.fields.iter().find(|f| f.kind == FieldKind::Email);
    let rejects_email = email.map_or_else(String::new, |f| {
        format!(
            "\n\n  it(\"rejects a malformed {name}\", () => {{\n    expect({schema}.safeParse({{ ...valid, {name}: \"not-an-email\" }}).success).toBe(false);\n  }});",
            name = f.name
        )
    });

    blocks([
        format!(
            "import {{ describe, expect, it }} from \"vitest\";\nimport {{ {schema} }} from \"@/lib/forms/{}\";",
            names.file
        ),
        format!("const valid = {valid:#};"),
        format!(
            "describe(\"{schema}\", () => {{\n  it(\"accepts a complete submission\", () => {{\n    expect({schema}.safeParse(valid).success).toBe(true);\n  }});{rejects_empty}{rejects_email}\n}});"
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    fn with_tests() -> FormsConfig {
        let mut cfg = defaults::forms();
        cfg.features.insert(FormsFeature::Tests);
        cfg
    }

    #[test]
    fn absent_without_feature() {
        assert!(generate(&defaults::forms()).is_empty());
    }

    #[test]
    fn suite_per_form_with_config() {
        let files = generate(&with_tests());
        assert_eq!(files[0].path.as_str(), "vitest.config.ts");
        assert!(files[0].content.contains("new URL(\"./src/\", import.meta.url)"));
        assert_eq!(files[1].path.as_str(), "tests/forms/contact.test.ts");
    }

    #[test]
    fn suite_covers_valid_empty_and_email_cases() {
        let suite = &generate(&with_tests())[1].content;
        assert!(suite.contains("import { contactSchema } from \"@/lib/forms/contact\";"));
        assert!(suite.contains("\"email\": \"ada@example.com\""));
        assert!(suite.contains("accepts a complete submission"));
        assert!(suite.contains("rejects an empty submission"));
        assert!(suite.contains("{ ...valid, email: \"not-an-email\" }"));
    }

    #[test]
    fn sample_object_is_json() {
        let suite = &generate(&with_tests())[1].content;
        let start = suite.find("const valid = ").unwrap() + "const valid = ".len();
        let end = suite[start..].find("};").unwrap() + start + 1;
        let parsed: Value = serde_json::from_str(&suite[start..end]).unwrap();
        assert_eq!(parsed["name"], "Ada Lovelace");
    }
}
