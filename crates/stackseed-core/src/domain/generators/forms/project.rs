use super::{FormNames, instructions, package_scripts};
use crate::domain::config::FormsConfig;
use crate::domain::entities::{FileRecord, RenderContext};
use crate::domain::generators::support::{NEXT_ENV_DTS, PackageManifest, tsconfig};
use crate::domain::value_objects::FormsFeature;

pub(super) fn generate(cfg: &FormsConfig) -> Vec<FileRecord> {
    vec![
        package_json(cfg),
        tsconfig(cfg.src(), &[]),
        FileRecord::new("next-env.d.ts", NEXT_ENV_DTS),
        FileRecord::new("README.md", readme(cfg)),
    ]
}

fn package_json(cfg: &FormsConfig) -> FileRecord {
    let client = cfg.has(FormsFeature::ClientValidation);
    PackageManifest::new(&cfg.project_name)
        .scripts(package_scripts(cfg))
        .dependency("next")
        .dependency("react")
        .dependency("react-dom")
        .dependency("zod")
        .dependency_if(client, "react-hook-form")
        .dependency_if(client, "@hookform/resolvers")
        .dev_dependency("typescript")
        .dev_dependency("@types/node")
        .dev_dependency("@types/react")
        .dev_dependency("@types/react-dom")
        .dev_dependency("eslint")
        .dev_dependency("eslint-config-next")
        .dev_dependency_if(cfg.has(FormsFeature::Tests), "vitest")
        .into_record()
}

const README: &str = r#"# {{PROJECT_NAME_TITLE}}

Typed forms scaffolded by stackseed.

## Forms

{{FORMS}}

## Getting started

{{STEPS}}
"#;

fn readme(cfg: &FormsConfig) -> String {
    let forms = if cfg.forms.is_empty() {
        "No forms are configured yet.".to_string()
    } else {
        cfg.forms
            .iter()
            .map(|form| {
                let names = FormNames::of(form);
                let steps = if form.multi_step {
                    format!(", {} steps", form.steps.len())
                } else {
                    String::new()
                };
                format!(
                    "- **{}** (`<{} />`): {} fields{steps}",
                    names.title,
                    names.component(),
                    form.fields.len()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let steps = instructions(cfg)
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    RenderContext::new(&cfg.project_name)
        .with_variable("FORMS", forms)
        .with_variable("STEPS", steps)
        .render(README)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    #[test]
    fn manifest_follows_features() {
        let mut cfg = defaults::forms();
        let pkg: serde_json::Value =
            serde_json::from_str(&generate(&cfg)[0].content).unwrap();
        assert!(pkg["dependencies"]["react-hook-form"].is_string());
        assert!(pkg["devDependencies"].get("vitest").is_none());

        cfg.features.clear();
        cfg.features.insert(FormsFeature::Tests);
        let pkg: serde_json::Value =
            serde_json::from_str(&generate(&cfg)[0].content).unwrap();
        assert!(pkg["dependencies"].get("react-hook-form").is_none());
        assert_eq!(pkg["scripts"]["test"], "vitest run");
    }

    #[test]
    fn readme_lists_forms() {
        let files = generate(&defaults::forms());
        let readme = &files[3].content;
        assert_eq!(files[3].path.as_str(), "README.md");
        assert!(readme.contains("- **Contact** (`<ContactForm />`): 3 fields"));
        assert!(readme.contains("1. cd my-app"));
    }
}
