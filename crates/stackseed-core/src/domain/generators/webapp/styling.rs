use crate::domain::config::WebAppConfig;
use crate::domain::entities::FileRecord;
use crate::domain::generators::support::js_string_array;
use crate::domain::value_objects::WebAppFeature;

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if !cfg.has(WebAppFeature::Tailwind) {
        return Vec::new();
    }
    let ext = if cfg.use_typescript { "ts" } else { "js" };
    vec![
        FileRecord::new(format!("tailwind.config.{ext}"), tailwind_config(cfg)),
        FileRecord::new("postcss.config.mjs", POSTCSS),
    ]
}

fn tailwind_config(cfg: &WebAppConfig) -> String {
    let router = if cfg.use_app_router { "app" } else { "pages" };
    let content = js_string_array(&[
        format!("./{}{router}/**/*.{{js,ts,jsx,tsx,mdx}}", cfg.src()),
        format!("./{}components/**/*.{{js,ts,jsx,tsx,mdx}}", cfg.src()),
    ]);

    let body = format!(
        "{{\n  content: {content},\n  theme: {{\n    extend: {{}},\n  }},\n  plugins: [],\n}}"
    );

    if cfg.use_typescript {
        format!(
            "import type {{ Config }} from \"tailwindcss\";\n\nconst config: Config = {body};\n\nexport default config;\n"
        )
    } else {
        format!("/** @type {{import('tailwindcss').Config}} */\nmodule.exports = {body};\n")
    }
}

const POSTCSS: &str = r#"const config = {
  plugins: {
    tailwindcss: {},
    autoprefixer: {},
  },
};

export default config;
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults;

    #[test]
    fn typescript_config_scans_app_directory() {
        let files = generate(&defaults::webapp());
        assert_eq!(files[0].path.as_str(), "tailwind.config.ts");
        assert!(
            files[0]
                .content
                .contains("\"./src/app/**/*.{js,ts,jsx,tsx,mdx}\"")
        );
        assert_eq!(files[1].path.as_str(), "postcss.config.mjs");
    }

    #[test]
    fn javascript_pages_router() {
        let mut cfg = defaults::webapp();
        cfg.use_typescript = false;
        cfg.use_app_router = false;
        cfg.use_src_directory = false;
        let files = generate(&cfg);
        assert_eq!(files[0].path.as_str(), "tailwind.config.js");
        assert!(files[0].content.contains("module.exports = {"));
        assert!(files[0].content.contains("\"./pages/**/*.{js,ts,jsx,tsx,mdx}\""));
    }

    #[test]
    fn absent_without_feature() {
        let mut cfg = defaults::webapp();
        cfg.features.remove(&WebAppFeature::Tailwind);
        assert!(generate(&cfg).is_empty());
    }
}
