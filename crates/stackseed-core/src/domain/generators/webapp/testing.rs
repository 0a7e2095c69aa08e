use crate::domain::config::WebAppConfig;
use crate::domain::entities::{FileRecord, RenderContext};
use crate::domain::generators::support::{blocks, when};
use crate::domain::value_objects::WebAppFeature;

pub(super) fn generate(cfg: &WebAppConfig) -> Vec<FileRecord> {
    if !cfg.has(WebAppFeature::Testing) {
        return Vec::new();
    }

    let (ext, jsx) = (cfg.ext(), cfg.jsx_ext());
    let config_ext = if cfg.use_typescript { "ts" } else { "mjs" };

    let mut files = vec![
        FileRecord::new(format!("vitest.config.{config_ext}"), vitest_config(cfg)),
        FileRecord::new(
            format!("tests/setup.{ext}"),
            "import \"@testing-library/jest-dom/vitest\";\n",
        ),
        FileRecord::new(format!("tests/home.test.{jsx}"), home_test(cfg)),
    ];
    if cfg.has(WebAppFeature::Validation) {
        files.push(FileRecord::new(
            format!("tests/validation.test.{ext}"),
            validation_test(cfg),
        ));
    }
    files
}

fn vitest_config(cfg: &WebAppConfig) -> String {
    RenderContext::new(&cfg.project_name)
        .with_variable("SRC", cfg.src())
        .with_variable("EXT", cfg.ext())
        .render(
            r#"import { defineConfig } from "vitest/config";
import react from "@vitejs/plugin-react";
import { fileURLToPath } from "node:url";

export default defineConfig({
  plugins: [react()],
  resolve: {
    alias: {
      "@": fileURLToPath(new URL("./{{SRC}}", import.meta.url)),
    },
  },
  test: {
    environment: "jsdom",
    globals: true,
    setupFiles: ["./tests/setup.{{EXT}}"],
  },
});
"#,
        )
}

fn home_test(cfg: &WebAppConfig) -> String {
    let page = if cfg.use_app_router { "@/app/page" } else { "@/pages/index" };
    RenderContext::new(&cfg.project_name)
        .with_variable("PAGE", page)
        .render(
            r#"import { describe, expect, it } from "vitest";
import { render, screen } from "@testing-library/react";
import HomePage from "{{PAGE}}";

describe("home page", () => {
  it("renders the project title", () => {
    render(<HomePage />);
    expect(screen.getByRole("heading", { level: 1 })).toHaveTextContent("{{PROJECT_NAME_TITLE}}");
  });
});
"#,
        )
}

fn validation_test(cfg: &WebAppConfig) -> String {
    let user = cfg.models.user;
    let imports = format!(
        "import {{ describe, expect, it }} from \"vitest\";\nimport {{ paginationSchema{} }} from \"@/lib/validation\";",
        when(user, ", userSchema")
    );

    let pagination = r#"describe("paginationSchema", () => {
  it("fills in defaults", () => {
    expect(paginationSchema.parse({})).toEqual({ page: 1, perPage: 20 });
  });

  it("rejects a page below one", () => {
    expect(paginationSchema.safeParse({ page: 0 }).success).toBe(false);
  });
});"#;

    let users = when(
        user,
        r#"describe("userSchema", () => {
  it("accepts a valid email", () => {
    expect(userSchema.safeParse({ email: "ada@example.com" }).success).toBe(true);
  });

  it("rejects an invalid email", () => {
    expect(userSchema.safeParse({ email: "not-an-email" }).success).toBe(false);
  });
});"#,
    );

    blocks([imports.as_str(), pagination, users.as_str()])
}
