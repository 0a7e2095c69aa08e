//! Integration tests for the stackseed binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's settings, presets and environment.
fn stackseed(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stackseed").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_flag() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackseed"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn new_project_is_written() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "shop", "--pm", "pnpm", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'shop' created"))
        .stdout(predicate::str::contains("pnpm install"));

    let root = home.path().join("shop");
    let package_json = fs::read_to_string(root.join("package.json")).unwrap();
    assert!(package_json.contains("\"name\": \"shop\""));
    assert!(root.join("prisma/schema.prisma").is_file());
}

#[test]
fn output_flag_picks_the_parent_directory() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "team", "--template", "rbac", "--output", "apps", "--yes"])
        .assert()
        .success();

    assert!(home.path().join("apps/team/package.json").is_file());
}

#[test]
fn dry_run_writes_nothing() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "shop", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("package.json"));

    assert!(!home.path().join("shop").exists());
}

#[test]
fn dry_run_json_is_the_generation_result() {
    let home = TempDir::new().unwrap();
    let assert = stackseed(&home)
        .args(["--output-format", "json", "new", "signup", "-t", "forms", "--dry-run"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["config"]["template"], "forms");
    let files = json["files"].as_array().unwrap();
    assert!(files.iter().any(|f| f["path"] == "package.json"));
}

#[test]
fn stamp_adds_banner_to_commentable_files() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "shop", "--stamp", "--yes"])
        .assert()
        .success();

    let gitignore = fs::read_to_string(home.path().join("shop/.gitignore")).unwrap();
    assert!(gitignore.starts_with("# Generated by stackseed on "));
    let package_json = fs::read_to_string(home.path().join("shop/package.json")).unwrap();
    assert!(package_json.starts_with('{'));
}

#[test]
fn preset_with_overrides() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "portal", "--preset", "starter", "--pm", "bun", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bun install"));

    assert!(home.path().join("portal/package.json").is_file());
}

#[test]
fn file_configuration_is_used() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("signup.toml"),
        r#"
template = "forms"

[[forms]]
name = "signup"
fields = [
  { name = "email", kind = "email" },
  { name = "password", kind = "password" },
]
"#,
    )
    .unwrap();

    stackseed(&home)
        .args(["new", "signup", "--file", "signup.toml", "--yes"])
        .assert()
        .success();

    let schema = fs::read_to_string(home.path().join("signup/src/lib/forms/signup.ts")).unwrap();
    assert!(schema.contains("signupSchema"));
}

#[test]
fn existing_project_needs_force() {
    let home = TempDir::new().unwrap();
    fs::create_dir(home.path().join("shop")).unwrap();

    stackseed(&home)
        .args(["new", "shop", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    stackseed(&home)
        .args(["new", "shop", "--yes", "--force"])
        .assert()
        .success();
    assert!(home.path().join("shop/package.json").is_file());
}

#[test]
fn quiet_flag_silences_stdout() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["-q", "new", "shop", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn validate_accepts_a_good_file() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("app.json"), r#"{"package_manager": "yarn"}"#).unwrap();

    stackseed(&home)
        .args(["validate", "app.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid webapp configuration"));
}

#[test]
fn validate_against_preset() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("portal.toml"), "template = \"rbac\"\n").unwrap();

    stackseed(&home)
        .args(["validate", "portal.toml", "--preset", "starter"])
        .assert()
        .success();
}

#[test]
fn presets_lists_bundled_presets() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Presets"))
        .stdout(predicate::str::contains("enterprise"))
        .stdout(predicate::str::contains("onboarding"));
}

#[test]
fn presets_filter_by_template() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["presets", "--template", "forms", "--format", "list"])
        .assert()
        .success()
        .stdout("contact\nonboarding\n");
}

#[test]
fn presets_as_json() {
    let home = TempDir::new().unwrap();
    let assert = stackseed(&home)
        .args(["presets", "--format", "json"])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["basic", "standard", "enterprise", "contact", "onboarding", "starter"]
    );
}

#[test]
fn user_presets_come_from_settings() {
    let home = TempDir::new().unwrap();
    let presets = home.path().join("my-presets");
    fs::create_dir(&presets).unwrap();
    fs::write(
        presets.join("shop.toml"),
        "description = \"Storefront\"\npackage_manager = \"pnpm\"\n",
    )
    .unwrap();
    fs::write(
        home.path().join("settings.toml"),
        format!("[paths]\npresets_dir = '{}'\n", presets.display()),
    )
    .unwrap();

    stackseed(&home)
        .args(["--config", "settings.toml", "presets", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shop"));

    stackseed(&home)
        .args(["--config", "settings.toml", "new", "store", "--preset", "shop", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pnpm install"));
}

#[test]
fn environment_overrides_settings() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .env("STACKSEED_DEFAULTS__PACKAGE_MANAGER", "yarn")
        .args(["config", "get", "defaults.package_manager"])
        .assert()
        .success()
        .stdout("yarn\n");
}

#[test]
fn init_writes_local_settings() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings created"));

    assert!(home.path().join(".stackseed.toml").is_file());

    stackseed(&home)
        .args(["config", "get", "output.format"])
        .assert()
        .success()
        .stdout("auto\n");
}

#[test]
fn config_path_points_into_config_dir() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn shell_completions() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stackseed"));
}
