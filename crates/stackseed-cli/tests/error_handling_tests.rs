//! Tests for error handling, exit codes and suggestions.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stackseed(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stackseed").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_error_invalid_project_name() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", ".hidden", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn test_error_unknown_features_are_all_reported() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "shop", "-F", "blog,cms", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("features[0]"))
        .stderr(predicate::str::contains("blog"))
        .stderr(predicate::str::contains("features[1]"))
        .stderr(predicate::str::contains("cms"));

    assert!(!home.path().join("shop").exists());
}

#[test]
fn test_error_unknown_preset() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "shop", "--preset", "nope", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no preset named 'nope'"))
        .stderr(predicate::str::contains("stackseed presets"));
}

#[test]
fn test_error_preset_template_mismatch() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "shop", "--preset", "starter", "--template", "forms", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("starter"));
}

#[test]
fn test_error_webapp_only_flag() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "signup", "--template", "forms", "--javascript", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--javascript"));
}

#[test]
fn test_error_template_conflicts_with_file() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("portal.toml"), "template = \"rbac\"\n").unwrap();

    stackseed(&home)
        .args(["new", "portal", "--file", "portal.toml", "--template", "forms", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("conflicts"));
}

#[test]
fn test_error_validate_reports_every_field() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("bad.toml"),
        "package_manager = \"maven\"\nfeatures = [\"blog\"]\n",
    )
    .unwrap();

    stackseed(&home)
        .args(["validate", "bad.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("package_manager"))
        .stderr(predicate::str::contains("features[0]"));
}

#[test]
fn test_error_validate_json_lists_errors() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("bad.json"), r#"{"package_manager": "maven"}"#).unwrap();

    let assert = stackseed(&home)
        .args(["--output-format", "json", "validate", "bad.json"])
        .assert()
        .code(2);

    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0]["path"], "package_manager");
}

#[test]
fn test_error_malformed_file() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("broken.toml"), "template = [\n").unwrap();

    stackseed(&home)
        .args(["validate", "broken.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
fn test_error_missing_settings_file() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["--config", "absent.toml", "presets"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Settings error"));
}

#[test]
fn test_error_unknown_settings_key() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["config", "get", "defaults.colour"])
        .assert()
        .code(4);
}

#[test]
fn test_error_verbose_hint_only_without_verbose() {
    let home = TempDir::new().unwrap();
    stackseed(&home)
        .args(["new", "shop", "--preset", "nope", "--yes"])
        .assert()
        .stderr(predicate::str::contains("--verbose"));

    stackseed(&home)
        .args(["-v", "new", "shop", "--preset", "nope", "--yes"])
        .assert()
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}

#[test]
fn test_error_unknown_subcommand_uses_clap_exit_code() {
    let home = TempDir::new().unwrap();
    stackseed(&home).arg("deploy").assert().code(2);
}
