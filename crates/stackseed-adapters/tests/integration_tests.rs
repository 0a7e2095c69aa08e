//! Integration tests: core pipeline written through the real adapters.

use std::path::Path;

use stackseed_adapters::{ConfigFileLoader, InMemoryPresetStore, LocalFilesystem, MemoryFilesystem};
use stackseed_core::prelude::*;
use stackseed_core::{generate, generate_from_preset};
use tempfile::TempDir;

#[test]
fn generated_project_lands_on_disk() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("my-app");

    let project = generate(&PartialConfig::default()).into_result().unwrap();
    let report = ProjectWriter::new(Box::new(LocalFilesystem::new()))
        .write(&project, &root, WriteOptions::default())
        .unwrap();

    assert_eq!(report.files_written, project.files.len());
    for file in &project.files {
        let on_disk = std::fs::read_to_string(root.join(file.path.as_path())).unwrap();
        assert_eq!(on_disk, file.content, "{}", file.path);
    }
}

#[test]
fn existing_project_is_refused_then_overwritten() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("my-app");
    std::fs::create_dir_all(&root).unwrap();

    let project = generate(&PartialConfig::default()).into_result().unwrap();
    let writer = ProjectWriter::new(Box::new(LocalFilesystem::new()));

    let err = writer.write(&project, &root, WriteOptions::default()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);

    writer
        .write(&project, &root, WriteOptions { overwrite: true })
        .unwrap();
    assert!(root.join("package.json").is_file());
}

#[test]
fn config_file_to_memory_filesystem() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("forms.toml");
    std::fs::write(
        &config,
        r#"
template = "forms"
project_name = "signup"

[[forms]]
name = "signup"
fields = [
  { name = "email", kind = "email" },
  { name = "password", kind = "password" },
]
"#,
    )
    .unwrap();

    let partial = ConfigFileLoader::new().load(&config).unwrap();
    let project = generate(&partial).into_result().unwrap();

    let fs = MemoryFilesystem::new();
    ProjectWriter::new(Box::new(fs.clone()))
        .write(&project, Path::new("out"), WriteOptions::default())
        .unwrap();

    assert_eq!(fs.file_count(), project.files.len());
    let schema = fs
        .read_file(Path::new("out/src/lib/forms/signup.ts"))
        .expect("form schema written");
    assert!(schema.contains("signupSchema"));
}

#[test]
fn store_presets_drive_generation() {
    let store = InMemoryPresetStore::with_builtin();
    let preset = store.get("onboarding").unwrap();
    let project = generate_from_preset(&preset, &PartialConfig::empty(preset.kind()))
        .into_result()
        .unwrap();
    assert!(project.file("src/components/forms/OnboardingForm.tsx").is_some());
}
