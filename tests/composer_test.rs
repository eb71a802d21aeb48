use std::fs;
use std::path::Path;

use structura::composer::{dump_autoload, AutoloadOutcome, ComposerManifest, COMPOSER_FILE};
use structura::config::Config;
use structura::error::{Error, Result};
use structura::generator::{GeneratedArtifact, Generator, Invocation};
use structura::kind::ArtifactKind;
use structura::options::{Flags, OptionValue};
use structura::renderer::PlaceholderRenderer;
use structura::stubs;
use tempfile::TempDir;

const MANIFEST: &str = r#"{
    "name": "acme/app",
    "autoload": {
        "psr-4": {
            "App\\": "app/"
        },
        "files": [
            "bootstrap/Zeta.php"
        ]
    },
    "require": {
        "php": "^8.2"
    }
}
"#;

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(COMPOSER_FILE), MANIFEST).unwrap();
    temp_dir
}

fn helper(root: &Path, name: Option<&str>, flag: &str) -> Result<GeneratedArtifact> {
    let config = Config::builtin()?;
    let renderer = PlaceholderRenderer::new();
    let flags: Flags = [(flag.to_string(), OptionValue::Flag(true))].into_iter().collect();
    let artifact = Generator::new(&renderer).prepare(&Invocation {
        kind: ArtifactKind::Helper,
        name: name.map(str::to_string),
        flags,
        config: &config,
        project_root: root,
    })?;
    artifact.write()?;
    Ok(artifact)
}

fn autoload_files(root: &Path) -> Vec<String> {
    let manifest = ComposerManifest::load(root).unwrap();
    manifest.autoload_files().into_iter().map(str::to_string).collect()
}

#[test_log::test]
fn test_global_helper_is_registered() {
    let temp_dir = project();
    let artifact = helper(temp_dir.path(), Some("Format"), "global").unwrap();

    let target = temp_dir.path().join("app/Helpers/format_helper.php");
    assert_eq!(artifact.path, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), stubs::GLOBAL_HELPER);
    assert_eq!(artifact.registration.unwrap().entry(), "app/Helpers/format_helper.php");
    assert_eq!(
        autoload_files(temp_dir.path()),
        ["app/Helpers/format_helper.php", "bootstrap/Zeta.php"]
    );
}

#[test_log::test]
fn test_nested_global_helper_keeps_directories() {
    let temp_dir = project();
    helper(temp_dir.path(), Some("text/StringFormat"), "global").unwrap();

    assert!(temp_dir.path().join("app/Helpers/Text/string_format_helper.php").is_file());
    assert!(autoload_files(temp_dir.path())
        .contains(&"app/Helpers/Text/string_format_helper.php".to_string()));
}

#[test_log::test]
fn test_helper_stub_is_copied_and_registered() {
    let temp_dir = project();
    helper(temp_dir.path(), None, "stub").unwrap();

    let target = temp_dir.path().join("app/Helpers/helpers.php");
    assert_eq!(fs::read_to_string(target).unwrap(), stubs::HELPERS_FILE);
    assert_eq!(autoload_files(temp_dir.path()), ["app/Helpers/helpers.php", "bootstrap/Zeta.php"]);

    let again = helper(temp_dir.path(), None, "stub");
    assert!(matches!(again, Err(Error::ArtifactExistsError { .. })));
}

#[test_log::test]
fn test_manifest_keeps_key_order_and_indentation() {
    let temp_dir = project();
    helper(temp_dir.path(), None, "stub").unwrap();

    let content = fs::read_to_string(temp_dir.path().join(COMPOSER_FILE)).unwrap();
    let name = content.find("\"name\"").unwrap();
    let autoload = content.find("\"autoload\"").unwrap();
    let require = content.find("\"require\"").unwrap();
    assert!(name < autoload && autoload < require);
    assert!(content.contains("\n    \"name\": \"acme/app\","));
    assert!(content.contains("\n        \"files\": [\n            \"app/Helpers/helpers.php\","));
    assert!(content.ends_with("}\n"));
}

#[test_log::test]
fn test_stub_rejects_a_name() {
    let temp_dir = project();
    let result = helper(temp_dir.path(), Some("Format"), "stub");

    assert!(matches!(result, Err(Error::InvalidNameError { .. })));
    assert!(!temp_dir.path().join("app").exists());
}

#[test_log::test]
fn test_global_requires_a_name() {
    let temp_dir = project();
    let result = helper(temp_dir.path(), None, "global");

    assert!(matches!(result, Err(Error::InvalidNameError { .. })));
}

#[test_log::test]
fn test_missing_manifest_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let result = helper(temp_dir.path(), Some("Format"), "global");

    assert!(matches!(result, Err(Error::ComposerError(_))));
    assert!(!temp_dir.path().join("app").exists());
}

#[test_log::test]
fn test_dump_autoload_is_skipped_in_production() {
    let temp_dir = project();
    assert_eq!(dump_autoload(temp_dir.path(), true), AutoloadOutcome::Skipped);
}
