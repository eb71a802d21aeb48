//! Composer integration for helper files.
//! Registers files in the `autoload.files` section of `composer.json` and refreshes the
//! autoloader afterwards.

use crate::error::{Error, Result};
use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const COMPOSER_FILE: &str = "composer.json";

/// In-memory copy of a project's `composer.json`.
#[derive(Debug, Clone)]
pub struct ComposerManifest {
    path: PathBuf,
    document: serde_json::Value,
}

impl ComposerManifest {
    /// Reads `composer.json` from the project root.
    ///
    /// # Errors
    /// * `Error::ComposerError` if the file is missing, is not valid JSON or is not an object
    pub fn load<P: AsRef<Path>>(project_root: P) -> Result<Self> {
        let path = project_root.as_ref().join(COMPOSER_FILE);
        if !path.is_file() {
            return Err(Error::ComposerError(format!("{} not found", path.display())));
        }
        let content = std::fs::read_to_string(&path).map_err(Error::IoError)?;
        let document: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| Error::ComposerError(format!("{} is not valid JSON: {e}", path.display())))?;
        if !document.is_object() {
            return Err(Error::ComposerError(format!("{} is not a JSON object", path.display())));
        }
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries of `autoload.files`, in file order.
    pub fn autoload_files(&self) -> Vec<&str> {
        self.document
            .pointer("/autoload/files")
            .and_then(|files| files.as_array())
            .map(|files| files.iter().filter_map(|file| file.as_str()).collect())
            .unwrap_or_default()
    }

    /// Adds `entry` to `autoload.files`, keeping the list free of duplicates and sorted
    /// case-insensitively.
    ///
    /// Returns `false` when the entry was already registered.
    ///
    /// # Errors
    /// * `Error::ComposerError` if `autoload` or `autoload.files` has an unexpected shape
    pub fn register(&mut self, entry: &str) -> Result<bool> {
        let mut files: Vec<String> =
            self.autoload_files().into_iter().map(str::to_string).collect();
        if files.iter().any(|file| file == entry) {
            debug!("'{}' is already registered in {}.", entry, COMPOSER_FILE);
            return Ok(false);
        }
        files.push(entry.to_string());
        files.sort_by_key(|file| file.to_lowercase());
        files.dedup();

        let root = self
            .document
            .as_object_mut()
            .ok_or_else(|| Error::ComposerError("manifest is not a JSON object".to_string()))?;
        let autoload = root
            .entry("autoload")
            .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()))
            .as_object_mut()
            .ok_or_else(|| Error::ComposerError("'autoload' is not an object".to_string()))?;
        if autoload.get("files").is_some_and(|files| !files.is_array()) {
            return Err(Error::ComposerError("'autoload.files' is not an array".to_string()));
        }
        autoload.insert("files".to_string(), serde_json::json!(files));
        Ok(true)
    }

    /// Writes the manifest back, pretty printed with 4-space indentation.
    pub fn save(&self) -> Result<()> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.document.serialize(&mut serializer).map_err(Error::JsonError)?;
        buffer.push(b'\n');
        std::fs::write(&self.path, buffer).map_err(Error::IoError)
    }
}

/// Result of refreshing the Composer autoloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoloadOutcome {
    Skipped,
    Completed,
    Failed(String),
}

/// Runs `composer dump-autoload` in the project root.
///
/// Skipped in production. A failure is logged and reported, never raised.
pub fn dump_autoload<P: AsRef<Path>>(project_root: P, production: bool) -> AutoloadOutcome {
    if production {
        debug!("Production environment, skipping composer dump-autoload.");
        return AutoloadOutcome::Skipped;
    }

    let status = Command::new("composer")
        .arg("dump-autoload")
        .current_dir(project_root.as_ref())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .status();

    match status {
        Ok(status) if status.success() => AutoloadOutcome::Completed,
        Ok(status) => {
            let reason = format!("composer dump-autoload failed with status: {status}");
            warn!("{reason}");
            AutoloadOutcome::Failed(reason)
        }
        Err(e) => {
            let reason = format!("unable to run composer: {e}");
            warn!("{reason}");
            AutoloadOutcome::Failed(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest(content: &str) -> (TempDir, ComposerManifest) {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(COMPOSER_FILE), content).unwrap();
        let manifest = ComposerManifest::load(temp_dir.path()).unwrap();
        (temp_dir, manifest)
    }

    #[test]
    fn test_register_creates_autoload_section() {
        let (_dir, mut manifest) = manifest(r#"{"name": "acme/app"}"#);
        assert!(manifest.register("app/Helpers/helpers.php").unwrap());
        assert_eq!(manifest.autoload_files(), ["app/Helpers/helpers.php"]);
    }

    #[test]
    fn test_register_sorts_case_insensitively_and_skips_duplicates() {
        let (_dir, mut manifest) =
            manifest(r#"{"autoload": {"files": ["b.php", "C.php"], "psr-4": {}}}"#);
        assert!(manifest.register("a.php").unwrap());
        assert!(!manifest.register("b.php").unwrap());
        assert_eq!(manifest.autoload_files(), ["a.php", "b.php", "C.php"]);
    }

    #[test]
    fn test_unexpected_files_shape_is_rejected() {
        let (_dir, mut manifest) = manifest(r#"{"autoload": {"files": "helpers.php"}}"#);
        assert!(matches!(manifest.register("a.php"), Err(Error::ComposerError(_))));
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            ComposerManifest::load(temp_dir.path()),
            Err(Error::ComposerError(_))
        ));
    }

    #[test]
    fn test_production_skips_dump_autoload() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(dump_autoload(temp_dir.path(), true), AutoloadOutcome::Skipped);
    }
}
