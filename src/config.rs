//! Configuration handling for structura.
//! This module loads the project configuration (namespaces, paths and default options per
//! artifact kind), validates it against a JSON schema and falls back to the built-in
//! document when the project has none.

use crate::error::{Error, Result};
use crate::kind::ArtifactKind;
use crate::options::ConfiguredOptions;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory, relative to the project root, holding the configuration file.
pub const CONFIG_DIR: &str = "config";

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["structura.json", "structura.yml", "structura.yaml"];

/// Built-in configuration, also the document published by `structura install`.
pub const DEFAULT_CONFIG: &str = include_str!("../stubs/structura.yaml");

fn default_support_namespace() -> String {
    "KaueF\\Structura".to_string()
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Root namespace of each kind
    #[serde(default)]
    pub namespaces: IndexMap<String, String>,
    /// Target directory of each kind, relative to the project root
    #[serde(default)]
    pub paths: IndexMap<String, String>,
    /// Defaults used when a flag is not passed
    #[serde(default, alias = "default_optins")]
    pub default_options: IndexMap<String, ConfiguredOptions>,
    /// Namespace of the support package referenced by generated imports
    #[serde(default = "default_support_namespace")]
    pub support_namespace: String,
    /// Directory holding `<kind>.stub` template overrides
    #[serde(default)]
    pub stubs: Option<String>,
    /// File the configuration was read from, `None` for the built-in document
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    fn setting<'a>(
        map: &'a IndexMap<String, String>,
        kind: ArtifactKind,
        setting: &str,
    ) -> Result<&'a str> {
        match map.get(kind.key()).map(|value| value.trim()) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::ConfigurationMissingError {
                kind: kind.key().to_string(),
                setting: setting.to_string(),
            }),
        }
    }

    /// Root namespace of a kind.
    ///
    /// # Errors
    /// * `Error::ConfigurationMissingError` if the kind has no (or an empty) namespace
    pub fn namespace(&self, kind: ArtifactKind) -> Result<&str> {
        Self::setting(&self.namespaces, kind, "namespace")
    }

    /// Target directory of a kind, resolved against the project root.
    ///
    /// # Errors
    /// * `Error::ConfigurationMissingError` if the kind has no (or an empty) path
    pub fn path(&self, kind: ArtifactKind, project_root: &Path) -> Result<PathBuf> {
        Ok(project_root.join(Self::setting(&self.paths, kind, "path")?))
    }

    /// Configured default options of a kind.
    pub fn default_options(&self, kind: ArtifactKind) -> Option<&ConfiguredOptions> {
        self.default_options.get(kind.key())
    }

    /// The built-in configuration.
    pub fn builtin() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }
}

/// JSON schema every configuration document must satisfy.
pub fn config_schema() -> serde_json::Value {
    let option_value = serde_json::json!({ "type": ["boolean", "string", "null"] });
    let kind_table = serde_json::json!({
        "type": "object",
        "additionalProperties": { "type": "string" }
    });
    serde_json::json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "properties": {
            "namespaces": kind_table.clone(),
            "paths": kind_table,
            "default_options": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "additionalProperties": option_value
                }
            },
            "default_optins": { "$ref": "#/properties/default_options" },
            "support_namespace": { "type": "string", "minLength": 1 },
            "stubs": { "type": ["string", "null"] }
        },
        "additionalProperties": false
    })
}

/// Checks a parsed document against [`config_schema`].
///
/// # Errors
/// * `Error::ConfigError` listing every schema violation
pub fn validate_document(document: &serde_json::Value) -> Result<()> {
    let validator = jsonschema::validator_for(&config_schema())
        .map_err(|e| Error::ConfigError(format!("Invalid configuration schema: {e}")))?;
    let violations: Vec<String> = validator.iter_errors(document).map(|e| e.to_string()).collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!("Invalid configuration: {}", violations.join("; "))))
    }
}

/// Parses, validates and deserializes configuration content.
///
/// JSON is tried first, YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither JSON nor YAML, or violates the schema
pub fn parse_config(content: &str) -> Result<Config> {
    let document: serde_json::Value = match serde_json::from_str(content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?,
    };
    // An empty YAML document parses to null.
    let document = if document.is_null() { serde_json::json!({}) } else { document };

    validate_document(&document)?;
    serde_json::from_value(document)
        .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))
}

/// Loads configuration from a project, trying multiple file formats.
/// Supports: structura.json, structura.yml, structura.yaml under `config/`.
///
/// # Arguments
/// * `project_root` - Root directory of the project
/// * `config_files` - List of configuration files to try
///
/// # Returns
/// * `Result<Option<(PathBuf, String)>>` - Path and contents of the first file found
pub fn load_config<P: AsRef<Path>>(
    project_root: P,
    config_files: &[&str],
) -> Result<Option<(PathBuf, String)>> {
    let config_dir = project_root.as_ref().join(CONFIG_DIR);
    for file in config_files {
        let config_path = config_dir.join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path).map_err(Error::IoError)?;
            return Ok(Some((config_path, content)));
        }
    }
    Ok(None)
}

/// Returns the configuration of a project, or the built-in one when the project has no
/// configuration file.
pub fn get_config<P: AsRef<Path>>(project_root: P) -> Result<Config> {
    match load_config(&project_root, &CONFIG_FILES)? {
        Some((path, content)) => {
            let mut config = parse_config(&content)?;
            config.source = Some(path);
            Ok(config)
        }
        None => {
            debug!(
                "No configuration file found (tried: {}), using defaults",
                CONFIG_FILES.join(", ")
            );
            Config::builtin()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_covers_every_kind() {
        let config = Config::builtin().unwrap();
        let root = Path::new("/project");
        for kind in ArtifactKind::ALL {
            assert!(config.namespace(kind).is_ok(), "{kind}");
            assert!(config.path(kind, root).is_ok(), "{kind}");
        }
        assert_eq!(config.namespace(ArtifactKind::Action).unwrap(), "App\\Actions");
        assert_eq!(config.path(ArtifactKind::Dto, root).unwrap(), root.join("app/DTOs"));
        assert_eq!(config.support_namespace, "KaueF\\Structura");
        assert!(config.source.is_none());
    }

    #[test]
    fn test_json_config() {
        let content = r#"{
            "namespaces": {"action": "Domain\\Actions"},
            "paths": {"action": "src/Actions"},
            "default_options": {"action": {"handle": true}}
        }"#;
        let config = parse_config(content).unwrap();
        assert_eq!(config.namespace(ArtifactKind::Action).unwrap(), "Domain\\Actions");
        assert_eq!(
            config.default_options(ArtifactKind::Action).unwrap()["handle"],
            serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn test_missing_kind_is_reported() {
        let config = parse_config("namespaces:\n  action: App\\Actions\n").unwrap();
        assert!(matches!(
            config.namespace(ArtifactKind::Cache),
            Err(Error::ConfigurationMissingError { .. })
        ));
        assert!(matches!(
            config.path(ArtifactKind::Action, Path::new(".")),
            Err(Error::ConfigurationMissingError { .. })
        ));
    }

    #[test]
    fn test_empty_namespace_is_missing() {
        let config = parse_config("namespaces:\n  action: '  '\n").unwrap();
        assert!(matches!(
            config.namespace(ArtifactKind::Action),
            Err(Error::ConfigurationMissingError { .. })
        ));
    }

    #[test]
    fn test_misspelled_default_options_key_is_accepted() {
        let config = parse_config("default_optins:\n  service:\n    raw: true\n").unwrap();
        assert!(config.default_options(ArtifactKind::Service).is_some());
    }

    #[test]
    fn test_schema_violations_are_rejected() {
        for content in [
            "namespaces: [App]",
            "default_options:\n  action:\n    raw: 1\n",
            "unknown_key: true",
        ] {
            assert!(matches!(parse_config(content), Err(Error::ConfigError(_))), "{content}");
        }
    }

    #[test]
    fn test_invalid_syntax_is_rejected() {
        assert!(matches!(parse_config("namespaces: [unclosed"), Err(Error::ConfigError(_))));
    }
}
