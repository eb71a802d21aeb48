//! Error handling for structura.
//! Defines the error taxonomy shared by every generator command and the result alias
//! used throughout the crate.

use std::io;
use thiserror::Error;

/// Custom error types for structura operations.
///
/// Every validation variant is raised before the write step, so a failed command never
/// leaves a partial artifact behind.
#[derive(Error, Debug)]
pub enum Error {
    /// The raw identifier was empty or did not match the allowed pattern.
    #[error("{message}")]
    InvalidNameError { message: String },

    /// More than one option of an exclusivity group was selected.
    #[error("Choose only one of the options: {}.", flag_list(.options))]
    ConflictingOptionsError { options: Vec<String> },

    /// The target file is already present on disk.
    #[error("{kind} already exists: '{path}'.")]
    ArtifactExistsError { kind: String, path: String },

    /// A value outside of the accepted set, e.g. an enum backing type.
    #[error("Invalid {option} value '{value}'. Use {expected}.")]
    UnsupportedValueError { option: String, value: String, expected: String },

    /// The namespace or path of an artifact kind cannot be resolved from configuration.
    #[error("Unable to resolve the {setting} for '{kind}'. Check config/structura.yaml.")]
    ConfigurationMissingError { kind: String, setting: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors that occur while reading or updating composer.json
    #[error("Composer manifest error: {0}.")]
    ComposerError(String),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur while (de)serializing JSON documents
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error should be reported with the warning style.
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::ArtifactExistsError { .. })
    }
}

fn flag_list(options: &[String]) -> String {
    options.iter().map(|option| format!("--{option}")).collect::<Vec<_>>().join(", ")
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// The message is framed by blank lines and prefixed with an emoji, mirroring the
/// success output of the generator commands.
pub fn default_error_handler(err: Error) {
    if err.is_warning() {
        eprintln!("\n⚠️  {err}\n");
    } else {
        eprintln!("\n❌ {err}\n");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_options_message() {
        let err = Error::ConflictingOptionsError {
            options: vec!["execute".to_string(), "handle".to_string()],
        };
        assert_eq!(err.to_string(), "Choose only one of the options: --execute, --handle.");
    }

    #[test]
    fn test_only_existing_artifact_is_a_warning() {
        let exists =
            Error::ArtifactExistsError { kind: "Action".into(), path: "a.php".into() };
        assert!(exists.is_warning());
        assert!(!Error::ConfigError("broken".into()).is_warning());
    }
}
