//! Name resolution for generated classes.
//! Turns a raw identifier such as `users/profile` into a validated, suffixed,
//! capitalized name (`Users/ProfileAction`) and derives namespaces and file paths from it.

use crate::error::{Error, Result};
use crate::kind::{ArtifactKind, SuffixRule};
use log::debug;
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+(?:[/\\][a-zA-Z]+)*$").expect("valid name pattern"));

/// Separator used by the generated sources' namespaces.
pub const NAMESPACE_SEPARATOR: &str = "\\";

/// Validated name of a generated class.
///
/// The last segment is the class name, the others are directories. Every segment is
/// non-empty, alphabetic and capitalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    segments: Vec<String>,
}

impl ResolvedName {
    pub fn class_name(&self) -> &str {
        // `resolve` never produces an empty segment list.
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    pub fn directories(&self) -> &[String] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }

    /// Canonical `/`-joined form, e.g. `Users/ProfileAction`.
    pub fn as_path(&self) -> String {
        self.segments.join("/")
    }

    /// Root namespace followed by the directory segments.
    pub fn namespace(&self, root: &str) -> String {
        let directories = self.directories();
        if directories.is_empty() {
            root.to_string()
        } else {
            format!("{root}{NAMESPACE_SEPARATOR}{}", directories.join(NAMESPACE_SEPARATOR))
        }
    }

    /// Path of the source file relative to the kind's directory.
    pub fn relative_file(&self, file_stem: &str) -> PathBuf {
        let mut path: PathBuf = self.directories().iter().collect();
        path.push(format!("{file_stem}.php"));
        path
    }
}

impl std::fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Checks that the raw identifier only contains letters and namespace separators.
pub fn validate_name(raw: &str) -> Result<()> {
    if !NAME_PATTERN.is_match(raw) {
        return Err(Error::InvalidNameError {
            message: "Invalid name. Only alphabetic characters and namespace separators ('/' or '\\') are allowed.".to_string(),
        });
    }
    Ok(())
}

fn apply_suffix(candidate: String, kind: ArtifactKind) -> Result<String> {
    let lowered = candidate.to_lowercase();
    match kind.suffix_rule() {
        SuffixRule::Append(word) => {
            let word_lowered = word.to_lowercase();
            if !lowered.ends_with(&word_lowered) {
                Ok(format!("{candidate}{word}"))
            } else if kind == ArtifactKind::Dto {
                // `SampleDto` -> `SampleDTO`. Other kinds keep the name as typed.
                let stem = &candidate[..candidate.len() - word.len()];
                Ok(format!("{stem}{word}"))
            } else {
                Ok(candidate)
            }
        }
        SuffixRule::Strip(word) => {
            let stem = if lowered.ends_with(&word.to_lowercase()) {
                candidate[..candidate.len() - word.len()].to_string()
            } else {
                candidate
            };
            if stem.is_empty() {
                return Err(Error::InvalidNameError {
                    message: format!("{kind} name cannot be just '{word}'."),
                });
            }
            Ok(stem)
        }
    }
}

/// Resolves a raw identifier into the class name of the given kind.
///
/// # Errors
/// * `Error::InvalidNameError` if the trimmed input is empty or contains anything other
///   than letters separated by `/` or `\`.
pub fn resolve(raw: &str, kind: ArtifactKind) -> Result<ResolvedName> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidNameError { message: format!("{kind} name cannot be empty.") });
    }
    validate_name(raw)?;

    let mut segments: Vec<String> = raw.split(['/', '\\']).map(capitalize).collect();
    let candidate = segments.pop().unwrap_or_default();
    segments.push(apply_suffix(candidate, kind)?);

    let resolved = ResolvedName { segments };
    debug!("Resolved {} name '{}' to '{}'.", kind.key(), raw, resolved);
    Ok(resolved)
}
