//! Write-once persistence of generated files.

use crate::error::{Error, Result};
use crate::kind::ArtifactKind;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Ensures the target file does not exist yet.
///
/// # Errors
/// * `Error::ArtifactExistsError` if something is already present at `target`
pub fn ensure_absent<P: AsRef<Path>>(target: P, kind: ArtifactKind) -> Result<()> {
    let target = target.as_ref();
    if target.exists() {
        return Err(Error::ArtifactExistsError {
            kind: kind.word().to_string(),
            path: target.display().to_string(),
        });
    }
    Ok(())
}

fn staging_path(target: &Path) -> PathBuf {
    let file_name = target.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    target.with_file_name(format!(".{file_name}.structura-tmp"))
}

/// Writes `content` to `target`, creating parent directories as needed.
///
/// The content is written to a sibling staging file first and moved into place, so a
/// partially written artifact is never visible at `target`.
pub fn write_file<P: AsRef<Path>>(target: P, content: &str) -> Result<()> {
    let target = target.as_ref();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    let staging = staging_path(target);
    debug!("Writing file: {}", target.display());
    let discard = |e: std::io::Error| {
        let _ = fs::remove_file(&staging);
        Error::IoError(e)
    };
    fs::write(&staging, content).map_err(discard)?;
    fs::rename(&staging, target).map_err(discard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("app/Actions/Users/SampleAction.php");

        write_file(&target, "<?php\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "<?php\n");
        assert!(!staging_path(&target).exists());
    }

    #[test]
    fn test_failed_write_leaves_no_target() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("SampleAction.php");
        // A directory in place of the staging file makes the write fail.
        fs::create_dir(staging_path(&target)).unwrap();

        assert!(matches!(write_file(&target, "<?php\n"), Err(Error::IoError(_))));
        assert!(!target.exists());
    }

    #[test]
    fn test_ensure_absent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("SampleAction.php");
        assert!(ensure_absent(&target, ArtifactKind::Action).is_ok());

        fs::write(&target, "").unwrap();
        assert!(matches!(
            ensure_absent(&target, ArtifactKind::Action),
            Err(Error::ArtifactExistsError { .. })
        ));
    }
}
