//! Publishing of the default configuration file.

use crate::config::{CONFIG_DIR, DEFAULT_CONFIG};
use crate::error::Result;
use crate::writer::write_file;
use log::debug;
use std::path::{Path, PathBuf};

/// File written by `structura install`.
pub const PUBLISHED_CONFIG: &str = "structura.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Published(PathBuf),
    Overwritten(PathBuf),
    /// The file exists and `--force` was not given. Nothing was written.
    AlreadyExists(PathBuf),
}

/// Path of the published configuration file inside a project.
pub fn config_path<P: AsRef<Path>>(project_root: P) -> PathBuf {
    project_root.as_ref().join(CONFIG_DIR).join(PUBLISHED_CONFIG)
}

/// Writes the default configuration to `config/structura.yaml`.
pub fn publish_config<P: AsRef<Path>>(project_root: P, force: bool) -> Result<InstallOutcome> {
    let target = config_path(project_root);
    let exists = target.exists();
    if exists && !force {
        debug!("{} exists, use --force to overwrite it", target.display());
        return Ok(InstallOutcome::AlreadyExists(target));
    }
    write_file(&target, DEFAULT_CONFIG)?;
    Ok(if exists { InstallOutcome::Overwritten(target) } else { InstallOutcome::Published(target) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_publish_then_keep_then_force() {
        let temp_dir = TempDir::new().unwrap();
        let target = config_path(temp_dir.path());

        assert_eq!(
            publish_config(temp_dir.path(), false).unwrap(),
            InstallOutcome::Published(target.clone())
        );
        std::fs::write(&target, "paths: {}\n").unwrap();

        assert_eq!(
            publish_config(temp_dir.path(), false).unwrap(),
            InstallOutcome::AlreadyExists(target.clone())
        );
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "paths: {}\n");

        assert_eq!(
            publish_config(temp_dir.path(), true).unwrap(),
            InstallOutcome::Overwritten(target.clone())
        );
        assert_eq!(std::fs::read_to_string(&target).unwrap(), DEFAULT_CONFIG);
    }
}
