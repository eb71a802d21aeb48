//! Built-in templates and user overrides.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kind::ArtifactKind;
use log::debug;
use std::borrow::Cow;
use std::path::Path;

pub const ACTION: &str = include_str!("../stubs/action.stub");
pub const SERVICE: &str = include_str!("../stubs/service.stub");
pub const CACHE: &str = include_str!("../stubs/cache.stub");
pub const DTO: &str = include_str!("../stubs/dto.stub");
pub const ENUM: &str = include_str!("../stubs/enum.stub");
pub const HELPER: &str = include_str!("../stubs/helper.stub");
pub const TRAIT: &str = include_str!("../stubs/trait.stub");

/// Framework helper file copied by `helper --stub`.
pub const HELPERS_FILE: &str = include_str!("../stubs/helpers.stub");

/// Content of a new global helper file.
pub const GLOBAL_HELPER: &str = "<?php\n\n";

/// Returns the built-in template of a kind.
pub fn builtin(kind: ArtifactKind) -> &'static str {
    match kind {
        ArtifactKind::Action => ACTION,
        ArtifactKind::Service => SERVICE,
        ArtifactKind::Cache => CACHE,
        ArtifactKind::Dto => DTO,
        ArtifactKind::Enum => ENUM,
        ArtifactKind::Helper => HELPER,
        ArtifactKind::Trait => TRAIT,
    }
}

/// Loads the template of a kind, preferring `<root>/<stubs>/<kind>.stub` when the
/// configuration names a stubs directory and the file exists.
pub fn load_template(
    kind: ArtifactKind,
    config: &Config,
    project_root: &Path,
) -> Result<Cow<'static, str>> {
    if let Some(stubs_dir) = &config.stubs {
        let override_path = project_root.join(stubs_dir).join(format!("{}.stub", kind.key()));
        if override_path.is_file() {
            debug!("Using template override {}", override_path.display());
            let content = std::fs::read_to_string(&override_path).map_err(Error::IoError)?;
            return Ok(Cow::Owned(content));
        }
        debug!("No override at {}, using the built-in template", override_path.display());
    }
    Ok(Cow::Borrowed(builtin(kind)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::token;

    #[test]
    fn test_builtin_templates_use_every_placeholder_of_their_kind() {
        for kind in ArtifactKind::ALL {
            let template = builtin(kind);
            for name in kind.rules().placeholders {
                assert!(template.contains(&token(name)), "{kind} template lacks {name}");
            }
        }
    }
}
