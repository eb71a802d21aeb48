//! Generator commands.
//! Each invocation is resolved in full (options, name, namespace, target path, placeholder
//! map and rendered content) before anything is written, so a failing invocation leaves
//! the project untouched.

pub mod bodies;

use crate::composer::ComposerManifest;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::kind::ArtifactKind;
use crate::name::{self, ResolvedName};
use crate::options::{EffectiveOptions, Flags, OptionResolver};
use crate::renderer::{unresolved_tokens, Placeholders, TemplateRenderer};
use crate::stubs;
use crate::writer::{ensure_absent, write_file};
use bodies::Context;
use cruet::Inflector;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// File name of the helper file copied by `helper --stub`.
pub const HELPERS_FILE_NAME: &str = "helpers.php";

/// One generator run: the kind, its raw arguments and the project it targets.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    pub kind: ArtifactKind,
    pub name: Option<String>,
    pub flags: Flags,
    pub config: &'a Config,
    pub project_root: &'a Path,
}

/// Pending `composer.json` update of a helper file.
#[derive(Debug, Clone)]
pub struct Registration {
    manifest: ComposerManifest,
    entry: String,
    changed: bool,
}

impl Registration {
    pub fn entry(&self) -> &str {
        &self.entry
    }
}

/// A fully resolved artifact, ready to be written.
#[derive(Debug, Clone)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    /// What was created, as shown to the user, e.g. `Action` or `Helper global`.
    pub description: String,
    pub path: PathBuf,
    pub content: String,
    pub registration: Option<Registration>,
}

impl GeneratedArtifact {
    /// Writes the artifact and saves the composer manifest when the artifact needs to be
    /// autoloaded.
    pub fn write(&self) -> Result<()> {
        write_file(&self.path, &self.content)?;
        if let Some(registration) = &self.registration {
            if registration.changed {
                debug!(
                    "Registering '{}' in {}",
                    registration.entry,
                    registration.manifest.path().display()
                );
                registration.manifest.save()?;
            }
        }
        Ok(())
    }
}

/// Path of a file relative to the project root, with `/` separators.
fn autoload_entry(project_root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(project_root).unwrap_or(path);
    relative.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/")
}

/// Shape of a helper invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HelperMode {
    Class,
    Global,
    Stub,
}

pub struct Generator<'r> {
    renderer: &'r dyn TemplateRenderer,
}

impl<'r> Generator<'r> {
    pub fn new(renderer: &'r dyn TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Resolves an invocation into an artifact without touching the filesystem.
    ///
    /// # Errors
    /// * `Error::ConflictingOptionsError`, `Error::UnsupportedValueError` for invalid options
    /// * `Error::InvalidNameError` for a missing or malformed name
    /// * `Error::ConfigurationMissingError` if the kind has no namespace or path
    /// * `Error::ArtifactExistsError` if the target file already exists
    /// * `Error::ComposerError` if a helper needs registering and `composer.json` is unusable
    pub fn prepare(&self, invocation: &Invocation) -> Result<GeneratedArtifact> {
        let kind = invocation.kind;
        let options = OptionResolver::new(kind)
            .resolve(&invocation.flags, invocation.config.default_options(kind))?;

        if kind == ArtifactKind::Helper {
            return match helper_mode(&options, invocation.name.as_deref())? {
                HelperMode::Class => self.render(invocation, &options),
                HelperMode::Global => prepare_global_helper(invocation),
                HelperMode::Stub => prepare_helper_stub(invocation),
            };
        }
        self.render(invocation, &options)
    }

    fn render(
        &self,
        invocation: &Invocation,
        options: &EffectiveOptions,
    ) -> Result<GeneratedArtifact> {
        let kind = invocation.kind;
        let config = invocation.config;
        let name = resolve_name(invocation)?;
        let namespace = name.namespace(config.namespace(kind)?);
        let path = config
            .path(kind, invocation.project_root)?
            .join(name.relative_file(name.class_name()));
        ensure_absent(&path, kind)?;

        let context = Context {
            name: &name,
            namespace: &namespace,
            options,
            support_namespace: &config.support_namespace,
        };
        let placeholders = bodies::placeholders(kind, &context)?;
        ensure_total(kind, &placeholders)?;

        let template = stubs::load_template(kind, config, invocation.project_root)?;
        let content = self.renderer.render(&template, &placeholders);
        let leftover = unresolved_tokens(&content, kind.rules().placeholders);
        if !leftover.is_empty() {
            warn!("Rendered {} still contains tokens: {}", kind.key(), leftover.join(", "));
        }

        Ok(GeneratedArtifact {
            kind,
            description: kind.word().to_string(),
            path,
            content,
            registration: None,
        })
    }
}

fn resolve_name(invocation: &Invocation) -> Result<ResolvedName> {
    name::resolve(invocation.name.as_deref().unwrap_or_default(), invocation.kind)
}

/// Fails if the map lacks a token of the kind.
fn ensure_total(kind: ArtifactKind, placeholders: &Placeholders) -> Result<()> {
    let missing: Vec<&str> = kind
        .rules()
        .placeholders
        .iter()
        .copied()
        .filter(|name| !placeholders.contains_key(*name))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "no value for the {} placeholders: {}",
            kind.key(),
            missing.join(", ")
        )))
    }
}

fn helper_mode(options: &EffectiveOptions, name: Option<&str>) -> Result<HelperMode> {
    let named = name.is_some_and(|name| !name.trim().is_empty());
    if options.flag("stub") {
        if named {
            return Err(Error::InvalidNameError {
                message: "The --stub option does not take a helper name.".to_string(),
            });
        }
        return Ok(HelperMode::Stub);
    }
    if !named {
        return Err(Error::InvalidNameError { message: "Helper name is required.".to_string() });
    }
    if options.flag("global") {
        Ok(HelperMode::Global)
    } else {
        Ok(HelperMode::Class)
    }
}

fn register(invocation: &Invocation, path: &Path) -> Result<Registration> {
    let mut manifest = ComposerManifest::load(invocation.project_root)?;
    let entry = autoload_entry(invocation.project_root, path);
    let changed = manifest.register(&entry)?;
    Ok(Registration { manifest, entry, changed })
}

fn prepare_global_helper(invocation: &Invocation) -> Result<GeneratedArtifact> {
    let kind = invocation.kind;
    let name = resolve_name(invocation)?;
    let file_stem = name.class_name().to_snake_case();
    let path = invocation
        .config
        .path(kind, invocation.project_root)?
        .join(name.relative_file(&file_stem));
    ensure_absent(&path, kind)?;

    let registration = register(invocation, &path)?;
    Ok(GeneratedArtifact {
        kind,
        description: "Helper global".to_string(),
        path,
        content: stubs::GLOBAL_HELPER.to_string(),
        registration: Some(registration),
    })
}

fn prepare_helper_stub(invocation: &Invocation) -> Result<GeneratedArtifact> {
    let kind = invocation.kind;
    let path = invocation.config.path(kind, invocation.project_root)?.join(HELPERS_FILE_NAME);
    ensure_absent(&path, kind)?;

    let registration = register(invocation, &path)?;
    Ok(GeneratedArtifact {
        kind,
        description: "Helper from package stub".to_string(),
        path,
        content: stubs::HELPERS_FILE.to_string(),
        registration: Some(registration),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValue;
    use crate::renderer::PlaceholderRenderer;
    use tempfile::TempDir;

    fn invocation<'a>(
        kind: ArtifactKind,
        name: Option<&str>,
        flags: &[&str],
        config: &'a Config,
        root: &'a Path,
    ) -> Invocation<'a> {
        Invocation {
            kind,
            name: name.map(str::to_string),
            flags: flags.iter().map(|f| (f.to_string(), OptionValue::Flag(true))).collect(),
            config,
            project_root: root,
        }
    }

    #[test]
    fn test_every_kind_renders_without_leftover_tokens() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::builtin().unwrap();
        let renderer = PlaceholderRenderer::new();
        let generator = Generator::new(&renderer);
        for kind in ArtifactKind::ALL {
            let artifact = generator
                .prepare(&invocation(kind, Some("Sample"), &[], &config, temp_dir.path()))
                .unwrap();
            assert!(!artifact.content.contains("{{"), "{kind}: {}", artifact.content);
        }
    }

    #[test]
    fn test_helper_modes() {
        let options = OptionResolver::new(ArtifactKind::Helper);
        let stub_flags: Flags = [("stub".to_string(), OptionValue::Flag(true))].into_iter().collect();
        let stub = options.resolve(&stub_flags, None).unwrap();
        assert_eq!(helper_mode(&stub, None).unwrap(), HelperMode::Stub);
        assert!(helper_mode(&stub, Some("Format")).is_err());

        let default = options.resolve(&Flags::new(), None).unwrap();
        assert_eq!(helper_mode(&default, Some("Format")).unwrap(), HelperMode::Class);
        assert!(matches!(
            helper_mode(&default, None),
            Err(Error::InvalidNameError { message }) if message == "Helper name is required."
        ));
    }

    #[test]
    fn test_autoload_entry_is_root_relative() {
        let root = Path::new("/project");
        assert_eq!(
            autoload_entry(root, &root.join("app/Helpers/format_helper.php")),
            "app/Helpers/format_helper.php"
        );
    }
}
