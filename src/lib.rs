//! structura generates PHP boilerplate (actions, services, caches, DTOs, enums, helpers
//! and traits) from embedded templates.
//! It resolves names and options per artifact kind, substitutes placeholder tokens and
//! writes the result into the directories configured for the project.

/// Command-line interface module for the structura application
pub mod cli;

/// composer.json registration and autoloader refresh for helper files
pub mod composer;

/// Configuration handling for structura projects
/// Supports JSON and YAML formats (structura.json, structura.yml, structura.yaml)
pub mod config;

/// Error types and handling for the structura application
pub mod error;

/// Generator commands: resolves an invocation into a rendered artifact
pub mod generator;

/// Publishing of the default configuration file
pub mod install;

/// Artifact kinds and their option, exclusivity and placeholder rules
pub mod kind;

/// Name validation, suffixing and namespace derivation
pub mod name;

/// Option precedence and exclusivity validation
pub mod options;

/// Placeholder substitution
pub mod renderer;

/// Built-in templates and template overrides
pub mod stubs;

/// Write-once file persistence
pub mod writer;
