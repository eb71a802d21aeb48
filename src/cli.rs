//! Command-line interface implementation for structura.
//! Provides argument parsing and help text formatting using clap.

use crate::kind::ArtifactKind;
use crate::options::{Flags, OptionValue};
use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for structura.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "structura: boilerplate generator for PHP projects",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root holding config/, composer.json and the generated sources
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new action class
    Action(ActionArgs),
    /// Create a new service class
    Service(ServiceArgs),
    /// Create a new cache class
    Cache(CacheArgs),
    /// Create a new DTO class
    Dto(DtoArgs),
    /// Create a new enum
    Enum(EnumArgs),
    /// Create a new helper class, global helper file or the package helper file
    Helper(HelperArgs),
    /// Create a new trait
    Trait(TraitArgs),
    /// Publish the configuration file to config/structura.yaml
    Install(InstallArgs),
}

/// Adds the flags that were passed, leaving absent ones out so that configured defaults
/// can apply.
fn collect_flags(pairs: &[(&str, bool)]) -> Flags {
    pairs
        .iter()
        .filter(|(_, passed)| *passed)
        .map(|(name, _)| (name.to_string(), OptionValue::Flag(true)))
        .collect()
}

#[derive(ClapArgs, Debug)]
pub struct ActionArgs {
    /// Action name
    pub name: String,
    /// Create an action with a __construct method
    #[arg(short, long)]
    pub construct: bool,
    /// Create an action with an execute method (default)
    #[arg(short, long)]
    pub execute: bool,
    /// Create an action with a handle method
    #[arg(short = 'l', long)]
    pub handle: bool,
    /// Create an action with an __invoke method
    #[arg(short, long)]
    pub invokable: bool,
    /// Create an action without methods
    #[arg(short, long)]
    pub raw: bool,
}

impl ActionArgs {
    pub fn flags(&self) -> Flags {
        collect_flags(&[
            ("construct", self.construct),
            ("execute", self.execute),
            ("handle", self.handle),
            ("invokable", self.invokable),
            ("raw", self.raw),
        ])
    }
}

#[derive(ClapArgs, Debug)]
pub struct ServiceArgs {
    /// Service name
    pub name: String,
    /// Create a service with a __construct method (default)
    #[arg(short, long)]
    pub construct: bool,
    /// Create a service without methods
    #[arg(short, long)]
    pub raw: bool,
}

impl ServiceArgs {
    pub fn flags(&self) -> Flags {
        collect_flags(&[("construct", self.construct), ("raw", self.raw)])
    }
}

#[derive(ClapArgs, Debug)]
pub struct CacheArgs {
    /// Cache name
    pub name: String,
    /// Extend the CacheSupport base class (default)
    #[arg(short, long)]
    pub extend: bool,
    /// Create a cache without base class or prefix
    #[arg(short, long)]
    pub raw: bool,
}

impl CacheArgs {
    pub fn flags(&self) -> Flags {
        collect_flags(&[("extend", self.extend), ("raw", self.raw)])
    }
}

#[derive(ClapArgs, Debug)]
pub struct DtoArgs {
    /// DTO name
    pub name: String,
    /// Do not declare the class final
    #[arg(long)]
    pub no_final: bool,
    /// Do not declare the class readonly
    #[arg(long)]
    pub no_readonly: bool,
    /// Do not add a constructor
    #[arg(long)]
    pub no_construct: bool,
    /// Attach the InteractsWithDTO trait
    #[arg(short = 't', long = "trait")]
    pub with_trait: bool,
    /// Create a plain class, cannot be combined with other options
    #[arg(short, long)]
    pub raw: bool,
}

impl DtoArgs {
    pub fn flags(&self) -> Flags {
        collect_flags(&[
            ("no-final", self.no_final),
            ("no-readonly", self.no_readonly),
            ("no-construct", self.no_construct),
            ("trait", self.with_trait),
            ("raw", self.raw),
        ])
    }
}

#[derive(ClapArgs, Debug)]
pub struct EnumArgs {
    /// Enum name
    pub name: String,
    /// Create a backed enum (string|int). A configured `enum.backed` default cannot be
    /// turned off from the command line, set it to null to create pure enums
    #[arg(long, value_name = "TYPE")]
    pub backed: Option<String>,
    /// Enum cases (comma separated)
    #[arg(long, value_name = "LIST")]
    pub cases: Option<String>,
    /// Add a label() method
    #[arg(short, long)]
    pub label: bool,
    /// Attach the InteractsWithEnum trait
    #[arg(short = 't', long = "trait")]
    pub with_trait: bool,
}

impl EnumArgs {
    pub fn flags(&self) -> Flags {
        let mut flags = collect_flags(&[("label", self.label), ("trait", self.with_trait)]);
        if let Some(backed) = &self.backed {
            flags.insert("backed".to_string(), OptionValue::Text(backed.clone()));
        }
        if let Some(cases) = &self.cases {
            flags.insert("cases".to_string(), OptionValue::Text(cases.clone()));
        }
        flags
    }
}

#[derive(ClapArgs, Debug)]
pub struct HelperArgs {
    /// Helper name, omitted with --stub
    pub name: Option<String>,
    /// Add an example method to the helper (default)
    #[arg(short, long)]
    pub example: bool,
    /// Create a global helper file registered in composer.json
    #[arg(short, long)]
    pub global: bool,
    /// Create the package helper file registered in composer.json
    #[arg(short, long)]
    pub stub: bool,
    /// Create a helper class without methods
    #[arg(short, long)]
    pub raw: bool,
}

impl HelperArgs {
    pub fn flags(&self) -> Flags {
        collect_flags(&[
            ("example", self.example),
            ("global", self.global),
            ("stub", self.stub),
            ("raw", self.raw),
        ])
    }
}

#[derive(ClapArgs, Debug)]
pub struct TraitArgs {
    /// Trait name
    pub name: String,
}

#[derive(ClapArgs, Debug)]
pub struct InstallArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

/// A generator subcommand reduced to its kind, raw name and explicit flags.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub kind: ArtifactKind,
    pub name: Option<String>,
    pub flags: Flags,
}

impl Command {
    /// The generator request of this subcommand, `None` for `install`.
    pub fn generate_request(&self) -> Option<GenerateRequest> {
        let (kind, name, flags) = match self {
            Command::Action(args) => (ArtifactKind::Action, Some(args.name.clone()), args.flags()),
            Command::Service(args) => {
                (ArtifactKind::Service, Some(args.name.clone()), args.flags())
            }
            Command::Cache(args) => (ArtifactKind::Cache, Some(args.name.clone()), args.flags()),
            Command::Dto(args) => (ArtifactKind::Dto, Some(args.name.clone()), args.flags()),
            Command::Enum(args) => (ArtifactKind::Enum, Some(args.name.clone()), args.flags()),
            Command::Helper(args) => (ArtifactKind::Helper, args.name.clone(), args.flags()),
            Command::Trait(args) => (ArtifactKind::Trait, Some(args.name.clone()), Flags::new()),
            Command::Install(_) => return None,
        };
        Some(GenerateRequest { kind, name, flags })
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
