//! structura's main application entry point and orchestration logic.
//! Handles command-line argument parsing, configuration loading and dispatches each
//! subcommand to the generator or the installer.

use std::path::Path;

use structura::{
    cli::{get_args, Args, Command, GenerateRequest},
    composer::{dump_autoload, AutoloadOutcome},
    config::get_config,
    error::{default_error_handler, Result},
    generator::{Generator, Invocation},
    install::{publish_config, InstallOutcome},
    renderer::PlaceholderRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Whether the project runs in production, where `composer dump-autoload` is skipped.
fn is_production() -> bool {
    std::env::var("APP_ENV").is_ok_and(|env| env.eq_ignore_ascii_case("production"))
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the project configuration (or the built-in one)
/// 2. Resolves the invocation into an artifact, failing before any write
/// 3. Writes the artifact and registers helpers in composer.json
/// 4. Refreshes the Composer autoloader when a helper was registered
fn run(args: Args) -> Result<()> {
    if let Command::Install(install) = &args.command {
        return install_config(&args.root, install.force);
    }
    match args.command.generate_request() {
        Some(request) => generate(&args.root, request),
        None => Ok(()),
    }
}

fn generate(project_root: &Path, request: GenerateRequest) -> Result<()> {
    let config = get_config(project_root)?;
    let renderer = PlaceholderRenderer::new();
    let generator = Generator::new(&renderer);

    println!("🚀 Creating new {}...", request.kind.key());
    let invocation = Invocation {
        kind: request.kind,
        name: request.name,
        flags: request.flags,
        config: &config,
        project_root,
    };
    let artifact = generator.prepare(&invocation)?;
    artifact.write()?;

    println!("\n✨ {} created successfully!", artifact.description);
    println!("📝 [{}]\n", artifact.path.display());

    if artifact.registration.is_some() {
        match dump_autoload(project_root, is_production()) {
            AutoloadOutcome::Skipped => println!("ℹ️ Run \"composer dump-autoload\" if needed."),
            AutoloadOutcome::Completed => log::debug!("composer dump-autoload completed"),
            AutoloadOutcome::Failed(reason) => {
                eprintln!("⚠️  {reason}. Run \"composer dump-autoload\" manually.")
            }
        }
    }
    Ok(())
}

fn install_config(project_root: &Path, force: bool) -> Result<()> {
    match publish_config(project_root, force)? {
        InstallOutcome::Published(path) => {
            println!("\n✨ Configuration published successfully!");
            println!("📝 [{}]\n", path.display());
        }
        InstallOutcome::Overwritten(path) => {
            println!("\n✨ Configuration overwritten successfully!");
            println!("📝 [{}]\n", path.display());
        }
        InstallOutcome::AlreadyExists(path) => {
            println!(
                "\n⚠️  Configuration already exists: '{}'. Use --force to overwrite it.\n",
                path.display()
            );
        }
    }
    Ok(())
}
