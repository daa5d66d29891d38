//! devplat CLI
//!
//! Resolves layered developer platform configuration, manages local
//! environments and walks the user through provisioning choices.

mod catalog;
mod cli;
mod commands;
mod console;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands, ConfigAction, EnvAction, PlatformAction, TemplatesAction};
use context::Context;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let Some(command) = cli.command else {
        // No command provided - show help hint
        println!("{} developer platform CLI", "devplat".green().bold());
        println!();
        println!("Run {} for available commands.", "devplat --help".cyan());
        return Ok(());
    };

    let cwd = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let ctx = Context::detect(cwd, cli.environment);
    tracing::debug!(cwd = %ctx.cwd().display(), project = ?ctx.layout().map(|l| l.root()), "Detected context");

    execute_command(&ctx, command)
}

fn init_tracing(verbose: bool) -> Result<()> {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    result.map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {}", e)))?;
    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
    Ok(())
}

fn execute_command(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Config { action } => match action {
            ConfigAction::Show { json, origins } => commands::run_config_show(ctx, json, origins),
            ConfigAction::Get { path } => commands::run_config_get(ctx, &path),
            ConfigAction::Set { path, value } => commands::run_config_set(ctx, &path, &value),
            ConfigAction::Unset { path } => commands::run_config_unset(ctx, &path),
        },
        Commands::Env { action } => match action {
            EnvAction::New { name } => commands::run_env_new(ctx, &name),
            EnvAction::Select { name } => commands::run_env_select(ctx, &name),
            EnvAction::List { catalog: None } => commands::run_env_list(ctx),
            EnvAction::List {
                catalog: Some(catalog),
            } => commands::run_env_list_remote(ctx, &catalog),
            EnvAction::Get { path } => commands::run_env_get(ctx, &path),
        },
        Commands::Platform { action } => match action {
            PlatformAction::Status => commands::run_platform_status(ctx),
        },
        Commands::Templates { action } => match action {
            TemplatesAction::List { catalog, json } => {
                commands::run_templates_list(ctx, &catalog, json)
            }
        },
        Commands::Provision { catalog, json } => commands::run_provision(ctx, &catalog, json),
    }
}
