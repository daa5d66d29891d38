//! Local environment management

use colored::Colorize;
use devplat_core::{Environment, EnvironmentConfig, RemoteEnvironmentStore};
use std::path::Path;

use super::{platform_registry, run_cancellable};
use crate::context::Context;
use crate::error::{CliError, Result};

/// Create an environment; the first one becomes the project default
pub fn run_env_new(ctx: &Context, name: &str) -> Result<()> {
    let layout = ctx.layout_or_cwd();
    Environment::create(&layout, name)?;

    println!("{} Environment {} created.", "OK".green().bold(), name.cyan());

    if layout.default_environment()?.is_none() {
        layout.set_default_environment(name)?;
        println!("   {} {} is now the default environment.", "+".green(), name.cyan());
    }
    Ok(())
}

/// Make an existing environment the project default
pub fn run_env_select(ctx: &Context, name: &str) -> Result<()> {
    let layout = ctx.require_layout()?;
    if !layout.environment_names()?.iter().any(|n| n == name) {
        return Err(CliError::user(format!(
            "Environment '{}' does not exist. Run 'devplat env new {}' first.",
            name, name
        )));
    }

    layout.set_default_environment(name)?;
    println!("{} Default environment is now {}.", "OK".green().bold(), name.cyan());
    Ok(())
}

/// List local environments, marking the default
pub fn run_env_list(ctx: &Context) -> Result<()> {
    let Some(layout) = ctx.layout() else {
        println!("{} No environments found.", "=>".blue().bold());
        return Ok(());
    };

    let names = layout.environment_names()?;
    if names.is_empty() {
        println!("{} No environments found.", "=>".blue().bold());
        return Ok(());
    }

    let default = layout.default_environment()?;
    println!("{} Environments:", "=>".blue().bold());
    for name in names {
        if default.as_deref() == Some(name.as_str()) {
            println!("  {} {} {}", "*".green(), name.green().bold(), "(default)".dimmed());
        } else {
            println!("    {}", name);
        }
    }
    Ok(())
}

/// List environments deployed in the configured dev center project
pub fn run_env_list_remote(ctx: &Context, catalog: &Path) -> Result<()> {
    let registry = platform_registry(ctx, catalog)?;
    let store = registry.resolve_default::<dyn RemoteEnvironmentStore>()?;

    let environments = run_cancellable(|cancel| async move { store.list(&cancel).await })?;
    if environments.is_empty() {
        println!("{} No remote environments found.", "=>".blue().bold());
        return Ok(());
    }

    println!("{} Remote environments:", "=>".blue().bold());
    for env in &environments {
        let owner = env
            .user
            .as_deref()
            .map(|u| format!("({})", u))
            .unwrap_or_default();
        println!(
            "  {} {} {}",
            env.name.cyan(),
            env.environment_type,
            owner.dimmed()
        );
    }
    Ok(())
}

/// Print one value from the selected environment
pub fn run_env_get(ctx: &Context, path: &str) -> Result<()> {
    let layout = ctx.require_layout()?;
    let name = ctx.require_environment()?;
    let env = Environment::load(layout, &name)?;

    let value = env.get(path).ok_or_else(|| {
        CliError::user(format!("'{}' is not set in environment '{}'", path, name))
    })?;
    println!("{}", value);
    Ok(())
}
