//! Configuration display and user config editing

use colored::Colorize;
use devplat_config::{ConfigValue, PlatformField};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Display the effective platform configuration
pub fn run_config_show(ctx: &Context, json: bool, origins: bool) -> Result<()> {
    let merged = ctx.resolver().resolve_with_origins()?;

    if json {
        let output = if origins {
            serde_json::to_string_pretty(&merged)?
        } else {
            serde_json::to_string_pretty(&merged.config)?
        };
        println!("{}", output);
        return Ok(());
    }

    println!("{}", "Platform Configuration".bold());
    println!();

    for field in PlatformField::ALL {
        let label = format!("{}:", field.key());
        match merged.config.get(field) {
            Some(value) if origins => {
                let layer = merged
                    .origin(field)
                    .map(|l| format!("({})", l))
                    .unwrap_or_default();
                println!("  {:<24} {} {}", label.dimmed(), value, layer.dimmed());
            }
            Some(value) => println!("  {:<24} {}", label.dimmed(), value),
            None => println!("  {:<24} {}", label.dimmed(), "(not set)".dimmed()),
        }
    }

    Ok(())
}

/// Print one value from the user config
pub fn run_config_get(ctx: &Context, path: &str) -> Result<()> {
    let tree = ctx.resolver().load_user_config()?;
    let value = tree
        .get(path)
        .ok_or_else(|| CliError::user(format!("'{}' is not set in the user config", path)))?;
    println!("{}", value);
    Ok(())
}

/// Store one value in the user config
pub fn run_config_set(ctx: &Context, path: &str, raw: &str) -> Result<()> {
    let resolver = ctx.resolver();
    let mut tree = resolver.load_user_config()?;
    let value = ConfigValue::parse_literal(raw);
    tree.set(path, value.clone())?;
    resolver.save_user_config(&tree)?;

    tracing::debug!(path, kind = value.kind(), "Updated user config");
    println!("{} Set {} = {}", "OK".green().bold(), path.cyan(), value);
    Ok(())
}

/// Remove one value from the user config
pub fn run_config_unset(ctx: &Context, path: &str) -> Result<()> {
    let resolver = ctx.resolver();
    let mut tree = resolver.load_user_config()?;

    if tree.unset(path).is_none() {
        println!("{} {} is not set.", "OK".green().bold(), path.cyan());
        return Ok(());
    }

    resolver.save_user_config(&tree)?;
    println!("{} Unset {}", "OK".green().bold(), path.cyan());
    Ok(())
}
