//! Provisioning plan

use colored::Colorize;
use devplat_core::{Environment, ProvisionProvider};
use std::path::Path;

use super::{platform_registry, run_cancellable};
use crate::context::Context;
use crate::error::{CliError, Result};

/// Complete the selected environment's settings and print its plan
pub fn run_provision(ctx: &Context, catalog: &Path, json: bool) -> Result<()> {
    let layout = ctx.require_layout()?;
    let name = ctx.require_environment()?;
    if !layout.environment_names()?.iter().any(|n| *n == name) {
        return Err(CliError::user(format!(
            "Environment '{}' does not exist. Run 'devplat env new {}' first.",
            name, name
        )));
    }

    let registry = platform_registry(ctx, catalog)?;
    let provider = registry.resolve_default::<dyn ProvisionProvider>()?;
    let mut env = Environment::load(layout, &name)?;

    tracing::debug!(environment = %name, provider = provider.name(), "Planning provisioning");
    let plan = run_cancellable(|cancel| async move { provider.plan(&mut env, &cancel).await })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "{} Provisioning plan for {}:",
        "=>".blue().bold(),
        plan.environment.cyan()
    );
    for (label, value) in [
        ("Dev center", &plan.platform.name),
        ("Project", &plan.platform.project),
        ("Catalog", &plan.platform.catalog),
        ("Environment type", &plan.platform.environment_type),
    ] {
        let label = format!("{}:", label);
        println!("  {:<20} {}", label.dimmed(), value.as_deref().unwrap_or("-"));
    }
    let label = "Definition:";
    println!("  {:<20} {}", label.dimmed(), plan.definition.name);

    if !plan.parameters.is_empty() {
        println!("  {}:", "Parameters".dimmed());
        for (id, value) in &plan.parameters {
            println!("    {} {} = {}", "+".green(), id, value);
        }
    }
    Ok(())
}
