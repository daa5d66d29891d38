//! Platform status

use colored::Colorize;
use devplat_config::PlatformField;
use devplat_core::DevCenterPlatform;

use crate::context::Context;
use crate::error::Result;

/// Report whether the devcenter platform is enabled and what it still lacks
pub fn run_platform_status(ctx: &Context) -> Result<()> {
    let resolver = ctx.resolver();
    let platform = DevCenterPlatform::new(resolver.clone());

    if !platform.is_enabled() {
        println!(
            "{} Platform {} is {}.",
            "=>".blue().bold(),
            platform.name().cyan(),
            "disabled".yellow()
        );
        return Ok(());
    }

    println!(
        "{} Platform {} is {}.",
        "=>".blue().bold(),
        platform.name().cyan(),
        "enabled".green()
    );

    let config = resolver.resolve()?;
    let missing: Vec<_> = config
        .missing()
        .into_iter()
        .filter(|f| *f != PlatformField::User)
        .map(|f| f.key())
        .collect();
    if missing.is_empty() {
        println!("   {} All platform settings are configured.", "+".green());
    } else {
        println!(
            "   {} Will prompt for: {}",
            "-".yellow(),
            missing.join(", ")
        );
    }
    Ok(())
}
