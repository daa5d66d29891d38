//! Template listing

use colored::Colorize;
use devplat_core::TemplateSource;
use std::path::Path;

use super::{platform_registry, run_cancellable};
use crate::context::Context;
use crate::error::Result;

/// List templates of the default template source
pub fn run_templates_list(ctx: &Context, catalog: &Path, json: bool) -> Result<()> {
    let registry = platform_registry(ctx, catalog)?;
    let source = registry.resolve_default::<dyn TemplateSource>()?;

    let templates = run_cancellable(|cancel| async move { source.list_templates(&cancel).await })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    if templates.is_empty() {
        println!("{} No templates found.", "=>".blue().bold());
        return Ok(());
    }

    println!("{} Templates:", "=>".blue().bold());
    for template in &templates {
        match template.description {
            Some(ref description) => {
                println!("  {} {}", template.id.cyan(), description.dimmed())
            }
            None => println!("  {}", template.id.cyan()),
        }
    }
    Ok(())
}
