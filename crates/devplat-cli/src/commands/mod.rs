//! Command implementations for devplat-cli

pub mod config;
pub mod env;
pub mod platform;
pub mod provision;
pub mod templates;

pub use config::{run_config_get, run_config_set, run_config_show, run_config_unset};
pub use env::{run_env_get, run_env_list, run_env_list_remote, run_env_new, run_env_select};
pub use platform::run_platform_status;
pub use provision::run_provision;
pub use templates::run_templates_list;

use crate::catalog::FileDevCenterClient;
use crate::console::DialoguerConsole;
use crate::context::Context;
use crate::error::{CliError, Result};
use colored::Colorize;
use devplat_core::{Cancellation, CapabilityRegistry, DevCenterPlatform};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

/// Build a registry with the devcenter platform wired to `catalog`.
///
/// Fails when the platform is not enabled for this project or user.
pub(crate) fn platform_registry(ctx: &Context, catalog: &Path) -> Result<CapabilityRegistry> {
    let platform = DevCenterPlatform::new(ctx.resolver());
    if !platform.is_enabled() {
        return Err(CliError::user(
            "The devcenter platform is not enabled. Set 'platform.type: devcenter' in devplat.yaml \
             or run 'devplat config set platform.type devcenter'.",
        ));
    }

    let client = Arc::new(FileDevCenterClient::load(catalog)?);
    let registry = CapabilityRegistry::new();
    platform.configure(&registry, Arc::new(DialoguerConsole::new()), client)?;
    Ok(registry)
}

/// Drive an async operation to completion, cancelling it on Ctrl-C.
///
/// The first Ctrl-C fires the shared token; a second one exits immediately.
pub(crate) fn run_cancellable<F, Fut, T>(operation: F) -> Result<T>
where
    F: FnOnce(Cancellation) -> Fut,
    Fut: Future<Output = devplat_core::Result<T>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let cancel = Cancellation::new();
    let watcher = cancel.clone();
    runtime.spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if !watcher.cancel() {
                std::process::exit(130);
            }
            eprintln!(
                "{} Cancelling, press Ctrl-C again to exit.",
                "warning:".yellow().bold()
            );
        }
    });

    Ok(runtime.block_on(operation(cancel))?)
}
