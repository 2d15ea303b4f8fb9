//! `bindicate setup-bindmounts` — Bind mount every configured path into the prefix.

use bindicate_common::config::BindicateConfig;
use bindicate_core::provision;
use clap::Args;

/// Arguments for the `setup-bindmounts` command.
#[derive(Args, Debug)]
pub struct SetupBindmountsArgs {}

/// Executes the `setup-bindmounts` command.
///
/// # Errors
///
/// Returns every per-path failure as a single aggregate error.
pub fn execute(_args: &SetupBindmountsArgs, config: &BindicateConfig) -> anyhow::Result<()> {
    tracing::info!(
        prefix = %config.prefix,
        paths = config.paths.len(),
        "setting up bind mounts"
    );
    provision::provision_host(config)?;
    Ok(())
}
