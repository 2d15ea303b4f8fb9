//! `bindicate write-fstab` — Sync the managed section of the mount table.

use std::io::Write;
use std::path::PathBuf;

use bindicate_common::config::BindicateConfig;
use bindicate_common::constants::FSTAB_PATH;
use bindicate_core::fstab;
use clap::Args;

/// Arguments for the `write-fstab` command.
#[derive(Args, Debug)]
pub struct WriteFstabArgs {
    /// Mount table to rewrite.
    #[arg(long, default_value = FSTAB_PATH)]
    pub fstab: PathBuf,

    /// Print the synchronized table instead of writing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Executes the `write-fstab` command.
///
/// # Errors
///
/// Returns an error if the mount table cannot be read or written.
pub fn execute(args: &WriteFstabArgs, config: &BindicateConfig) -> anyhow::Result<()> {
    tracing::info!(path = %args.fstab.display(), dry_run = args.dry_run, "syncing fstab");

    if args.dry_run {
        let current = fstab::read_fstab(&args.fstab)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", fstab::sync_fstab(&current, config))?;
        return Ok(());
    }

    let _ = fstab::write_fstab(&args.fstab, config)?;
    Ok(())
}
