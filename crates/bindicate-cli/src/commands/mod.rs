//! CLI command definitions and dispatch.

pub mod setup_bindmounts;
pub mod write_fstab;

use std::path::{Path, PathBuf};

use bindicate_common::config::BindicateConfig;
use bindicate_common::constants::{APP_NAME, DEFAULT_CONFIG_PATH};
use clap::{Parser, Subcommand};

/// Bindicate — Setup bind mounts from / into a prefix.
#[derive(Parser, Debug)]
#[command(name = APP_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(value_name = "CONF_FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub conf_file: PathBuf,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Overwrite the current /etc/fstab, appending the bind mounts.
    WriteFstab(write_fstab::WriteFstabArgs),
    /// Sets up the bind mounts into the prefix.
    SetupBindmounts(setup_bindmounts::SetupBindmountsArgs),
}

/// An explicitly empty path falls back to the default location.
fn config_path(conf_file: &Path) -> &Path {
    if conf_file.as_os_str().is_empty() {
        Path::new(DEFAULT_CONFIG_PATH)
    } else {
        conf_file
    }
}

/// Loads the configuration, then dispatches the parsed command to its
/// handler.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command
/// fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = BindicateConfig::load(config_path(&cli.conf_file))?;

    match cli.command {
        Command::WriteFstab(args) => write_fstab::execute(&args, &config),
        Command::SetupBindmounts(args) => setup_bindmounts::execute(&args, &config),
    }
}
