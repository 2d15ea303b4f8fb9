//! # bindicate — Bindicate CLI
//!
//! Keeps a fixed set of system files backed by copies under a protected
//! prefix: bind mounts them into place and records the mounts in
//! `/etc/fstab`.

mod commands;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
