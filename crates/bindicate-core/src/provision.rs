//! Bind mount provisioning.
//!
//! For every configured path the provisioner makes sure a backing copy
//! exists under the prefix, refreshes it from the source, and bind mounts
//! the source onto it. Paths are handled one at a time and independently:
//! a failure on one path is recorded and the next path is still attempted.

use std::os::unix::fs::DirBuilderExt;
use std::path::Path;

use bindicate_common::config::BindicateConfig;
use bindicate_common::constants::DEFAULT_DIR_MODE;
use bindicate_common::error::{BindicateError, ProvisionErrors};

use crate::filesystem::{copy, mount};

/// Host operations the provisioner depends on.
pub trait MountPrimitives {
    /// Copies `source` onto `dest`, preserving content and permission bits.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the destination
    /// cannot be written.
    fn copy_file(&self, source: &Path, dest: &Path) -> std::io::Result<()>;

    /// Bind mounts `source` on `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mount fails.
    fn bind_mount(&self, source: &Path, target: &Path) -> std::io::Result<()>;
}

/// [`MountPrimitives`] backed by the real filesystem and `mount(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPrimitives;

impl MountPrimitives for HostPrimitives {
    fn copy_file(&self, source: &Path, dest: &Path) -> std::io::Result<()> {
        copy::copy_preserving_permissions(source, dest)
    }

    fn bind_mount(&self, source: &Path, target: &Path) -> std::io::Result<()> {
        mount::bind_mount(source, target)
    }
}

/// Provisions every configured path using the host primitives.
///
/// # Errors
///
/// Returns every per-path failure, in path order.
pub fn provision_host(config: &BindicateConfig) -> Result<(), ProvisionErrors> {
    provision(config, &HostPrimitives)
}

/// Sets up the backing copy and bind mount of every configured path.
///
/// Each path goes through the same steps:
/// 1. if `prefix/path` does not exist, create its parent directories;
/// 2. copy the source onto it, content and mode (always, so an existing
///    copy is refreshed);
/// 3. bind mount the source onto it, unless the copy failed.
///
/// Nothing is rolled back when a later path fails.
///
/// # Errors
///
/// Returns a [`ProvisionErrors`] holding one error per failed path, in path
/// order, if any path failed.
pub fn provision<P: MountPrimitives + ?Sized>(
    config: &BindicateConfig,
    primitives: &P,
) -> Result<(), ProvisionErrors> {
    let mut errors = Vec::new();

    for path in &config.paths {
        if let Err(err) = provision_path(config, path, primitives) {
            tracing::warn!(path = %path, error = %err, "provisioning failed");
            errors.push(err);
        }
    }

    match ProvisionErrors::from_errors(errors) {
        Some(errors) => Err(errors),
        None => {
            tracing::info!(paths = config.paths.len(), "bind mounts set up");
            Ok(())
        }
    }
}

fn provision_path<P: MountPrimitives + ?Sized>(
    config: &BindicateConfig,
    path: &str,
    primitives: &P,
) -> Result<(), BindicateError> {
    let dest = config.destination(path);
    let source = Path::new(path);
    let target = Path::new(&dest);

    if matches!(std::fs::metadata(target), Err(e) if e.kind() == std::io::ErrorKind::NotFound) {
        create_parent_dirs(source, target);
    }

    primitives
        .copy_file(source, target)
        .map_err(|e| BindicateError::PathCopy {
            path: path.to_string(),
            dest: dest.clone(),
            source: e,
        })?;

    primitives
        .bind_mount(source, target)
        .map_err(|e| BindicateError::PathMount {
            path: path.to_string(),
            dest: dest.clone(),
            source: e,
        })?;

    tracing::info!(path = %path, dest = %dest, "bind mounted");
    Ok(())
}

/// Mode for directories created above a missing backing copy.
///
/// NOTE: the branches look inverted. A readable source parent yields the
/// fixed default and an unreadable one yields an unset (zero) mode; the
/// source parent's own mode is never used. Kept as observed in deployed
/// prefixes until the intended policy is settled.
fn parent_dir_mode(source: &Path) -> u32 {
    let source_dir = source.parent().unwrap_or(source);
    match std::fs::metadata(source_dir) {
        Ok(_) => DEFAULT_DIR_MODE,
        Err(_) => 0,
    }
}

/// Creates every missing parent of `target`.
///
/// Failures are only logged; the copy that follows reports the error for
/// this path.
fn create_parent_dirs(source: &Path, target: &Path) {
    let Some(parent) = target.parent() else {
        return;
    };
    let mode = parent_dir_mode(source);
    tracing::debug!(
        dir = %parent.display(),
        mode = format_args!("{mode:o}"),
        "creating prefix directories"
    );

    if let Err(e) = std::fs::DirBuilder::new()
        .recursive(true)
        .mode(mode)
        .create(parent)
    {
        tracing::warn!(dir = %parent.display(), error = %e, "failed to create prefix directories");
    }
}
