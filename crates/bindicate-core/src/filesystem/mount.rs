//! Bind mount primitive.

use std::path::Path;

/// Bind mounts `source` on `target`.
///
/// Issues `mount(2)` with `MS_BIND` and no filesystem type or data.
///
/// # Errors
///
/// Returns the `mount(2)` errno as an I/O error.
#[cfg(target_os = "linux")]
pub fn bind_mount(source: &Path, target: &Path) -> std::io::Result<()> {
    use nix::mount::{MsFlags, mount};

    tracing::debug!(
        source = %source.display(),
        target = %target.display(),
        "creating bind mount"
    );

    mount(
        Some(source),
        target,
        None::<&str>,
        MsFlags::MS_BIND,
        None::<&str>,
    )
    .map_err(std::io::Error::from)
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error — bind mounts require Linux.
#[cfg(not(target_os = "linux"))]
pub fn bind_mount(_source: &Path, _target: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "Linux required for bind mounts",
    ))
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;

    fn is_root() -> bool {
        nix::unistd::Uid::effective().is_root()
    }

    #[test]
    fn bind_mount_nonexistent_source_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = bind_mount(Path::new("/nonexistent/source"), dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn bind_mount_nonexistent_target_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = bind_mount(dir.path(), Path::new("/nonexistent/destination"));
        assert!(result.is_err());
    }

    #[test]
    fn bind_mount_exposes_source_content() {
        if !is_root() {
            return;
        }
        let src = tempfile::tempdir().expect("src");
        let dst = tempfile::tempdir().expect("dst");
        std::fs::write(src.path().join("testfile"), "bind mount test content").expect("write");

        bind_mount(src.path(), dst.path()).expect("bind mount");
        let content = std::fs::read_to_string(dst.path().join("testfile"));
        let _ = nix::mount::umount2(dst.path(), nix::mount::MntFlags::MNT_DETACH);

        assert_eq!(content.expect("read"), "bind mount test content");
    }
}
