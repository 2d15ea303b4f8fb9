//! Permission-preserving file copy.

use std::fs::{File, OpenOptions};
use std::path::Path;

/// Copies `source` to `dest`, then gives `dest` the exact mode of `source`.
///
/// `dest` is created or truncated. Its permissions are set explicitly after
/// the copy so the result does not depend on the umask or on whatever mode
/// an existing `dest` already had.
///
/// # Errors
///
/// Returns an error if `source` cannot be stat'ed or read, or if `dest`
/// cannot be opened, written, or chmod'ed.
pub fn copy_preserving_permissions(source: &Path, dest: &Path) -> std::io::Result<()> {
    let permissions = std::fs::metadata(source)?.permissions();

    let mut src = File::open(source)?;
    let mut dst = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(dest)?;

    let bytes = std::io::copy(&mut src, &mut dst)?;
    dst.set_permissions(permissions)?;

    tracing::debug!(
        source = %source.display(),
        dest = %dest.display(),
        bytes,
        "copied file"
    );
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;

    fn mode_of(path: &Path) -> u32 {
        std::fs::metadata(path).expect("stat").permissions().mode() & 0o7777
    }

    #[test]
    fn copy_preserves_content_and_mode() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        std::fs::write(&src, "test file content").expect("write");
        std::fs::set_permissions(&src, std::fs::Permissions::from_mode(0o641)).expect("chmod");

        copy_preserving_permissions(&src, &dst).expect("copy");

        assert_eq!(std::fs::read_to_string(&dst).expect("read"), "test file content");
        assert_eq!(mode_of(&dst), 0o641);
    }

    #[test]
    fn copy_refreshes_existing_destination() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        std::fs::write(&src, "new").expect("write src");
        std::fs::set_permissions(&src, std::fs::Permissions::from_mode(0o600)).expect("chmod");
        std::fs::write(&dst, "old and much longer content").expect("write dst");
        std::fs::set_permissions(&dst, std::fs::Permissions::from_mode(0o644)).expect("chmod");

        copy_preserving_permissions(&src, &dst).expect("copy");

        assert_eq!(std::fs::read_to_string(&dst).expect("read"), "new");
        assert_eq!(mode_of(&dst), 0o600);
    }

    #[test]
    fn copy_nonexistent_source_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result =
            copy_preserving_permissions(Path::new("/nonexistent/source"), &dir.path().join("d"));
        assert!(result.is_err());
    }

    #[test]
    fn copy_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let src = dir.path().join("src");
        std::fs::write(&src, "x").expect("write");
        let result = copy_preserving_permissions(&src, &dir.path().join("missing/dir/file"));
        assert!(result.is_err());
    }
}
