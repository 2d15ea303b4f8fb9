//! Managed-section synchronization for `/etc/fstab`.
//!
//! Everything between the `# BINDICATE START` and `# BINDICATE END`
//! sentinels belongs to Bindicate and is regenerated from the configuration
//! on every sync. All other lines are carried over unchanged and in order,
//! and the regenerated section is always appended at the end of the file.

use std::fmt;
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use bindicate_common::config::BindicateConfig;
use bindicate_common::constants::{BIND_VFS_TYPE, FSTAB_MODE, SECTION_END, SECTION_START};
use bindicate_common::error::{BindicateError, Result};

/// A single mount table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FstabEntry {
    /// Block device or source path (first column).
    pub spec: String,
    /// Mount point (second column).
    pub file: String,
    /// Filesystem type (third column).
    pub vfs_type: String,
    /// Mount options, comma-joined when rendered.
    pub options: Vec<String>,
    /// Dump frequency.
    pub dump: u32,
    /// fsck pass number.
    pub pass: u32,
}

impl FstabEntry {
    /// Creates a bind entry with no options and `0 0` dump/pass.
    #[must_use]
    pub fn bind(spec: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            file: file.into(),
            vfs_type: BIND_VFS_TYPE.to_string(),
            options: Vec::new(),
            dump: 0,
            pass: 0,
        }
    }
}

impl fmt::Display for FstabEntry {
    // An empty options list still occupies its column: `bind  0 0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.spec,
            self.file,
            self.vfs_type,
            self.options.join(","),
            self.dump,
            self.pass
        )
    }
}

/// Builds the managed entries for `config`, in declared path order.
#[must_use]
pub fn managed_entries(config: &BindicateConfig) -> Vec<FstabEntry> {
    config
        .paths
        .iter()
        .map(|path| FstabEntry::bind(config.mount_source(path), path.as_str()))
        .collect()
}

/// Renders one newline-terminated fstab line per configured path.
///
/// Returns an empty string when no paths are configured.
#[must_use]
pub fn render_fstab_lines(config: &BindicateConfig) -> String {
    managed_entries(config)
        .iter()
        .map(|entry| format!("{entry}\n"))
        .collect()
}

/// Scanner position relative to the managed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Outside,
    Inside,
}

impl Section {
    /// Next state after `line`, and whether `line` is kept in the output.
    ///
    /// Sentinel lines are never kept. A start sentinel always enters the
    /// section, even after an earlier section was closed.
    fn step(self, line: &str) -> (Self, bool) {
        if line.starts_with(SECTION_START) {
            (Self::Inside, false)
        } else if line.starts_with(SECTION_END) {
            (Self::Outside, false)
        } else {
            (self, self == Self::Outside)
        }
    }
}

/// Returns `current` with its managed section replaced by one generated
/// from `config`.
///
/// Lines outside any managed section keep their text and relative order.
/// The new section is appended after them with no trailing newline. The
/// transform is idempotent: syncing its own output with the same
/// configuration yields the same text.
#[must_use]
pub fn sync_fstab(current: &str, config: &BindicateConfig) -> String {
    let mut out = String::with_capacity(current.len());
    let mut state = Section::Outside;

    for line in current.split('\n') {
        let (next, keep) = state.step(line);
        state = next;
        if keep {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(line);
        }
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(SECTION_START);
    out.push('\n');
    out.push_str(&render_fstab_lines(config));
    out.push_str(SECTION_END);
    out
}

/// Reads the fstab at `path`, syncs its managed section, and writes it back.
///
/// Returns the text that was written. The file is created with mode `0644`
/// if it does not exist; an existing file keeps its mode.
///
/// # Errors
///
/// Returns [`BindicateError::FstabIo`] if the file cannot be read or written.
pub fn write_fstab(path: &Path, config: &BindicateConfig) -> Result<String> {
    let current = read_fstab(path)?;
    let synced = sync_fstab(&current, config);

    let io_err = |e| BindicateError::FstabIo {
        path: path.to_path_buf(),
        source: e,
    };
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(FSTAB_MODE)
        .open(path)
        .map_err(io_err)?;
    file.write_all(synced.as_bytes()).map_err(io_err)?;

    tracing::info!(
        path = %path.display(),
        entries = config.paths.len(),
        "fstab managed section synced"
    );
    Ok(synced)
}

/// Reads the current contents of the fstab at `path`.
///
/// # Errors
///
/// Returns [`BindicateError::FstabIo`] if the file cannot be read.
pub fn read_fstab(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "reading fstab");
    std::fs::read_to_string(path).map_err(|e| BindicateError::FstabIo {
        path: path.to_path_buf(),
        source: e,
    })
}
