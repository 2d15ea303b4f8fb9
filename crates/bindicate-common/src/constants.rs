//! System-wide constants and default paths.

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/bindicate/config.json";

/// Mount table managed by the `write-fstab` command.
pub const FSTAB_PATH: &str = "/etc/fstab";

/// First line of the managed fstab section. Matched as a line prefix.
pub const SECTION_START: &str = "# BINDICATE START";

/// Last line of the managed fstab section. Matched as a line prefix.
pub const SECTION_END: &str = "# BINDICATE END";

/// Mode used for directories created under the prefix.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Mode applied to the fstab file when it has to be created.
pub const FSTAB_MODE: u32 = 0o644;

/// Filesystem type written into managed fstab entries.
pub const BIND_VFS_TYPE: &str = "bind";

/// Application name used in CLI output.
pub const APP_NAME: &str = "bindicate";
