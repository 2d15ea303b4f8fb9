//! Configuration model for Bindicate.
//!
//! The configuration is loaded once per invocation and then handed by
//! reference to the component that needs it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BindicateError, Result};

/// Root configuration: where backing copies live and which paths to bind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindicateConfig {
    /// Prefix path where the bind mounted files are stored.
    #[serde(rename = "Prefix", alias = "prefix", default)]
    pub prefix: String,
    /// Paths to bind mount, in the order their fstab lines are emitted.
    #[serde(rename = "Paths", alias = "paths", default)]
    pub paths: Vec<String>,
}

impl BindicateConfig {
    /// Creates a configuration from a prefix and a list of paths.
    #[must_use]
    pub fn new(prefix: impl Into<String>, paths: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            paths,
        }
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a well-formed configuration record.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Loads the configuration file at `path`.
    ///
    /// An empty file is rejected as a parse error rather than treated as an
    /// empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BindicateError::ConfigRead`] if the file cannot be read and
    /// [`BindicateError::ConfigParse`] if its content is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        let raw = std::fs::read_to_string(path).map_err(|e| BindicateError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_json(&raw).map_err(|e| BindicateError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::debug!(
            prefix = %config.prefix,
            paths = config.paths.len(),
            "config loaded"
        );
        Ok(config)
    }

    /// Backing copy location for `path`: exactly `prefix + "/" + path`.
    ///
    /// No normalization is applied, so `/etc/hosts` under `/p` maps to
    /// `/p//etc/hosts`.
    #[must_use]
    pub fn destination(&self, path: &str) -> String {
        format!("{}/{}", self.prefix, path)
    }

    /// Device field of the fstab entry for `path`.
    ///
    /// Same join as [`Self::destination`] with duplicate separators and `.`
    /// components collapsed, so `/test` and `/etc/test` yield
    /// `/test/etc/test`.
    #[must_use]
    pub fn mount_source(&self, path: &str) -> String {
        let joined = self.destination(path);
        Path::new(&joined)
            .components()
            .collect::<PathBuf>()
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn load_valid_config_exposes_both_fields() {
        let file = write_config(
            r#"{
    "Prefix": "/var/lib/bindicate/protected",
    "Paths": ["/etc/hostname", "/etc/hosts"]
}"#,
        );
        let config = BindicateConfig::load(file.path()).expect("load");
        assert_eq!(config.prefix, "/var/lib/bindicate/protected");
        assert_eq!(config.paths, vec!["/etc/hostname", "/etc/hosts"]);
    }

    #[test]
    fn load_accepts_lowercase_field_names() {
        let file = write_config(r#"{"prefix": "/p", "paths": ["/etc/a"]}"#);
        let config = BindicateConfig::load(file.path()).expect("load");
        assert_eq!(config, BindicateConfig::new("/p", vec!["/etc/a".into()]));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = BindicateConfig::load(Path::new("/nonexistent/config.json"))
            .expect_err("should fail");
        assert!(matches!(err, BindicateError::ConfigRead { .. }));
    }

    #[test]
    fn load_invalid_json_is_parse_error() {
        let file = write_config(
            r#"{
    "Prefix": "/test",
    "Paths": ["/etc/test"
}"#,
        );
        let err = BindicateConfig::load(file.path()).expect_err("should fail");
        assert!(matches!(err, BindicateError::ConfigParse { .. }));
    }

    #[test]
    fn load_empty_file_is_parse_error() {
        let file = write_config("");
        let err = BindicateConfig::load(file.path()).expect_err("should fail");
        assert!(matches!(err, BindicateError::ConfigParse { .. }));
    }

    #[test]
    fn destination_is_plain_concatenation() {
        let config = BindicateConfig::new("/prefix/", Vec::new());
        assert_eq!(config.destination("/etc/hosts"), "/prefix///etc/hosts");
        assert_eq!(config.destination("etc/hosts"), "/prefix//etc/hosts");
    }

    #[test]
    fn mount_source_collapses_separators() {
        let config = BindicateConfig::new("/test", Vec::new());
        assert_eq!(config.mount_source("/etc/test"), "/test/etc/test");

        let trailing = BindicateConfig::new("/test/", Vec::new());
        assert_eq!(trailing.mount_source("/etc/./test"), "/test/etc/test");
    }

    #[test]
    fn mount_source_with_empty_prefix_is_rooted() {
        let config = BindicateConfig::default();
        assert_eq!(config.mount_source("/etc/hosts"), "/etc/hosts");
    }
}
