//! Unified error types for the Bindicate workspace.
//!
//! Configuration and fstab failures are fatal and reported as a single
//! [`BindicateError`]. Per-path provisioning failures are collected into a
//! [`ProvisionErrors`] aggregate so that one bad path never hides another.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum BindicateError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not well-formed JSON.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// Copying a source file into the prefix failed.
    #[error("failed to copy {path} to {dest}: {source}")]
    PathCopy {
        /// Declared source path.
        path: String,
        /// Backing copy under the prefix.
        dest: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The bind mount of a source path failed.
    #[error("failed to bind mount {path} on {dest}: {source}")]
    PathMount {
        /// Declared source path.
        path: String,
        /// Backing copy under the prefix.
        dest: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading or writing the managed fstab file failed.
    #[error("fstab I/O error at {path}: {source}")]
    FstabIo {
        /// Path of the fstab file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// One or more paths failed to provision.
    #[error("{0}")]
    Provision(#[from] ProvisionErrors),
}

/// Ordered collection of per-path provisioning failures.
///
/// A value of this type is never empty: it is only constructed when at
/// least one path failed.
#[derive(Debug)]
pub struct ProvisionErrors {
    errors: Vec<BindicateError>,
}

impl ProvisionErrors {
    /// Wraps the collected errors, returning `None` when nothing failed.
    #[must_use]
    pub fn from_errors(errors: Vec<BindicateError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Number of failed paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The individual failures in path order.
    #[must_use]
    pub fn errors(&self) -> &[BindicateError] {
        &self.errors
    }

    /// Iterates over the individual failures in path order.
    pub fn iter(&self) -> std::slice::Iter<'_, BindicateError> {
        self.errors.iter()
    }

    /// Consumes the aggregate, returning the individual failures.
    #[must_use]
    pub fn into_errors(self) -> Vec<BindicateError> {
        self.errors
    }
}

impl fmt::Display for ProvisionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ProvisionErrors {}

impl<'a> IntoIterator for &'a ProvisionErrors {
    type Item = &'a BindicateError;
    type IntoIter = std::slice::Iter<'a, BindicateError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, BindicateError>;
