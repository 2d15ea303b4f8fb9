//! Host filesystem primitives.
//!
//! Provides the permission-preserving file copy and the bind mount used by
//! the provisioner.

pub mod copy;
pub mod mount;
