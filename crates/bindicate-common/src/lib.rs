//! # bindicate-common
//!
//! Configuration model, error definitions, and constants shared by the
//! Bindicate workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the configuration value and error types that
//! the provisioner, the fstab synchronizer, and the CLI all build upon.

pub mod config;
pub mod constants;
pub mod error;
