//! # bindicate-core
//!
//! Reconciliation logic for Bindicate.
//!
//! This crate provides:
//! - **fstab**: idempotent synchronization of the managed section of a
//!   mount table.
//! - **provision**: per-path backing copies under the prefix and the bind
//!   mounts over them, with per-path failure isolation.
//! - **filesystem**: the copy and `mount(2)` primitives the provisioner
//!   runs against on a real host.

pub mod filesystem;
pub mod fstab;
pub mod provision;
