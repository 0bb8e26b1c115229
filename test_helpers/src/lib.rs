//! Test helpers shared across crates.
//!
//! This crate provides the canonical kubeadm template fixtures and a scratch
//! directory helper for tests that need real files on disk.

pub mod files;
pub mod fixtures;
