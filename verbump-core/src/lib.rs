//! Embeddable core library for verbump.
//!
//! Provides a clap-free, I/O-abstracted entry point for bumping a version
//! literal across a source tree.
//!
//! # Port traits
//!
//! I/O at the edges is abstracted behind port traits in [`ports`]:
//! - [`VersionSource`](ports::VersionSource): resolve the new version
//! - [`WritePort`](ports::WritePort): write rewritten files
//! - [`ProgressPort`](ports::ProgressPort): announce progress lines
//!
//! The [`adapters`] module provides default implementations.
//!
//! # Entry point
//!
//! - [`run_bump`](pipeline::run_bump): walk, rewrite, and report

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;
pub mod walk;

// Re-export the edit engine's map so callers don't need verbump-edit directly.
pub use verbump_edit::ReplacementMap;
