//! Default port implementations.

use crate::ports::{ProgressPort, VersionSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use verbump_edit::FileEdit;

/// Reads the new version from a manifest on disk.
#[derive(Debug, Clone)]
pub struct ManifestVersionSource {
    pub path: Utf8PathBuf,
}

impl ManifestVersionSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }
}

impl VersionSource for ManifestVersionSource {
    fn new_version(&self) -> anyhow::Result<String> {
        verbump_manifest::load_version(&self.path)
            .with_context(|| format!("load version from {}", self.path))
    }
}

/// A version given up front, e.g. `--to` on the command line.
#[derive(Debug, Clone)]
pub struct FixedVersion(pub String);

impl VersionSource for FixedVersion {
    fn new_version(&self) -> anyhow::Result<String> {
        debug!(version = %self.0, "using explicit version");
        Ok(self.0.clone())
    }
}

/// Writes edits in place.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_edit(&self, edit: &FileEdit) -> anyhow::Result<()> {
        edit.write()?;
        Ok(())
    }
}

/// Prints progress lines on stdout.
#[derive(Debug, Clone, Default)]
pub struct StdoutProgress;

impl ProgressPort for StdoutProgress {
    fn bump_started(&self, from: &str, to: &str) {
        println!("Update {from} to {to}");
    }

    fn file_updated(&self, path: &Utf8Path, dry_run: bool) {
        if dry_run {
            println!("Would update {path}");
        } else {
            println!("Update {path}");
        }
    }
}
