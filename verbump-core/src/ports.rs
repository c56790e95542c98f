//! Port traits abstracting I/O at the edges of the pipeline.

use camino::Utf8Path;
use verbump_edit::FileEdit;

/// Source of the new version literal.
pub trait VersionSource {
    fn new_version(&self) -> anyhow::Result<String>;
}

/// Writes a computed edit back to disk.
pub trait WritePort {
    fn write_edit(&self, edit: &FileEdit) -> anyhow::Result<()>;
}

/// Human-readable progress.
pub trait ProgressPort {
    fn bump_started(&self, from: &str, to: &str);
    fn file_updated(&self, path: &Utf8Path, dry_run: bool);
}
