//! Clap-free settings for the bump pipeline.

use camino::Utf8PathBuf;

/// Root globs walked when none are configured.
pub const DEFAULT_ROOTS: &[&str] = &["docs/api/*.html", "src", "test", "testremotes"];

/// File-name suffixes eligible for rewriting when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".html", ".ts", ".js"];

/// Filename pattern templates used when none are configured.
pub const DEFAULT_PATTERNS: &[&str] = &[verbump_edit::DEFAULT_PATTERN];

/// Settings for one bump run.
#[derive(Debug, Clone)]
pub struct BumpSettings {
    pub repo_root: Utf8PathBuf,

    /// Old version literal.
    pub from: String,

    /// Root globs, relative to `repo_root`.
    pub roots: Vec<String>,

    /// Allowed file-name suffixes.
    pub extensions: Vec<String>,

    /// Filename pattern templates containing `{version}`.
    pub patterns: Vec<String>,

    /// Compute and report changes without writing.
    pub dry_run: bool,
}

impl Default for BumpSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            from: String::new(),
            roots: DEFAULT_ROOTS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            patterns: DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect(),
            dry_run: false,
        }
    }
}
