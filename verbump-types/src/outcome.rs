use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Result of one read-modify-write cycle on a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// At least one search literal occurred and the new content differs.
    /// In dry-run mode the content was computed but not written.
    Updated {
        replacements: u64,
        sha256_before: String,
        sha256_after: String,
    },

    /// The file was read but contained nothing to replace.
    Unchanged,

    /// The file could not be obtained as text and was left alone.
    Skipped { reason: SkipReason },
}

impl FileOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, FileOutcome::Updated { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FileOutcome::Skipped { .. })
    }

    pub fn replacements(&self) -> u64 {
        match self {
            FileOutcome::Updated { replacements, .. } => *replacements,
            _ => 0,
        }
    }
}

/// Why a file was skipped instead of rewritten.
///
/// Every variant is a tolerated failure: a skip never aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    PermissionDenied,
    /// The file disappeared between discovery and read.
    NotFound,
    /// Content is not valid UTF-8 (binary or foreign encoding).
    NotText,
    /// The path itself cannot be represented as UTF-8.
    NonUtf8Path,
    Io { message: String },
}

impl SkipReason {
    /// Classify a read error.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => SkipReason::PermissionDenied,
            io::ErrorKind::NotFound => SkipReason::NotFound,
            io::ErrorKind::InvalidData => SkipReason::NotText,
            _ => SkipReason::Io {
                message: err.to_string(),
            },
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PermissionDenied => f.write_str("permission denied"),
            SkipReason::NotFound => f.write_str("file not found"),
            SkipReason::NotText => f.write_str("not valid UTF-8 text"),
            SkipReason::NonUtf8Path => f.write_str("path is not UTF-8"),
            SkipReason::Io { message } => write!(f, "io error: {message}"),
        }
    }
}
