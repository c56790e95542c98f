//! Error types for verbump-edit.
//!
//! Read failures are not errors here: they become a
//! [`SkipReason`](verbump_types::outcome::SkipReason) and the run continues.
//! Only a failed write is an error, and it aborts the run.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// Writing the rewritten content back failed.
    #[error("write {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            EditError::Write { path, .. } => path,
        }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::EditError;
    use std::error::Error as _;

    #[test]
    fn write_error_names_path_and_keeps_source() {
        let err = EditError::Write {
            path: "src/a.ts".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.to_string(), "write src/a.ts");
        assert_eq!(err.path().as_str(), "src/a.ts");
        assert!(err.source().is_some());
    }
}
