//! Manifest ingestion.
//!
//! verbump only consumes one field from the manifest: the version string that
//! becomes the new literal. Everything else in the document is ignored, so
//! manifests with extra or unusual fields load fine as long as `version` is a
//! string.

mod load;

pub use load::{ManifestError, ManifestFormat, load_version, parse_version};

/// Default manifest path, relative to the repository root.
pub const DEFAULT_MANIFEST: &str = "package.json";
