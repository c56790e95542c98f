use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use thiserror::Error;
use tracing::debug;

/// Document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    /// `package.json` and anything else that is not `.toml`.
    Json,
    /// `Cargo.toml` style: `package.version`, then `workspace.package.version`,
    /// then a top-level `version`.
    Toml,
}

impl ManifestFormat {
    pub fn for_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ManifestFormat::Toml,
            _ => ManifestFormat::Json,
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("read manifest {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse manifest {path} as JSON")]
    Json {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("parse manifest {path} as TOML")]
    Toml {
        path: Utf8PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("manifest {path} is not a key-value mapping")]
    NotAMapping { path: Utf8PathBuf },

    #[error("manifest {path} has no version field")]
    MissingVersion { path: Utf8PathBuf },

    #[error("version field in {path} is not a string (found {found})")]
    NotAString {
        path: Utf8PathBuf,
        found: &'static str,
    },
}

/// Read the manifest at `path` and return its version string.
pub fn load_version(path: &Utf8Path) -> Result<String, ManifestError> {
    debug!(path = %path, "loading manifest");

    let contents = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_version(path, &contents)
}

/// Extract the version from manifest contents. `path` picks the format and
/// names the document in errors.
pub fn parse_version(path: &Utf8Path, contents: &str) -> Result<String, ManifestError> {
    let version = match ManifestFormat::for_path(path) {
        ManifestFormat::Json => json_version(path, contents)?,
        ManifestFormat::Toml => toml_version(path, contents)?,
    };
    debug!(path = %path, version = %version, "manifest version");
    Ok(version)
}

fn json_version(path: &Utf8Path, contents: &str) -> Result<String, ManifestError> {
    let doc: serde_json::Value =
        serde_json::from_str(contents).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let map = doc.as_object().ok_or_else(|| ManifestError::NotAMapping {
        path: path.to_path_buf(),
    })?;

    match map.get("version") {
        None => Err(ManifestError::MissingVersion {
            path: path.to_path_buf(),
        }),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ManifestError::NotAString {
            path: path.to_path_buf(),
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn toml_version(path: &Utf8Path, contents: &str) -> Result<String, ManifestError> {
    let doc: toml::Table = toml::from_str(contents).map_err(|source| ManifestError::Toml {
        path: path.to_path_buf(),
        source,
    })?;

    let candidates = [
        doc.get("package").and_then(|p| p.get("version")),
        doc.get("workspace")
            .and_then(|w| w.get("package"))
            .and_then(|p| p.get("version")),
        doc.get("version"),
    ];

    match candidates.into_iter().flatten().next() {
        None => Err(ManifestError::MissingVersion {
            path: path.to_path_buf(),
        }),
        Some(toml::Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ManifestError::NotAString {
            path: path.to_path_buf(),
            found: other.type_str(),
        }),
    }
}
