//! Configuration file loading for verbump.
//!
//! Discovers and loads `verbump.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;
use verbump_core::settings::{DEFAULT_EXTENSIONS, DEFAULT_PATTERNS, DEFAULT_ROOTS};

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "verbump.toml";

/// Top-level configuration from verbump.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerbumpConfig {
    pub bump: BumpConfig,
}

/// Bump section of the config. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BumpConfig {
    /// Old version literal.
    pub from: Option<String>,

    /// Manifest path, relative to the repository root.
    pub manifest: Option<Utf8PathBuf>,

    /// Root globs to walk.
    pub roots: Option<Vec<String>>,

    /// Allowed file-name suffixes.
    pub extensions: Option<Vec<String>>,

    /// Filename pattern templates containing `{version}`.
    pub patterns: Option<Vec<String>>,
}

/// Discover the verbump.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a verbump.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<VerbumpConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<VerbumpConfig> {
    let config: VerbumpConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<VerbumpConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(VerbumpConfig::default()),
    }
}

/// Configuration after merging the file with CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub from: String,
    pub manifest: Utf8PathBuf,
    pub roots: Vec<String>,
    pub extensions: Vec<String>,
    pub patterns: Vec<String>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: VerbumpConfig,
}

impl ConfigMerger {
    pub fn new(config: VerbumpConfig) -> Self {
        Self { config }
    }

    /// Merge with CLI arguments.
    ///
    /// Scalars from the CLI replace the file's. A non-empty CLI list replaces
    /// the file's list rather than extending it, so `--root src` walks only
    /// `src`. Fails if no old version literal is given anywhere.
    pub fn merge_args(
        self,
        cli_from: Option<&str>,
        cli_manifest: Option<&Utf8Path>,
        cli_roots: &[String],
        cli_extensions: &[String],
        cli_patterns: &[String],
    ) -> anyhow::Result<MergedConfig> {
        let bump = self.config.bump;

        let from = cli_from
            .map(str::to_string)
            .or(bump.from)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "missing old version: pass --from or set bump.from in {}",
                    CONFIG_FILE_NAME
                )
            })?;

        let manifest = cli_manifest
            .map(Utf8Path::to_path_buf)
            .or(bump.manifest)
            .unwrap_or_else(|| Utf8PathBuf::from(verbump_manifest::DEFAULT_MANIFEST));

        let roots = pick_list(cli_roots, bump.roots, DEFAULT_ROOTS);
        let extensions = pick_list(cli_extensions, bump.extensions, DEFAULT_EXTENSIONS)
            .into_iter()
            .map(|e| normalize_extension(&e))
            .collect();
        let patterns = pick_list(cli_patterns, bump.patterns, DEFAULT_PATTERNS);

        Ok(MergedConfig {
            from,
            manifest,
            roots,
            extensions,
            patterns,
        })
    }
}

fn pick_list(cli: &[String], file: Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    if !cli.is_empty() {
        return cli.to_vec();
    }
    file.unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
}

/// `ts` and `.ts` both mean files ending in `.ts`.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.is_empty() || ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_example_config() {
        let contents = r#"
[bump]
from = "3.1.0-alpha1"
manifest = "package.json"
roots = ["docs/api/*.html", "src", "test", "testremotes"]
extensions = [".html", ".ts", ".js"]
patterns = ["seisplotjs_{version}_standalone.mjs"]
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.bump.from.as_deref(), Some("3.1.0-alpha1"));
        assert_eq!(config.bump.manifest.as_deref(), Some(Utf8Path::new("package.json")));
        assert_eq!(config.bump.roots.as_ref().map(Vec::len), Some(4));
        assert_eq!(config.bump.extensions.as_ref().map(Vec::len), Some(3));
        assert_eq!(config.bump.patterns.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.bump.from.is_none());
        assert!(config.bump.roots.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = parse_config("[bump]\nform = \"1.0.0\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("form"));

        assert!(parse_config("[bumps]\n").is_err());
    }

    #[test]
    fn test_merge_defaults_when_file_is_empty() {
        let merged = ConfigMerger::new(VerbumpConfig::default())
            .merge_args(Some("1.0.0"), None, &[], &[], &[])
            .unwrap();

        assert_eq!(merged.from, "1.0.0");
        assert_eq!(merged.manifest, Utf8PathBuf::from("package.json"));
        assert_eq!(merged.roots, vec!["docs/api/*.html", "src", "test", "testremotes"]);
        assert_eq!(merged.extensions, vec![".html", ".ts", ".js"]);
        assert_eq!(merged.patterns, vec!["seisplotjs_{version}_standalone.mjs"]);
    }

    #[test]
    fn test_merge_cli_overrides_file() {
        let config = parse_config(
            r#"
[bump]
from = "1.0.0"
manifest = "Cargo.toml"
roots = ["lib"]
extensions = [".rs"]
patterns = []
"#,
        )
        .unwrap();

        let merged = ConfigMerger::new(config)
            .merge_args(
                Some("2.0.0"),
                Some(Utf8Path::new("pkg/package.json")),
                &["src".to_string()],
                &["ts".to_string()],
                &["app-{version}.js".to_string()],
            )
            .unwrap();

        assert_eq!(merged.from, "2.0.0");
        assert_eq!(merged.manifest, Utf8PathBuf::from("pkg/package.json"));
        assert_eq!(merged.roots, vec!["src"]);
        assert_eq!(merged.extensions, vec![".ts"]);
        assert_eq!(merged.patterns, vec!["app-{version}.js"]);
    }

    #[test]
    fn test_merge_file_values_used_when_cli_silent() {
        let config = parse_config(
            r#"
[bump]
from = "1.0.0"
roots = ["lib"]
patterns = []
"#,
        )
        .unwrap();

        let merged = ConfigMerger::new(config)
            .merge_args(None, None, &[], &[], &[])
            .unwrap();

        assert_eq!(merged.from, "1.0.0");
        assert_eq!(merged.roots, vec!["lib"]);
        assert!(merged.patterns.is_empty());
    }

    #[test]
    fn test_merge_requires_from() {
        let err = ConfigMerger::new(VerbumpConfig::default())
            .merge_args(None, None, &[], &[], &[])
            .unwrap_err();
        assert!(err.to_string().contains("missing old version"));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("ts"), ".ts");
        assert_eq!(normalize_extension(".js"), ".js");
        assert_eq!(normalize_extension(" html "), ".html");
        assert_eq!(normalize_extension(""), "");
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(&root).expect("load default");
        assert!(cfg.bump.from.is_none());
    }
}
