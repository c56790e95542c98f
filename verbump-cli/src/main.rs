mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use config::ConfigMerger;
use fs_err as fs;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use verbump_core::adapters::{FixedVersion, FsWritePort, ManifestVersionSource, StdoutProgress};
use verbump_core::pipeline::run_bump;
use verbump_core::ports::VersionSource;
use verbump_core::settings::BumpSettings;
use verbump_types::ToolInfo;

#[derive(Debug, Parser)]
#[command(
    name = "verbump",
    version,
    about = "Rewrite an old version literal across docs, sources and tests."
)]
struct Cli {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Old version literal to replace (or `bump.from` in verbump.toml).
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    from: Option<String>,

    /// New version literal. When omitted, read from the manifest.
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    to: Option<String>,

    /// Manifest holding the new version, relative to the repo root (default: package.json).
    #[arg(long)]
    manifest: Option<Utf8PathBuf>,

    /// Root glob to walk, relative to the repo root. Repeatable; replaces the configured list.
    #[arg(long = "root")]
    roots: Vec<String>,

    /// File-name suffix eligible for rewriting. Repeatable; replaces the configured list.
    #[arg(long = "ext")]
    extensions: Vec<String>,

    /// Filename pattern template containing `{version}`. Repeatable; replaces the configured list.
    #[arg(long = "pattern")]
    patterns: Vec<String>,

    /// Show what would change and print a diff, without writing.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repo_root = cli.repo_root;

    // Load config file and merge with CLI arguments
    let file_config =
        config::load_or_default(&repo_root).context("load verbump.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_args(
        cli.from.as_deref(),
        cli.manifest.as_deref(),
        &cli.roots,
        &cli.extensions,
        &cli.patterns,
    )?;

    debug!(
        "merged config: from={}, manifest={}, roots={:?}, extensions={:?}, patterns={:?}",
        merged.from, merged.manifest, merged.roots, merged.extensions, merged.patterns
    );

    let version: Box<dyn VersionSource> = match cli.to {
        Some(to) => Box::new(FixedVersion(to)),
        None => Box::new(ManifestVersionSource::new(resolve(&repo_root, &merged.manifest))),
    };

    let settings = BumpSettings {
        repo_root: repo_root.clone(),
        from: merged.from,
        roots: merged.roots,
        extensions: merged.extensions,
        patterns: merged.patterns,
        dry_run: cli.dry_run,
    };

    let outcome = run_bump(
        &settings,
        version.as_ref(),
        &FsWritePort,
        &StdoutProgress,
        tool_info(),
    )?;

    if settings.dry_run && !outcome.patch.is_empty() {
        print!("{}", outcome.patch);
    }

    if let Some(path) = cli.report {
        write_json(&path, &outcome.report)?;
        info!("wrote report to {}", path);
    }

    Ok(())
}

fn resolve(repo_root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        repo_root.join(path)
    }
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent))?;
    }
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "verbump".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
