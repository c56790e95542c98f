//! The bump pipeline, extracted from the CLI.
//!
//! Resolve the new version, build the replacement map, walk the roots and
//! rewrite. Version lookup, writes and progress go through the port traits.

use crate::ports::{ProgressPort, VersionSource, WritePort};
use crate::settings::BumpSettings;
use crate::walk::discover;
use anyhow::Context;
use camino::Utf8PathBuf;
use tracing::{debug, info, warn};
use verbump_edit::{FileEdit, Prepared, ReplacementMap, prepare_edit, render_patch};
use verbump_types::ToolInfo;
use verbump_types::outcome::{FileOutcome, SkipReason};
use verbump_types::report::{BumpReport, FileRecord};

/// Outcome of `run_bump`.
pub struct BumpOutcome {
    pub report: BumpReport,
    /// Unified diff of every change; only collected on dry runs.
    pub patch: String,
}

/// Run the bump pipeline.
///
/// Fails before touching any file if the new version cannot be resolved or a
/// root glob is malformed. Unreadable files are skipped. The first failed
/// write aborts the run; files written before it stay written.
pub fn run_bump(
    settings: &BumpSettings,
    version: &dyn VersionSource,
    writer: &dyn WritePort,
    progress: &dyn ProgressPort,
    tool: ToolInfo,
) -> anyhow::Result<BumpOutcome> {
    anyhow::ensure!(!settings.from.is_empty(), "old version literal is empty");

    let to = version.new_version()?;
    anyhow::ensure!(!to.is_empty(), "new version literal is empty");

    if to == settings.from {
        info!(version = %to, "old and new versions are identical; nothing to replace");
    } else if to.contains(settings.from.as_str()) {
        warn!(
            from = %settings.from,
            to = %to,
            "new version contains the old one; re-running will bump again"
        );
    }

    progress.bump_started(&settings.from, &to);

    let map = ReplacementMap::build(&settings.from, &to, settings.patterns.as_slice());
    debug!(entries = ?map.entries(), "replacement map");

    let targets = discover(&settings.repo_root, &settings.roots, &settings.extensions)
        .context("discover files")?;

    let mut report = BumpReport::new(tool, settings.from.clone(), to);
    report.dry_run = settings.dry_run;
    let mut previews: Vec<(Utf8PathBuf, FileEdit)> = Vec::new();

    for target in targets {
        let Some(path) = target.path else {
            debug!(path = %target.display, "skipping non-UTF-8 path");
            report.record(FileRecord {
                path: target.display,
                outcome: FileOutcome::Skipped {
                    reason: SkipReason::NonUtf8Path,
                },
            });
            continue;
        };

        let prepared = prepare_edit(&path, &map);
        let outcome = prepared.outcome();

        if let Prepared::Changed(edit) = prepared {
            if !settings.dry_run {
                writer.write_edit(&edit)?;
            }
            progress.file_updated(&target.display, settings.dry_run);
            if settings.dry_run {
                previews.push((target.display.clone(), edit));
            }
        }

        report.record(FileRecord {
            path: target.display,
            outcome,
        });
    }

    report.finish();
    info!(
        scanned = report.summary.scanned,
        updated = report.summary.updated,
        skipped = report.summary.skipped,
        replacements = report.summary.replacements,
        dry_run = settings.dry_run,
        "bump finished"
    );

    let patch = render_patch(previews.iter().map(|(p, e)| (p.as_path(), e)));
    Ok(BumpOutcome { report, patch })
}
