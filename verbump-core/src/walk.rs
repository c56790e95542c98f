//! Root glob expansion and recursive file discovery.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A file eligible for rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    /// On-disk location; `None` when the path is not valid UTF-8.
    pub path: Option<Utf8PathBuf>,

    /// Path relative to the repository root, `/`-separated.
    pub display: Utf8PathBuf,
}

/// True when `file_name` ends with one of `extensions`.
pub fn has_allowed_suffix(file_name: &str, extensions: &[String]) -> bool {
    extensions
        .iter()
        .any(|ext| !ext.is_empty() && file_name.ends_with(ext.as_str()))
}

/// Expand each root glob under `repo_root` and collect every eligible file
/// beneath the matches.
///
/// Matches are visited in glob order and walked sorted by file name, so the
/// result is deterministic. A file reached from two roots is returned once.
/// Unreadable directories are logged and skipped; a malformed glob is an error.
pub fn discover(
    repo_root: &Utf8Path,
    roots: &[String],
    extensions: &[String],
) -> anyhow::Result<Vec<FileTarget>> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut out = Vec::new();

    for root in roots {
        let pattern = if Utf8Path::new(root).is_absolute() {
            root.clone()
        } else {
            format!("{}/{}", glob::Pattern::escape(repo_root.as_str()), root)
        };
        debug!(pattern = %pattern, "expanding root glob");

        let matches = glob::glob(&pattern).with_context(|| format!("invalid root glob '{root}'"))?;
        for top in matches {
            let top = match top {
                Ok(p) => p,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable glob match");
                    continue;
                }
            };

            for entry in WalkDir::new(&top).follow_links(false).sort_by_file_name() {
                let entry = match entry {
                    Ok(e) => e,
                    Err(e) => {
                        debug!(error = %e, "skipping unreadable directory entry");
                        continue;
                    }
                };

                if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
                {
                    continue;
                }
                let allowed = has_allowed_suffix(&entry.file_name().to_string_lossy(), extensions);
                if !allowed {
                    continue;
                }

                let path = entry.into_path();
                // `src` and `src/../src` name the same file.
                let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
                if !seen.insert(key) {
                    continue;
                }
                out.push(target_for(repo_root, path));
            }
        }
    }

    debug!(files = out.len(), "discovered candidate files");
    Ok(out)
}

fn target_for(repo_root: &Utf8Path, path: PathBuf) -> FileTarget {
    let display = match path.strip_prefix(repo_root.as_std_path()) {
        Ok(rel) => slash_join(rel),
        Err(_) => path.to_string_lossy().into_owned(),
    };
    FileTarget {
        path: Utf8PathBuf::from_path_buf(path).ok(),
        display: Utf8PathBuf::from(display),
    }
}

fn slash_join(rel: &Path) -> String {
    rel.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
