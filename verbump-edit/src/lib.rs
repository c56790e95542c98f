//! Edit engine for verbump.
//!
//! Responsibilities:
//! - Build the literal replacement map for a release.
//! - Read candidate files as text, classifying failures as typed skips.
//! - Apply literal (non-regex) substitutions and decide whether a file changes.
//! - Write changed content back and render a unified diff preview.

mod error;

pub use error::{EditError, EditResult};

use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use sha2::{Digest, Sha256};
use tracing::debug;
use verbump_types::outcome::{FileOutcome, SkipReason};

/// Placeholder substituted with the old and new literal in filename patterns.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Filename pattern used when none is configured.
pub const DEFAULT_PATTERN: &str = "seisplotjs_{version}_standalone.mjs";

/// Ordered literal-to-literal replacements.
///
/// Filename patterns come first, the bare `old -> new` pair last. Entries with
/// an empty search string or an identical replacement are dropped on insert,
/// as are duplicate search strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementMap {
    entries: Vec<(String, String)>,
}

impl ReplacementMap {
    /// Build the map for a bump from `old` to `new`.
    ///
    /// Each pattern is interpolated with both literals. Patterns without
    /// [`VERSION_PLACEHOLDER`] would map a string to itself and are ignored.
    pub fn build<S: AsRef<str>>(old: &str, new: &str, patterns: &[S]) -> Self {
        let mut map = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if !pattern.contains(VERSION_PLACEHOLDER) {
                debug!(pattern, "ignoring pattern without version placeholder");
                continue;
            }
            map.push(
                pattern.replace(VERSION_PLACEHOLDER, old),
                pattern.replace(VERSION_PLACEHOLDER, new),
            );
        }
        map.push(old.to_string(), new.to_string());
        map
    }

    fn push(&mut self, search: String, replacement: String) {
        if search.is_empty() || search == replacement {
            return;
        }
        if self.entries.iter().any(|(s, _)| *s == search) {
            return;
        }
        self.entries.push((search, replacement));
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry in order as a literal substring replacement.
    pub fn apply(&self, contents: &str) -> Substitution {
        let mut content = contents.to_string();
        let mut replacements = 0u64;

        for (search, replacement) in &self.entries {
            let hits = content.matches(search.as_str()).count() as u64;
            if hits == 0 {
                continue;
            }
            replacements += hits;
            content = content.replace(search.as_str(), replacement);
        }

        Substitution {
            content,
            replacements,
        }
    }
}

/// Content after applying a [`ReplacementMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub content: String,
    /// Total occurrences replaced across all entries.
    pub replacements: u64,
}

impl Substitution {
    /// True when at least one search literal occurred.
    pub fn fired(&self) -> bool {
        self.replacements > 0
    }
}

/// Read a file as UTF-8 text. Every failure maps to a [`SkipReason`].
pub fn read_text(path: &Utf8Path) -> Result<String, SkipReason> {
    let bytes = fs::read(path).map_err(|e| SkipReason::from_io(&e))?;
    String::from_utf8(bytes).map_err(|_| SkipReason::NotText)
}

/// What to do with one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    Changed(FileEdit),
    Unchanged,
    Skipped(SkipReason),
}

impl Prepared {
    pub fn outcome(&self) -> FileOutcome {
        match self {
            Prepared::Changed(edit) => edit.outcome(),
            Prepared::Unchanged => FileOutcome::Unchanged,
            Prepared::Skipped(reason) => FileOutcome::Skipped {
                reason: reason.clone(),
            },
        }
    }
}

/// A computed rewrite that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEdit {
    pub path: Utf8PathBuf,
    pub before: String,
    pub after: String,
    pub replacements: u64,
}

impl FileEdit {
    pub fn outcome(&self) -> FileOutcome {
        FileOutcome::Updated {
            replacements: self.replacements,
            sha256_before: sha256_hex(self.before.as_bytes()),
            sha256_after: sha256_hex(self.after.as_bytes()),
        }
    }

    /// Overwrite the file with the new content.
    pub fn write(&self) -> EditResult<()> {
        fs::write(&self.path, &self.after).map_err(|source| EditError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read `path` and compute its rewrite under `map`.
///
/// The file changes only when a search literal occurred and the resulting
/// content differs from what is on disk.
pub fn prepare_edit(path: &Utf8Path, map: &ReplacementMap) -> Prepared {
    let before = match read_text(path) {
        Ok(s) => s,
        Err(reason) => {
            debug!(path = %path, %reason, "skipping unreadable file");
            return Prepared::Skipped(reason);
        }
    };

    let sub = map.apply(&before);
    if !sub.fired() || sub.content == before {
        return Prepared::Unchanged;
    }

    Prepared::Changed(FileEdit {
        path: path.to_path_buf(),
        before,
        after: sub.content,
        replacements: sub.replacements,
    })
}

/// Render a git-style unified diff for the given edits, labelled by the
/// paired display path.
pub fn render_patch<'a, I>(edits: I) -> String
where
    I: IntoIterator<Item = (&'a Utf8Path, &'a FileEdit)>,
{
    let mut out = String::new();
    let formatter = PatchFormatter::new();

    for (path, edit) in edits {
        if edit.before == edit.after {
            continue;
        }

        out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
        out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

        let patch = diffy::create_patch(&edit.before, &edit.after);
        let rendered = formatter.fmt_patch(&patch).to_string();
        // diffy repeats its own ---/+++ header; keep only the hunks.
        let hunks = if rendered.starts_with("@@") {
            rendered.as_str()
        } else {
            rendered
                .find("\n@@")
                .map(|i| &rendered[i + 1..])
                .unwrap_or(rendered.as_str())
        };
        out.push_str(hunks);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
