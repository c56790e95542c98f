use crate::ToolInfo;
use crate::outcome::FileOutcome;
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record of one verbump run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BumpReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,

    /// Old version literal.
    pub from: String,

    /// New version literal.
    pub to: String,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub files: Vec<FileRecord>,

    pub summary: BumpSummary,
}

impl BumpReport {
    pub fn new(tool: ToolInfo, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            schema: crate::schema::VERBUMP_REPORT_V1.to_string(),
            tool,
            run: RunInfo::start(),
            from: from.into(),
            to: to.into(),
            dry_run: false,
            files: vec![],
            summary: BumpSummary::default(),
        }
    }

    /// Append a file record and fold it into the summary.
    pub fn record(&mut self, record: FileRecord) {
        self.summary.scanned += 1;
        match &record.outcome {
            FileOutcome::Updated { replacements, .. } => {
                self.summary.updated += 1;
                self.summary.replacements += replacements;
            }
            FileOutcome::Unchanged => self.summary.unchanged += 1,
            FileOutcome::Skipped { .. } => self.summary.skipped += 1,
        }
        self.files.push(record);
    }

    pub fn finish(&mut self) {
        self.run.ended_at = Some(Utc::now());
    }

    pub fn updated_paths(&self) -> impl Iterator<Item = &Utf8PathBuf> {
        self.files
            .iter()
            .filter(|r| r.outcome.is_updated())
            .map(|r| &r.path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

impl RunInfo {
    fn start() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            ended_at: None,
        }
    }
}

/// One visited file, keyed by its path relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: Utf8PathBuf,

    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BumpSummary {
    pub scanned: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub skipped: u64,
    pub replacements: u64,
}
