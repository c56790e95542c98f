//! Shared DTOs (schemas-as-code) for the verbump workspace.
//!
//! # Design constraints
//! - [`report::BumpReport`] is serialized to disk with `--report`.
//! - Prefer adding optional fields over changing semantics.

pub mod outcome;
pub mod report;

/// Schema identifiers.
pub mod schema {
    pub const VERBUMP_REPORT_V1: &str = "verbump.report.v1";
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
