//! The per-item processing report artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SplitConfig;

/// Outcome of the cleanup phase, recorded in the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupOutcome {
    /// Paths moved to trash (original locations).
    pub moved: Vec<String>,
    /// Whether the item's trash subtree was permanently purged.
    pub purged: bool,
    /// Bytes reclaimed (moved to trash, or freed by the purge).
    pub bytes_freed: u64,
    /// Why cleanup did nothing, when it was skipped. Advisory, not an error.
    pub skipped: Option<String>,
}

impl CleanupOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            skipped: Some(reason.into()),
            ..Self::default()
        }
    }
}

/// JSON document written to `<root>/report.json` after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingReport {
    /// Catalog identifier of the item.
    pub identifier: String,
    /// Settings the run used.
    pub settings: SplitConfig,
    /// Input side file names, in processing order.
    pub sides: Vec<String>,
    /// Exported track file names, in export order.
    pub tracks: Vec<String>,
    /// Number of exported tracks.
    pub track_count: usize,
    /// Wall-clock seconds the run took.
    pub elapsed_secs: f64,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// Error message for a failed run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Cleanup outcome.
    pub cleanup: CleanupOutcome,
}
