//! Writing the per-item report artifact.

use tokio::fs;
use tracing::info;

use tapesplit_models::{ItemLayout, ProcessingReport};

use crate::error::PipelineResult;

/// Write `report.json` into the item directory.
pub async fn write_report(layout: &ItemLayout, report: &ProcessingReport) -> PipelineResult<()> {
    fs::create_dir_all(&layout.root).await?;

    let mut json = serde_json::to_vec_pretty(report)?;
    json.push(b'\n');

    let path = layout.report_path();
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tapesplit_models::{CleanupOutcome, SplitConfig};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_report_creates_item_dir() {
        let out = TempDir::new().unwrap();
        let layout = ItemLayout::new(out.path(), "tape-77");

        let report = ProcessingReport {
            identifier: "tape-77".to_string(),
            settings: SplitConfig::default(),
            sides: vec!["side_a.mp3".to_string()],
            tracks: vec!["track_001.mp3".to_string()],
            track_count: 1,
            elapsed_secs: 3.25,
            finished_at: Utc::now(),
            error: None,
            cleanup: CleanupOutcome::skipped("cleanup disabled"),
        };

        write_report(&layout, &report).await.unwrap();

        let text = fs::read_to_string(layout.report_path()).await.unwrap();
        let back: ProcessingReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back.identifier, "tape-77");
        assert_eq!(back.track_count, 1);
    }
}
