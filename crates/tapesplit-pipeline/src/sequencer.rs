//! Per-side sequencing with cross-side numbering continuity.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use tapesplit_media::AudioTool;
use tapesplit_models::SplitConfig;

use crate::error::{PipelineError, PipelineResult};
use crate::exporter::{export_segments, export_whole, ExportOutcome};
use crate::segmenter::segments_between;

/// Process side files in order, threading the running track index from each
/// side's result into the next side's starting point.
///
/// Sides run strictly sequentially: numbering correctness depends on each
/// side observing the prior side's final index. The concatenated track list
/// is in processing order.
pub async fn process_sides(
    tool: &dyn AudioTool,
    tracks_dir: &Path,
    sides: &[PathBuf],
    config: &SplitConfig,
) -> PipelineResult<ExportOutcome> {
    let mut tracks = Vec::new();
    let mut index = config.start_index;

    for side_path in sides {
        let side = side_name(side_path);
        info!(side = %side, start_index = index, "Processing side");

        let working = prepare_working_file(tool, side_path, config.intro_trim_sec, &side).await?;

        let result = process_one_side(tool, working.path(), tracks_dir, index, config, &side).await;

        // The trimmed temp copy goes away on every exit path
        working.cleanup().await;

        let outcome = result?;
        index = outcome.next_index;
        tracks.extend(outcome.tracks);
    }

    Ok(ExportOutcome {
        tracks,
        next_index: index,
    })
}

/// Run analysis → converter → exporter for one side file.
async fn process_one_side(
    tool: &dyn AudioTool,
    working: &Path,
    tracks_dir: &Path,
    start_index: u32,
    config: &SplitConfig,
    side: &str,
) -> PipelineResult<ExportOutcome> {
    let silences = tool
        .detect_silences(working, config.noise_db, config.min_silence)
        .await
        .map_err(|source| PipelineError::analysis_failed(side, source))?;

    if silences.is_empty() {
        info!(side = side, "No silence detected, exporting whole side as one track");
        return export_whole(tool, working, tracks_dir, start_index, &config.extension, side).await;
    }

    let total = tool
        .duration_secs(working)
        .await
        .map_err(|source| PipelineError::analysis_failed(side, source))?;

    let segments = segments_between(&silences, total, config.min_segment);
    debug!(
        side = side,
        silences = silences.len(),
        kept = segments.len(),
        "Segmentation complete"
    );

    export_segments(
        tool,
        working,
        tracks_dir,
        &segments,
        start_index,
        &config.extension,
        side,
    )
    .await
}

/// The file a side's analysis and exports actually read: either the original
/// side file, or a trimmed temporary copy that must be removed afterwards.
struct WorkingFile {
    path: PathBuf,
    is_temp: bool,
}

impl WorkingFile {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn cleanup(self) {
        if self.is_temp {
            if let Err(e) = fs::remove_file(&self.path).await {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove trimmed working copy"
                );
            }
        }
    }
}

/// Apply the configured intro trim, if any.
///
/// Trim failure is fatal (propagated, never skipped): silence detection and
/// every subsequent offset would be meaningless against the wrong file.
async fn prepare_working_file(
    tool: &dyn AudioTool,
    side_path: &Path,
    intro_trim_sec: f64,
    side: &str,
) -> PipelineResult<WorkingFile> {
    if intro_trim_sec <= 0.0 {
        return Ok(WorkingFile {
            path: side_path.to_path_buf(),
            is_temp: false,
        });
    }

    let total = tool
        .duration_secs(side_path)
        .await
        .map_err(|source| PipelineError::trim_failed(side, source))?;

    let trimmed = trimmed_path(side_path);
    info!(
        side = side,
        trim = format!("{intro_trim_sec:.2}s"),
        "Trimming intro into {}",
        trimmed.display()
    );

    tool.extract_range(side_path, &trimmed, intro_trim_sec, total)
        .await
        .map_err(|source| PipelineError::trim_failed(side, source))?;

    Ok(WorkingFile {
        path: trimmed,
        is_temp: true,
    })
}

/// Temp name for the trimmed copy, next to the source file.
fn trimmed_path(side_path: &Path) -> PathBuf {
    let stem = side_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "side".to_string());
    let ext = side_path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "bin".to_string());
    side_path.with_file_name(format!(".{stem}_trimmed.{ext}"))
}

fn side_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_path_is_hidden_sibling() {
        let p = trimmed_path(Path::new("/work/raw/side_a.mp3"));
        assert_eq!(p, Path::new("/work/raw/.side_a_trimmed.mp3"));
    }

    #[test]
    fn test_side_name() {
        assert_eq!(side_name(Path::new("/work/raw/side_b.mp3")), "side_b.mp3");
    }
}
