//! Track export: materializing segments as numbered files.

use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

use tapesplit_media::AudioTool;
use tapesplit_models::{track_file_name, Segment, Track};

use crate::error::PipelineResult;

/// Result of exporting one side (or one batch of segments).
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Tracks in export order.
    pub tracks: Vec<Track>,
    /// First unused global track index.
    pub next_index: u32,
}

impl ExportOutcome {
    pub fn empty(next_index: u32) -> Self {
        Self {
            tracks: Vec::new(),
            next_index,
        }
    }
}

/// Export segments as sequential numbered track files.
///
/// A failed export is logged and skipped: the remaining segments still run,
/// and the counter is NOT advanced, so no number is reserved for a file that
/// does not exist.
pub async fn export_segments(
    tool: &dyn AudioTool,
    input: &Path,
    tracks_dir: &Path,
    segments: &[Segment],
    start_index: u32,
    extension: &str,
    side: &str,
) -> PipelineResult<ExportOutcome> {
    fs::create_dir_all(tracks_dir).await?;

    let mut tracks = Vec::new();
    let mut index = start_index;

    for segment in segments {
        let path = tracks_dir.join(track_file_name(index, extension));

        match tool
            .extract_range(input, &path, segment.start, segment.end)
            .await
        {
            Ok(()) => {
                info!(
                    side = side,
                    index,
                    start = format!("{:.2}", segment.start),
                    end = format!("{:.2}", segment.end),
                    "Exported track {}",
                    path.display()
                );
                tracks.push(Track {
                    index,
                    path,
                    side: side.to_string(),
                });
                index += 1;
            }
            Err(e) => {
                warn!(
                    side = side,
                    index,
                    start = format!("{:.2}", segment.start),
                    end = format!("{:.2}", segment.end),
                    error = %e,
                    "Segment export failed, skipping"
                );
            }
        }
    }

    Ok(ExportOutcome {
        tracks,
        next_index: index,
    })
}

/// Export an entire working file verbatim as a single track.
///
/// Used when no silence was detected on a side: the converter is bypassed
/// and the whole input is one track.
pub async fn export_whole(
    tool: &dyn AudioTool,
    input: &Path,
    tracks_dir: &Path,
    start_index: u32,
    extension: &str,
    side: &str,
) -> PipelineResult<ExportOutcome> {
    fs::create_dir_all(tracks_dir).await?;

    let path = tracks_dir.join(track_file_name(start_index, extension));

    match tool.copy_full(input, &path).await {
        Ok(()) => {
            info!(
                side = side,
                index = start_index,
                "Exported whole side as track {}",
                path.display()
            );
            Ok(ExportOutcome {
                tracks: vec![Track {
                    index: start_index,
                    path,
                    side: side.to_string(),
                }],
                next_index: start_index + 1,
            })
        }
        Err(e) => {
            warn!(
                side = side,
                index = start_index,
                error = %e,
                "Whole-side export failed, skipping"
            );
            Ok(ExportOutcome::empty(start_index))
        }
    }
}
