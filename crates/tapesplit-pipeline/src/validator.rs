//! Output validation: is an existing tracks directory a usable result?

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use tapesplit_media::AudioTool;

use crate::error::PipelineResult;

/// Tracks shorter than this are treated as split artifacts, not real tracks.
pub const MIN_TRACK_SECS: f64 = 10.0;

/// Verdict on an existing tracks directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TracksValidation {
    /// The directory is a complete, usable result.
    Valid { count: usize },
    /// The first violated check.
    Invalid { reason: String },
}

impl TracksValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

/// Validate a tracks directory, short-circuiting on the first failure.
///
/// Checks: the directory exists; it holds at least one file with the
/// expected extension; every such file probes at least [`MIN_TRACK_SECS`]
/// long. A probe error for any one file invalidates the whole directory
/// (fail-fast, not aggregate) - resume semantics depend on this policy.
pub async fn validate_tracks(
    tool: &dyn AudioTool,
    tracks_dir: &Path,
    extension: &str,
) -> PipelineResult<TracksValidation> {
    if !tracks_dir.is_dir() {
        return Ok(TracksValidation::invalid("tracks/ directory not found"));
    }

    let files = audio_files(tracks_dir, extension).await?;
    if files.is_empty() {
        return Ok(TracksValidation::invalid(format!(
            "no .{extension} files in tracks/"
        )));
    }

    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        match tool.duration_secs(file).await {
            Ok(duration) if duration >= MIN_TRACK_SECS => {
                debug!(track = %name, duration = format!("{duration:.1}s"), "Track probe ok");
            }
            Ok(duration) => {
                return Ok(TracksValidation::invalid(format!(
                    "{name} is too short ({duration:.1}s)"
                )));
            }
            Err(e) => {
                return Ok(TracksValidation::invalid(format!(
                    "failed to probe {name}: {e}"
                )));
            }
        }
    }

    Ok(TracksValidation::Valid { count: files.len() })
}

/// List files with the expected extension, sorted by name so probing (and
/// any reported failure) follows track order.
async fn audio_files(dir: &Path, extension: &str) -> PipelineResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches = path
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches && entry.file_type().await?.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
