//! Trash-based disk reclamation.
//!
//! Intermediate artifacts are never unlinked directly: they move into a
//! timestamped, recoverable trash area. Permanent deletion happens only
//! through the explicit purge step.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use tapesplit_media::{fs_utils, AudioTool};
use tapesplit_models::{CleanupConfig, CleanupOutcome, ItemLayout};

use crate::error::{PipelineError, PipelineResult};
use crate::validator::{validate_tracks, TracksValidation};

/// A source path that was moved into the trash area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashedItem {
    /// Original location.
    pub source: PathBuf,
    /// Where it now lives under the trash root.
    pub destination: PathBuf,
    /// Size of the moved item (recursive sum for directories).
    pub bytes: u64,
}

/// Compute `<trash_root>/<identifier>/<timestamp>/<basename>`.
///
/// The timestamp uses filesystem-safe separators; millisecond granularity
/// keeps collisions unlikely, not impossible - an existing destination is a
/// hard error at move time.
pub fn trash_destination(
    trash_root: &Path,
    identifier: &str,
    basename: &std::ffi::OsStr,
    now: DateTime<Utc>,
) -> PathBuf {
    trash_root
        .join(identifier)
        .join(now.format("%Y%m%dT%H%M%S%3fZ").to_string())
        .join(basename)
}

/// Move a path into the trash area.
///
/// - Missing source: no-op, returns `None`.
/// - Dry-run: logs the intended destination, touches nothing, returns `None`.
/// - Otherwise: creates parents, refuses an existing destination, moves the
///   source (rename with cross-device fallback) and measures the moved size.
pub async fn move_to_trash(
    source: &Path,
    trash_root: &Path,
    identifier: &str,
    dry_run: bool,
) -> PipelineResult<Option<TrashedItem>> {
    if !source.exists() {
        debug!(source = %source.display(), "Nothing to reclaim, path does not exist");
        return Ok(None);
    }

    let basename = source
        .file_name()
        .ok_or_else(|| PipelineError::InvalidPath(source.to_path_buf()))?;
    let destination = trash_destination(trash_root, identifier, basename, Utc::now());

    if dry_run {
        info!(
            source = %source.display(),
            destination = %destination.display(),
            "Dry run: would move to trash"
        );
        return Ok(None);
    }

    if destination.exists() {
        return Err(PipelineError::TrashCollision(destination));
    }
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).await?;
    }

    fs_utils::move_path(source, &destination).await?;
    let bytes = fs_utils::path_size(&destination).await?;

    info!(
        source = %source.display(),
        destination = %destination.display(),
        bytes,
        "Moved to trash"
    );

    Ok(Some(TrashedItem {
        source: source.to_path_buf(),
        destination,
        bytes,
    }))
}

/// Reclaim a single file as soon as its prerequisite is confirmed.
///
/// Progressive variant used to shrink disk usage while a long multi-side run
/// is still in progress: the file moves only when the caller-supplied flag
/// says the artifact depending on it is already good.
pub async fn reclaim_if_ready(
    source: &Path,
    trash_root: &Path,
    identifier: &str,
    prerequisite_valid: bool,
    dry_run: bool,
) -> PipelineResult<Option<TrashedItem>> {
    if !prerequisite_valid {
        debug!(
            source = %source.display(),
            "Prerequisite not confirmed, keeping file"
        );
        return Ok(None);
    }
    move_to_trash(source, trash_root, identifier, dry_run).await
}

/// Gated cleanup for one item.
///
/// Runs only when cleanup is enabled and the run did not fail, and only
/// after re-validating the exported tracks: intermediate data is never
/// discarded unless the final artifact is confirmed good. Every skip is
/// advisory - recorded as a reason, never an error.
///
/// Candidates are currently just the raw-sources directory regardless of the
/// configured level. With `purge_trash` set, a successful non-dry-run move
/// is followed by an irreversible recursive delete of this identifier's
/// trash subtree.
pub async fn maybe_cleanup_item(
    tool: &dyn AudioTool,
    layout: &ItemLayout,
    config: &CleanupConfig,
    extension: &str,
    run_failed: bool,
) -> PipelineResult<CleanupOutcome> {
    if !config.cleanup {
        return Ok(CleanupOutcome::skipped("cleanup disabled"));
    }
    if run_failed {
        return Ok(CleanupOutcome::skipped("run failed, keeping intermediates"));
    }

    match validate_tracks(tool, &layout.tracks_dir(), extension).await? {
        TracksValidation::Invalid { reason } => {
            return Ok(CleanupOutcome::skipped(format!("tracks invalid: {reason}")));
        }
        TracksValidation::Valid { count } => {
            debug!(identifier = %layout.identifier, tracks = count, "Tracks confirmed good, cleaning up");
        }
    }

    let trash_root = config
        .trash_dir
        .clone()
        .unwrap_or_else(|| layout.default_trash_root());

    // Only raw/ is ever reclaimed today, whatever the configured level says
    let candidates = vec![layout.raw_dir()];

    let mut outcome = CleanupOutcome::default();
    for candidate in candidates {
        if let Some(item) =
            move_to_trash(&candidate, &trash_root, &layout.identifier, config.dry_run).await?
        {
            outcome.bytes_freed += item.bytes;
            outcome.moved.push(item.source.display().to_string());
        }
    }

    if config.dry_run {
        outcome.skipped = Some("dry run, no changes made".to_string());
        return Ok(outcome);
    }

    if config.purge_trash && !outcome.moved.is_empty() {
        let subtree = trash_root.join(&layout.identifier);
        let freed = fs_utils::path_size(&subtree).await.unwrap_or(0);
        fs::remove_dir_all(&subtree).await?;
        outcome.purged = true;
        outcome.bytes_freed = freed;
        info!(
            identifier = %layout.identifier,
            bytes_freed = freed,
            "Purged trash subtree"
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_move_to_trash_missing_source_is_noop() {
        let dir = TempDir::new().unwrap();
        let result = move_to_trash(
            &dir.path().join("gone"),
            &dir.path().join(".trash"),
            "tape-77",
            false,
        )
        .await
        .unwrap();
        assert!(result.is_none());
        assert!(!dir.path().join(".trash").exists());
    }

    #[tokio::test]
    async fn test_move_to_trash_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("raw");
        fs::create_dir_all(&source).await.unwrap();
        fs::write(source.join("side_a.mp3"), b"aaaa").await.unwrap();

        let result = move_to_trash(&source, &dir.path().join(".trash"), "tape-77", true)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(source.join("side_a.mp3").exists());
        assert!(!dir.path().join(".trash").exists());
    }

    #[tokio::test]
    async fn test_move_to_trash_moves_and_measures() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("raw");
        fs::create_dir_all(&source).await.unwrap();
        fs::write(source.join("side_a.mp3"), vec![0u8; 64])
            .await
            .unwrap();
        fs::write(source.join("side_b.mp3"), vec![0u8; 36])
            .await
            .unwrap();

        let trash = dir.path().join(".trash");
        let item = move_to_trash(&source, &trash, "tape-77", false)
            .await
            .unwrap()
            .expect("item should be moved");

        assert!(!source.exists(), "source must be gone after the move");
        assert!(item.destination.starts_with(trash.join("tape-77")));
        assert_eq!(item.destination.file_name().unwrap(), "raw");
        assert_eq!(item.bytes, 100);
        assert!(item.destination.join("side_a.mp3").exists());
    }

    #[tokio::test]
    async fn test_reclaim_if_ready_keeps_file_when_not_ready() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("side_a.mp3");
        fs::write(&file, b"aaaa").await.unwrap();

        let result = reclaim_if_ready(&file, &dir.path().join(".trash"), "tape-77", false, false)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(file.exists());
    }

    #[tokio::test]
    async fn test_reclaim_if_ready_moves_when_ready() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("side_a.mp3");
        fs::write(&file, b"aaaa").await.unwrap();

        let result = reclaim_if_ready(&file, &dir.path().join(".trash"), "tape-77", true, false)
            .await
            .unwrap();

        assert!(result.is_some());
        assert!(!file.exists());
    }

    #[test]
    fn test_trash_destination_shape() {
        let now = DateTime::parse_from_rfc3339("2026-08-23T10:20:30.456Z")
            .unwrap()
            .with_timezone(&Utc);
        let dest = trash_destination(
            Path::new("/out/.trash"),
            "tape-77",
            std::ffi::OsStr::new("raw"),
            now,
        );
        assert_eq!(
            dest,
            Path::new("/out/.trash/tape-77/20260823T102030456Z/raw")
        );
    }
}
