//! Lossless byte-range extraction.

use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Extract a time range from an audio file without re-encoding.
///
/// Stream copy keeps the original bytes, so cuts snap to frame boundaries;
/// that is well within tolerance for track gaps measured in seconds.
pub async fn extract_range(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    start_secs: f64,
    end_secs: f64,
) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if end_secs <= start_secs {
        return Err(MediaError::InvalidRange {
            start: start_secs,
            end: end_secs,
        });
    }

    info!(
        "Extracting range: {} -> {} (start: {:.2}s, end: {:.2}s)",
        input.display(),
        output.display(),
        start_secs,
        end_secs
    );

    let cmd = FfmpegCommand::new(input, output)
        .seek(start_secs)
        .duration(end_secs - start_secs)
        .codec_copy();

    FfmpegRunner::new().run(&cmd).await?;
    Ok(())
}

/// Copy a whole file verbatim. Used for the zero-silence case where the
/// entire input becomes one track.
pub async fn copy_full(input: impl AsRef<Path>, output: impl AsRef<Path>) -> MediaResult<()> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    if let Some(parent) = output.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    fs::copy(input, output).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_extract_rejects_inverted_range() {
        let err = extract_range("in.mp3", "out.mp3", 30.0, 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn test_copy_full() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("side_a.mp3");
        let dst = dir.path().join("tracks").join("track_001.mp3");

        fs::write(&src, b"audio bytes").await.unwrap();
        copy_full(&src, &dst).await.unwrap();

        assert!(src.exists(), "source is untouched");
        assert_eq!(fs::read(&dst).await.unwrap(), b"audio bytes");
    }

    #[tokio::test]
    async fn test_copy_full_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = copy_full(dir.path().join("gone.mp3"), dir.path().join("out.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
