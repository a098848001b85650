//! Filesystem utilities for cross-device moves and size accounting.
//!
//! Trash directories commonly live on a different filesystem than the
//! working directory, so moves must handle the EXDEV error gracefully.

use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{MediaError, MediaResult};

/// Move a file or directory from `src` to `dst`, handling cross-device moves.
///
/// Attempts a fast rename first. On EXDEV (cross-device link error) it falls
/// back to copy-and-delete: files are copied through a temp name and renamed
/// into place, directories are copied recursively then removed.
pub async fn move_path(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            tracing::debug!(
                "Cross-device rename detected, falling back to copy+delete: {} -> {}",
                src.display(),
                dst.display()
            );
            let meta = fs::metadata(src).await?;
            if meta.is_dir() {
                copy_dir_all(src, dst).await?;
                fs::remove_dir_all(src).await?;
            } else {
                copy_and_delete_file(src, dst).await?;
            }
            Ok(())
        }
        Err(e) => Err(MediaError::from(e)),
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    // EXDEV is error code 18 on Linux/macOS
    e.raw_os_error() == Some(18)
}

/// Copy a file to destination (via temp file) then delete the source.
async fn copy_and_delete_file(src: &Path, dst: &Path) -> MediaResult<()> {
    // Copy to a temp file next to dst so the final rename stays on one filesystem
    let tmp_dst = dst.with_extension("tmp");

    fs::copy(src, &tmp_dst).await?;

    if let Err(e) = fs::rename(&tmp_dst, dst).await {
        let _ = fs::remove_file(&tmp_dst).await;
        return Err(MediaError::from(e));
    }

    // Best effort - the move already succeeded from the caller's view
    if let Err(e) = fs::remove_file(src).await {
        tracing::warn!(
            "Failed to remove source after cross-device move: {}: {}",
            src.display(),
            e
        );
    }

    Ok(())
}

/// Recursively copy a directory tree. Iterative to keep the future `Send`.
async fn copy_dir_all(src: &Path, dst: &Path) -> MediaResult<()> {
    let mut stack = vec![(src.to_path_buf(), dst.to_path_buf())];

    while let Some((from, to)) = stack.pop() {
        fs::create_dir_all(&to).await?;
        let mut entries = fs::read_dir(&from).await?;
        while let Some(entry) = entries.next_entry().await? {
            let from_child = entry.path();
            let to_child = to.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                stack.push((from_child, to_child));
            } else {
                fs::copy(&from_child, &to_child).await?;
            }
        }
    }

    Ok(())
}

/// Total size in bytes of a file, or the recursive sum for a directory.
pub async fn path_size(path: impl AsRef<Path>) -> MediaResult<u64> {
    let path = path.as_ref();
    let meta = fs::symlink_metadata(path).await?;

    if !meta.is_dir() {
        return Ok(meta.len());
    }

    let mut total = 0u64;
    let mut stack = vec![path.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if meta.is_dir() {
                stack.push(entry.path());
            } else {
                total += meta.len();
            }
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_move_file_same_filesystem() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("source.mp3");
        let dst = dir.path().join("trash").join("source.mp3");

        fs::write(&src, b"audio").await.unwrap();

        move_path(&src, &dst).await.unwrap();

        assert!(!src.exists(), "Source file should be removed");
        assert_eq!(fs::read(&dst).await.unwrap(), b"audio");
    }

    #[tokio::test]
    async fn test_move_directory() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("raw");
        fs::create_dir_all(src.join("nested")).await.unwrap();
        fs::write(src.join("side_a.mp3"), b"aaaa").await.unwrap();
        fs::write(src.join("nested").join("side_b.mp3"), b"bb")
            .await
            .unwrap();

        let dst = dir.path().join("trash").join("raw");
        move_path(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert_eq!(
            fs::read(dst.join("nested").join("side_b.mp3"))
                .await
                .unwrap(),
            b"bb"
        );
    }

    #[tokio::test]
    async fn test_path_size_file_and_dir() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.mp3");
        fs::write(&file, vec![0u8; 100]).await.unwrap();
        assert_eq!(path_size(&file).await.unwrap(), 100);

        let sub = dir.path().join("raw");
        fs::create_dir_all(sub.join("deep")).await.unwrap();
        fs::write(sub.join("x"), vec![0u8; 10]).await.unwrap();
        fs::write(sub.join("deep").join("y"), vec![0u8; 5])
            .await
            .unwrap();
        assert_eq!(path_size(&sub).await.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_path_size_missing() {
        let dir = TempDir::new().unwrap();
        assert!(path_size(dir.path().join("gone")).await.is_err());
    }
}
