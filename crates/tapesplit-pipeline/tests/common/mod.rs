//! In-memory fake of the external audio executable.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tapesplit_media::{AudioTool, MediaError, MediaResult};
use tapesplit_models::SilenceInterval;

/// Fake [`AudioTool`] driven entirely by registered fixtures.
///
/// "Extraction" writes a small placeholder file and records its duration so
/// that the validator can later probe it; analysis and probing look up
/// registered values instead of spawning anything.
#[derive(Default)]
pub struct FakeTool {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    silences: HashMap<PathBuf, Vec<SilenceInterval>>,
    durations: HashMap<PathBuf, f64>,
    fail_analysis: HashSet<PathBuf>,
    /// (start, end) ranges whose extraction fails.
    fail_ranges: Vec<(f64, f64)>,
    extract_calls: Vec<(PathBuf, f64, f64)>,
}

impl FakeTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a side file with its total duration and detected silences.
    pub fn with_side(
        self,
        path: impl AsRef<Path>,
        duration: f64,
        silences: Vec<SilenceInterval>,
    ) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.durations.insert(path.as_ref().to_path_buf(), duration);
            inner.silences.insert(path.as_ref().to_path_buf(), silences);
        }
        self
    }

    /// Make extraction of a specific range fail.
    pub fn fail_range(self, start: f64, end: f64) -> Self {
        self.inner.lock().unwrap().fail_ranges.push((start, end));
        self
    }

    /// Make silence analysis of a file fail.
    pub fn fail_analysis(self, path: impl AsRef<Path>) -> Self {
        self.inner
            .lock()
            .unwrap()
            .fail_analysis
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Register a probed duration for an already-existing file.
    pub fn set_duration(&self, path: impl AsRef<Path>, duration: f64) {
        self.inner
            .lock()
            .unwrap()
            .durations
            .insert(path.as_ref().to_path_buf(), duration);
    }

    /// All extraction calls seen so far, in order.
    pub fn extract_calls(&self) -> Vec<(PathBuf, f64, f64)> {
        self.inner.lock().unwrap().extract_calls.clone()
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[async_trait]
impl AudioTool for FakeTool {
    async fn detect_silences(
        &self,
        input: &Path,
        _noise_db: f64,
        _min_silence: f64,
    ) -> MediaResult<Vec<SilenceInterval>> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_analysis.contains(input) {
            return Err(MediaError::ffmpeg_failed(
                "fake analysis failure",
                None,
                Some(1),
            ));
        }
        Ok(inner.silences.get(input).cloned().unwrap_or_default())
    }

    async fn duration_secs(&self, input: &Path) -> MediaResult<f64> {
        let inner = self.inner.lock().unwrap();
        inner
            .durations
            .get(input)
            .copied()
            .ok_or_else(|| MediaError::ffprobe_failed("fake probe failure", None))
    }

    async fn extract_range(
        &self,
        input: &Path,
        output: &Path,
        start_secs: f64,
        end_secs: f64,
    ) -> MediaResult<()> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner
                .extract_calls
                .push((input.to_path_buf(), start_secs, end_secs));
            if inner
                .fail_ranges
                .iter()
                .any(|(s, e)| approx(*s, start_secs) && approx(*e, end_secs))
            {
                return Err(MediaError::ffmpeg_failed(
                    "fake extract failure",
                    None,
                    Some(1),
                ));
            }
        }

        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(output, format!("{start_secs:.3}-{end_secs:.3}")).await?;

        self.inner
            .lock()
            .unwrap()
            .durations
            .insert(output.to_path_buf(), end_secs - start_secs);
        Ok(())
    }

    async fn copy_full(&self, input: &Path, output: &Path) -> MediaResult<()> {
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::copy(input, output).await?;

        let mut inner = self.inner.lock().unwrap();
        if let Some(duration) = inner.durations.get(input).copied() {
            inner.durations.insert(output.to_path_buf(), duration);
        }
        Ok(())
    }
}
