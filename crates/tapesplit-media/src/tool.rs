//! Capability trait over the external audio executable.
//!
//! The pipeline never shells out directly; it goes through [`AudioTool`] so
//! the core algorithms are testable against fakes without spawning a real
//! subprocess.

use async_trait::async_trait;
use std::path::Path;

use tapesplit_models::SilenceInterval;

use crate::error::MediaResult;
use crate::{extract, probe, silence};

/// External audio-processing operations the pipeline depends on.
#[async_trait]
pub trait AudioTool: Send + Sync {
    /// Detect quiet gaps in `input`.
    async fn detect_silences(
        &self,
        input: &Path,
        noise_db: f64,
        min_silence: f64,
    ) -> MediaResult<Vec<SilenceInterval>>;

    /// Report the total duration of `input` in seconds.
    async fn duration_secs(&self, input: &Path) -> MediaResult<f64>;

    /// Losslessly extract `[start, end)` seconds of `input` into `output`.
    async fn extract_range(
        &self,
        input: &Path,
        output: &Path,
        start_secs: f64,
        end_secs: f64,
    ) -> MediaResult<()>;

    /// Copy `input` verbatim to `output`.
    async fn copy_full(&self, input: &Path, output: &Path) -> MediaResult<()>;
}

/// Production [`AudioTool`] backed by the ffmpeg/ffprobe binaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ffmpeg;

impl Ffmpeg {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioTool for Ffmpeg {
    async fn detect_silences(
        &self,
        input: &Path,
        noise_db: f64,
        min_silence: f64,
    ) -> MediaResult<Vec<SilenceInterval>> {
        silence::detect_silences(input, noise_db, min_silence).await
    }

    async fn duration_secs(&self, input: &Path) -> MediaResult<f64> {
        probe::duration_secs(input).await
    }

    async fn extract_range(
        &self,
        input: &Path,
        output: &Path,
        start_secs: f64,
        end_secs: f64,
    ) -> MediaResult<()> {
        extract::extract_range(input, output, start_secs, end_secs).await
    }

    async fn copy_full(&self, input: &Path, output: &Path) -> MediaResult<()> {
        extract::copy_full(input, output).await
    }
}
