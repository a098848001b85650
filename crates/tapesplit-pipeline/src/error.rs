//! Pipeline error types.

use std::path::PathBuf;
use thiserror::Error;

use tapesplit_media::MediaError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Silence analysis failed for a side. Aborts the side.
    #[error("Silence analysis failed for {side}: {source}")]
    AnalysisFailed {
        side: String,
        #[source]
        source: MediaError,
    },

    /// Intro trim failed. Fatal: all subsequent offsets would be computed
    /// against the wrong file.
    #[error("Intro trim failed for {side}: {source}")]
    TrimFailed {
        side: String,
        #[source]
        source: MediaError,
    },

    /// A trash destination already exists. Collisions are an error, never
    /// silently resolved.
    #[error("Trash destination already exists: {0}")]
    TrashCollision(PathBuf),

    /// A path with no usable file name was handed to the reclaimer.
    #[error("Path has no file name: {0}")]
    InvalidPath(PathBuf),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn analysis_failed(side: impl Into<String>, source: MediaError) -> Self {
        Self::AnalysisFailed {
            side: side.into(),
            source,
        }
    }

    pub fn trim_failed(side: impl Into<String>, source: MediaError) -> Self {
        Self::TrimFailed {
            side: side.into(),
            source,
        }
    }
}
