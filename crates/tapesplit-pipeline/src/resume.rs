//! Resume planning: skip, re-split, or start over.

use tracing::{debug, info};

use tapesplit_media::AudioTool;
use tapesplit_models::{ItemLayout, ResumeVerdict};

use crate::error::PipelineResult;
use crate::validator::{validate_tracks, TracksValidation};

/// Decide what a re-run on this item directory needs to do.
///
/// A pure function of on-disk state: no persisted "last run" record exists,
/// so correctness of resumption relies entirely on the validator being
/// accurate.
pub async fn plan_resume(
    tool: &dyn AudioTool,
    layout: &ItemLayout,
    extension: &str,
) -> PipelineResult<ResumeVerdict> {
    match validate_tracks(tool, &layout.tracks_dir(), extension).await? {
        TracksValidation::Valid { count } => {
            info!(
                identifier = %layout.identifier,
                tracks = count,
                "Existing tracks are valid, skipping"
            );
            Ok(ResumeVerdict::Skip)
        }
        TracksValidation::Invalid { reason } => {
            debug!(identifier = %layout.identifier, reason = %reason, "Tracks not usable");
            if layout.raw_dir().is_dir() {
                Ok(ResumeVerdict::NeedsSplitOnly)
            } else {
                Ok(ResumeVerdict::NeedsFullProcessing)
            }
        }
    }
}
