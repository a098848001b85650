//! Segmentation engine and idempotent lifecycle layer.
//!
//! Turns a two-sided audio recording into a numbered sequence of track
//! files, safely re-runnable:
//!
//! - [`segmenter`] converts detected silence intervals into kept segments.
//! - [`exporter`] materializes segments as numbered tracks, tolerating
//!   per-segment failure.
//! - [`sequencer`] drives both per side, threading a continuing track
//!   counter across sides.
//! - [`validator`] decides whether an existing tracks directory is a
//!   complete, usable result.
//! - [`resume`] turns that verdict into skip / re-split / start-over.
//! - [`trash`] reclaims intermediate artifacts into a recoverable trash
//!   area instead of deleting them.
//!
//! All external audio work goes through [`tapesplit_media::AudioTool`], so
//! the whole pipeline runs against fakes in tests.

pub mod error;
pub mod exporter;
pub mod report;
pub mod resume;
pub mod segmenter;
pub mod sequencer;
pub mod trash;
pub mod validator;

pub use error::{PipelineError, PipelineResult};
pub use exporter::{export_segments, export_whole, ExportOutcome};
pub use report::write_report;
pub use resume::plan_resume;
pub use segmenter::segments_between;
pub use sequencer::process_sides;
pub use trash::{maybe_cleanup_item, move_to_trash, reclaim_if_ready, TrashedItem};
pub use validator::{validate_tracks, TracksValidation, MIN_TRACK_SECS};
