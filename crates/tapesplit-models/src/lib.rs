//! Shared data models for tapesplit.
//!
//! This crate provides Serde-serializable types for:
//! - Silence intervals and audible segments
//! - Exported tracks
//! - Segmentation and cleanup configuration
//! - Per-item directory layout
//! - The processing report artifact
//! - Resume verdicts

pub mod config;
pub mod layout;
pub mod report;
pub mod resume;
pub mod segment;
pub mod track;

// Re-export common types
pub use config::{CleanupConfig, CleanupLevel, SplitConfig};
pub use layout::ItemLayout;
pub use report::{CleanupOutcome, ProcessingReport};
pub use resume::ResumeVerdict;
pub use segment::{Segment, SilenceInterval};
pub use track::{track_file_name, Track};
