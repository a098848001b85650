//! Exported track files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A finalized, exported, numbered output file.
///
/// Indices are 1-based and global across all sides of one item: strictly
/// increasing in export order and never reused, because the running counter
/// is threaded from one side's result into the next side's starting point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Global 1-based track number within the item.
    pub index: u32,
    /// Path of the exported file.
    pub path: PathBuf,
    /// Which side file this track came from (e.g. the side file name).
    pub side: String,
}

/// Width of the zero-padded number in track file names (`track_001.mp3`).
pub const TRACK_INDEX_WIDTH: usize = 3;

/// Synthesize the file name for a track index, e.g. `track_007.mp3`.
pub fn track_file_name(index: u32, extension: &str) -> String {
    format!("track_{index:0width$}.{extension}", width = TRACK_INDEX_WIDTH)
}
