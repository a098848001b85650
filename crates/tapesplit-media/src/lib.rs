//! FFmpeg CLI wrapper for audio splitting.
//!
//! Wraps the external ffmpeg/ffprobe executables behind typed operations:
//! - Silence detection (`silencedetect` filter, null sink)
//! - Duration probing (ffprobe JSON)
//! - Lossless time-range extraction (stream copy)
//! - Cross-device filesystem moves and size accounting
//!
//! The [`tool::AudioTool`] trait is the seam the pipeline crate consumes.

pub mod command;
pub mod error;
pub mod extract;
pub mod fs_utils;
pub mod probe;
pub mod silence;
pub mod tool;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use probe::AudioInfo;
pub use tool::{AudioTool, Ffmpeg};
