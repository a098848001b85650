//! Silence detection via FFmpeg's `silencedetect` filter.
//!
//! FFmpeg reports detected gaps as log lines on stderr:
//!
//! ```text
//! [silencedetect @ 0x5602...] silence_start: 10.2478
//! [silencedetect @ 0x5602...] silence_end: 11.0133 | silence_duration: 0.765542
//! ```
//!
//! The run writes to a null sink, so detection never touches the input.

use std::path::Path;
use tracing::{debug, info};

use tapesplit_models::SilenceInterval;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Detect quiet gaps in an audio file.
///
/// # Arguments
/// * `input` - Path to the audio file
/// * `noise_db` - Silence threshold in dB (e.g. -35.0)
/// * `min_silence` - Minimum gap duration in seconds for a gap to register
pub async fn detect_silences(
    input: impl AsRef<Path>,
    noise_db: f64,
    min_silence: f64,
) -> MediaResult<Vec<SilenceInterval>> {
    let input = input.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let cmd = FfmpegCommand::analysis(input)
        .audio_filter(format!("silencedetect=noise={noise_db}dB:d={min_silence}"));

    let output = FfmpegRunner::new().run(&cmd).await?;
    let intervals = parse_silence_log(&output.stderr);

    info!(
        input = %input.display(),
        count = intervals.len(),
        "Silence detection complete"
    );

    Ok(intervals)
}

/// Parse `silencedetect` log lines into intervals.
///
/// Start/end markers arrive strictly paired in stream order. A trailing
/// `silence_start` with no matching end means the file ran out while silent;
/// the open gap is dropped and the caller's trailing-segment handling covers
/// the tail.
pub fn parse_silence_log(log: &str) -> Vec<SilenceInterval> {
    let mut intervals = Vec::new();
    let mut pending_start: Option<f64> = None;

    for line in log.lines() {
        if let Some(value) = field_value(line, "silence_start:") {
            if let Ok(start) = value.parse::<f64>() {
                pending_start = Some(start);
            }
        } else if let Some(value) = field_value(line, "silence_end:") {
            let Some(start) = pending_start.take() else {
                continue;
            };
            if let Ok(end) = value.parse::<f64>() {
                if end > start {
                    intervals.push(SilenceInterval::new(start, end));
                }
            }
        }
    }

    if let Some(start) = pending_start {
        debug!(start, "Silence open at end of file, dropping unterminated gap");
    }

    intervals
}

/// Extract the first whitespace-delimited token after `marker` in `line`.
fn field_value<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = line.split_once(marker)?;
    rest.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LOG: &str = "\
Input #0, mp3, from 'side_a.mp3':
  Duration: 00:01:00.00, start: 0.000000, bitrate: 128 kb/s
[silencedetect @ 0x5602a1b2c3d0] silence_start: 10
[silencedetect @ 0x5602a1b2c3d0] silence_end: 11 | silence_duration: 1
[silencedetect @ 0x5602a1b2c3d0] silence_start: 45.0038
[silencedetect @ 0x5602a1b2c3d0] silence_end: 46.0125 | silence_duration: 1.00875
size=N/A time=00:01:00.00 bitrate=N/A speed= 512x
";

    #[test]
    fn test_parse_silence_log() {
        let intervals = parse_silence_log(SAMPLE_LOG);
        assert_eq!(intervals.len(), 2);
        assert!((intervals[0].start - 10.0).abs() < 1e-9);
        assert!((intervals[0].end - 11.0).abs() < 1e-9);
        assert!((intervals[1].start - 45.0038).abs() < 1e-9);
        assert!((intervals[1].duration - 1.0087).abs() < 1e-3);
    }

    #[test]
    fn test_parse_empty_log() {
        assert!(parse_silence_log("").is_empty());
        assert!(parse_silence_log("frame=  100 fps=0.0 size=N/A\n").is_empty());
    }

    #[test]
    fn test_unterminated_start_is_dropped() {
        let log = "[silencedetect @ 0x0] silence_start: 55.5\n";
        assert!(parse_silence_log(log).is_empty());
    }

    #[test]
    fn test_end_without_start_is_ignored() {
        let log = "[silencedetect @ 0x0] silence_end: 12.0 | silence_duration: 1.0\n";
        assert!(parse_silence_log(log).is_empty());
    }

    #[test]
    fn test_zero_length_gap_is_ignored() {
        let log = "\
[silencedetect @ 0x0] silence_start: 5.0
[silencedetect @ 0x0] silence_end: 5.0 | silence_duration: 0
";
        assert!(parse_silence_log(log).is_empty());
    }
}
