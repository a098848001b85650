//! Silence intervals and audible segments.

use serde::{Deserialize, Serialize};

/// A quiet gap detected in a side file.
///
/// Intervals arrive in log order: monotonically non-decreasing by start and
/// non-overlapping. Times are seconds from the start of the file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceInterval {
    /// Start of the silence in seconds.
    pub start: f64,
    /// End of the silence in seconds (always > start).
    pub end: f64,
    /// Length of the silence in seconds.
    pub duration: f64,
}

impl SilenceInterval {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            duration: end - start,
        }
    }
}

/// A maximal audible span between two silences (or between the file
/// boundaries and the nearest silence).
///
/// Segments are derived and transient: computed, exported, discarded within
/// one side's processing. They are never persisted independently of tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start of the audible span in seconds.
    pub start: f64,
    /// End of the audible span in seconds.
    pub end: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_duration() {
        let i = SilenceInterval::new(10.0, 11.5);
        assert!((i.duration - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_segment_duration() {
        let s = Segment::new(11.0, 45.0);
        assert!((s.duration() - 34.0).abs() < 1e-9);
    }
}
