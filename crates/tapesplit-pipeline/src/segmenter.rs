//! Silence-interval to kept-segment conversion.
//!
//! A side file is a sequence of audible spans separated by detected quiet
//! gaps. The sweep below walks the gaps in arrival order and keeps every
//! audible span that is long enough to plausibly be a track.

use tapesplit_models::{Segment, SilenceInterval};

/// Convert ordered silence intervals into kept segments.
///
/// Maintains a `last_end` cursor starting at 0. For each gap, the candidate
/// span `[last_end, gap.start)` is kept iff it is at least `min_segment`
/// seconds long; the cursor advances to `gap.end` whether or not the
/// candidate was kept. The trailing span `[last_end, total_duration)` gets
/// the same keep-or-drop test.
///
/// Output segments are disjoint, ordered by start time, and each at least
/// `min_segment` seconds long. The result may be empty.
pub fn segments_between(
    silences: &[SilenceInterval],
    total_duration: f64,
    min_segment: f64,
) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0.0_f64;

    for gap in silences {
        if gap.start > last_end {
            let candidate = Segment::new(last_end, gap.start);
            if candidate.duration() >= min_segment {
                segments.push(candidate);
            }
        }
        last_end = gap.end;
    }

    if total_duration > last_end {
        let tail = Segment::new(last_end, total_duration);
        if tail.duration() >= min_segment {
            segments.push(tail);
        }
    }

    segments
}
