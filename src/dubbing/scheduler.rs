/*!
 * Duration-fitting scheduler.
 *
 * Takes aggregated dialogue entries in start order and grows each one's time
 * window until it can plausibly hold its spoken text: first into trailing
 * silence before the next entry, then (for the last entry) without bound,
 * then backward into leading silence, and as a last resort by overlapping
 * the following neighbor. Dialogue text is never truncated; an infeasible
 * fit produces an overlapping segment flagged as such, not a shorter one.
 *
 * The scheduler is a total function: no I/O, no failure modes, and empty
 * input yields empty output.
 */

use serde::{Deserialize, Serialize};

use super::aggregation::AggregatedEntry;
use super::duration::estimate_spoken_duration;
use super::{EDGE_TOLERANCE_SECS, MAX_UTTERANCE_SECS, MIN_SEGMENT_SECS, collapse_whitespace};

/// A finalized dub segment, the only entity handed to TTS and muxing.
///
/// Segments are ordered ascending by `start` with a dense 1-based `index`.
/// `end - start` meets the estimated spoken-duration floor unless the entry
/// was blocked on both sides, in which case `overlap` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DubSegment {
    /// Segment start in seconds
    pub start: f64,
    /// Segment end in seconds
    pub end: f64,
    /// Dialogue text to synthesize
    pub translation: String,
    /// Original-language text, for diagnostics
    pub original: String,
    /// Final segment duration in seconds
    pub target_duration: f64,
    /// 1-based position in the output order
    pub index: usize,
    /// True when the segment was force-extended into its following neighbor
    pub overlap: bool,
}

/// Fit each entry's window to its spoken-duration floor.
///
/// Entries must be sorted ascending by `start` (as `aggregate_entries`
/// produces them). State is carried forward only through the append-only
/// list of already-finalized segments; durations only ever grow.
pub fn schedule_segments(entries: Vec<AggregatedEntry>) -> Vec<DubSegment> {
    let speakable: Vec<AggregatedEntry> = entries
        .into_iter()
        .filter(|entry| !collapse_whitespace(&entry.translation).is_empty())
        .collect();

    let mut segments: Vec<DubSegment> = Vec::with_capacity(speakable.len());

    for (position, entry) in speakable.iter().enumerate() {
        let next_start = speakable.get(position + 1).map(|next| next.start);

        let mut start = entry.start.max(0.0);
        let base_duration = entry
            .target_duration
            .unwrap_or(entry.end - entry.start)
            .max(MIN_SEGMENT_SECS);
        let mut end = start + base_duration;

        let floor = estimate_spoken_duration(&entry.translation);
        let desired = base_duration.max(floor).min(MAX_UTTERANCE_SECS);
        let mut extra_needed = desired - base_duration;

        // Extend into trailing silence, or take everything when last
        if extra_needed > 0.0 {
            match next_start {
                Some(next) => {
                    let available = (next - EDGE_TOLERANCE_SECS - end).max(0.0);
                    let granted = extra_needed.min(available);
                    end += granted;
                    extra_needed -= granted;
                }
                None => {
                    end += extra_needed;
                    extra_needed = 0.0;
                }
            }
        }

        // Shift backward into leading silence, end staying fixed
        if extra_needed > 0.0 {
            let earliest_start = segments
                .last()
                .map(|prev| prev.end + EDGE_TOLERANCE_SECS)
                .unwrap_or(0.0);
            let shift = extra_needed.min((start - earliest_start).max(0.0));
            start -= shift;
            extra_needed -= shift;
        }

        // Tight neighbors on both sides: grant the remainder anyway rather
        // than truncate dialogue, and flag the resulting overlap
        let mut overlap = false;
        if extra_needed > 0.0 {
            end += extra_needed;
            overlap = true;
        }

        segments.push(DubSegment {
            start,
            end,
            translation: entry.translation.clone(),
            original: entry.original.clone(),
            target_duration: end - start,
            index: segments.len() + 1,
            overlap,
        });
    }

    segments
}
