/*!
 * Speech-aligned dub segment planning.
 *
 * This module turns two independent, imprecise timing sources — detected
 * speech intervals and translated subtitle cues — into one ordered list of
 * dub segments ready for TTS synthesis:
 * - `speech_windows`: normalizes raw detection intervals into merged,
 *   duration-bounded speech windows
 * - `assignment`: maps each cue onto the speech window it overlaps
 * - `aggregation`: merges the cues of each window into one dialogue entry
 * - `duration`: estimates the minimum plausible spoken duration of a text
 * - `scheduler`: fits each entry's time window to its duration floor
 *
 * Every stage is a pure function over value types; the whole pipeline is
 * synchronous, infallible, and linear in the number of cues and windows.
 */

pub mod speech_windows;
pub mod assignment;
pub mod aggregation;
pub mod duration;
pub mod scheduler;

pub use speech_windows::{SpeechWindow, normalize_intervals};
pub use assignment::{CueAssignment, assign_cues_to_windows};
pub use aggregation::{AggregatedEntry, aggregate_entries};
pub use duration::estimate_spoken_duration;
pub use scheduler::{DubSegment, schedule_segments};

/// Tolerance applied to window edges when matching cues, and the gap kept
/// between neighboring segments when stretching or shifting them.
pub(crate) const EDGE_TOLERANCE_SECS: f64 = 0.15;

/// Shortest segment the scheduler will emit.
pub(crate) const MIN_SEGMENT_SECS: f64 = 0.6;

/// Longest single utterance; longer speech spans are split, and no segment
/// is stretched past this.
pub(crate) const MAX_UTTERANCE_SECS: f64 = 20.0;

/// A raw speech interval as reported by voice-activity detection.
///
/// Unordered, possibly overlapping, possibly malformed — `normalize_intervals`
/// is the only consumer and sanitizes everything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInterval {
    /// Interval start in seconds
    pub start: f64,
    /// Interval end in seconds
    pub end: f64,
}

impl RawInterval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// A translated subtitle cue with its own independent timing.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCue {
    /// Cue start in seconds
    pub start: f64,
    /// Cue end in seconds
    pub end: f64,
    /// Translated dialogue text, if any
    pub translation: Option<String>,
    /// Original-language dialogue text, if any
    pub original: Option<String>,
}

impl SourceCue {
    pub fn new(start: f64, end: f64, translation: Option<String>, original: Option<String>) -> Self {
        Self {
            start,
            end,
            translation,
            original,
        }
    }

    /// Temporal midpoint, used by the assigner to pick a candidate window.
    pub fn midpoint(&self) -> f64 {
        self.start + (self.end - self.start) / 2.0
    }
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Plan the final dub segments for one dub request.
///
/// Runs the full pipeline: interval normalization, cue assignment, window
/// aggregation, and duration-fitting scheduling. An empty `intervals` slice
/// is the documented degraded state (detection unavailable or failed): every
/// cue then schedules on its own timing via the leftover path.
pub fn plan_dub_segments(intervals: &[RawInterval], cues: &[SourceCue]) -> Vec<DubSegment> {
    let windows = normalize_intervals(intervals);
    let assignment = assign_cues_to_windows(cues, &windows);
    let entries = aggregate_entries(&windows, &assignment);
    schedule_segments(entries)
}
