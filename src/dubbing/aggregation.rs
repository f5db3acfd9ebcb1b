/*!
 * Aggregation of assigned cues into dialogue entries.
 *
 * Each speech window with assigned cues becomes one entry carrying the
 * window's merged text and widened bounds; leftover cues become standalone
 * entries on their own timing. Entries with no usable text are dropped here
 * so the scheduler only ever sees speakable dialogue.
 */

use super::{CueAssignment, SourceCue, SpeechWindow, collapse_whitespace};

/// One dialogue entry awaiting duration fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedEntry {
    /// Entry start in seconds
    pub start: f64,
    /// Entry end in seconds
    pub end: f64,
    /// Dialogue text to synthesize; never empty
    pub translation: String,
    /// Original-language text, kept for diagnostics
    pub original: String,
    /// Initial target duration; `None` for leftover cues with degenerate timing
    pub target_duration: Option<f64>,
}

/// Join the normalized texts of a bucket, picking `translation` per cue and
/// falling back to the concatenated originals when no cue was translated.
fn combined_text(cues: &[SourceCue], pick: fn(&SourceCue) -> Option<&String>) -> String {
    let parts: Vec<String> = cues
        .iter()
        .filter_map(pick)
        .map(|text| collapse_whitespace(text))
        .filter(|text| !text.is_empty())
        .collect();
    parts.join(" ")
}

/// Merge window bounds with the extremes of the assigned cues.
///
/// The detected speech span is the floor: cue timing may widen the window on
/// either side but never shrink it. Degenerate results fall back to the
/// window's own span.
fn merged_bounds(window: &SpeechWindow, cues: &[SourceCue]) -> (f64, f64) {
    let cue_min = cues.iter().map(|c| c.start).fold(f64::INFINITY, f64::min);
    let cue_max = cues.iter().map(|c| c.end).fold(f64::NEG_INFINITY, f64::max);

    let mut start = window.start.min(cue_min);
    if !start.is_finite() || start < 0.0 {
        start = window.start;
    }
    let mut end = window.end.max(cue_max);
    if !end.is_finite() || end <= start {
        end = start + window.duration().max(0.01);
    }
    (start, end)
}

/// Build the dialogue entries for one dub request, sorted by start time.
pub fn aggregate_entries(windows: &[SpeechWindow], assignment: &CueAssignment) -> Vec<AggregatedEntry> {
    let mut entries = Vec::new();

    for (window, bucket) in windows.iter().zip(&assignment.buckets) {
        if bucket.is_empty() {
            continue;
        }

        let original = combined_text(bucket, |cue| cue.original.as_ref());
        let mut translation = combined_text(bucket, |cue| cue.translation.as_ref());
        if translation.is_empty() {
            translation = original.clone();
        }
        if translation.is_empty() {
            // Window matched cues that carry no text at all
            continue;
        }

        let (start, end) = merged_bounds(window, bucket);
        entries.push(AggregatedEntry {
            start,
            end,
            translation,
            original,
            target_duration: Some(end - start),
        });
    }

    for cue in &assignment.leftovers {
        let original = combined_text(std::slice::from_ref(cue), |c| c.original.as_ref());
        let mut translation = combined_text(std::slice::from_ref(cue), |c| c.translation.as_ref());
        if translation.is_empty() {
            translation = original.clone();
        }
        if translation.is_empty() {
            continue;
        }

        entries.push(AggregatedEntry {
            start: cue.start,
            end: cue.end,
            translation,
            original,
            target_duration: (cue.end > cue.start).then(|| cue.end - cue.start),
        });
    }

    entries.sort_by(|a, b| a.start.total_cmp(&b.start));
    entries
}
