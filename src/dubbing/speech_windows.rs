/*!
 * Normalization of raw voice-activity intervals into speech windows.
 *
 * Detection output is noisy: intervals arrive unordered, may overlap, may
 * carry negative or inverted timestamps, and can span whole scenes. This
 * module reduces them to a sorted, non-overlapping, duration-bounded list
 * that the rest of the pipeline can rely on.
 */

use super::{MAX_UTTERANCE_SECS, RawInterval};

/// Two intervals separated by at most this gap are treated as one utterance
const MERGE_GAP_SECS: f64 = 0.25;

/// Windows shorter than this are discarded as detection noise
const MIN_WINDOW_SECS: f64 = 0.12;

/// A merged, bounded time interval believed to contain speech.
///
/// Invariants after `normalize_intervals`: `end > start`, duration is at
/// most [`MAX_UTTERANCE_SECS`], and windows are sorted ascending by `start`
/// with no pairwise overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechWindow {
    /// Window start in seconds
    pub start: f64,
    /// Window end in seconds
    pub end: f64,
}

impl SpeechWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Normalize raw detection intervals into speech windows.
///
/// Malformed intervals (non-finite, or inverted after clamping negative
/// starts to zero) are dropped rather than reported: an empty result is the
/// normal degraded state when detection failed or found nothing, and the
/// scheduler handles it by routing every cue through the leftover path.
///
/// The operation is idempotent: feeding its output back in yields the same
/// window list.
pub fn normalize_intervals(intervals: &[RawInterval]) -> Vec<SpeechWindow> {
    // Sanitize, then sort so merging can run in one pass
    let mut cleaned: Vec<SpeechWindow> = intervals
        .iter()
        .filter(|iv| iv.start.is_finite() && iv.end.is_finite())
        .map(|iv| SpeechWindow::new(iv.start.max(0.0), iv.end))
        .filter(|w| w.end > w.start)
        .collect();
    cleaned.sort_by(|a, b| a.start.total_cmp(&b.start));

    // Merge near-adjacent intervals into one utterance span
    let mut merged: Vec<SpeechWindow> = Vec::with_capacity(cleaned.len());
    for window in cleaned {
        match merged.last_mut() {
            Some(last) if window.start - last.end <= MERGE_GAP_SECS => {
                last.end = last.end.max(window.end);
            }
            _ => merged.push(window),
        }
    }

    // Split overly long spans into equal-duration chunks, drop noise
    let mut windows = Vec::with_capacity(merged.len());
    for window in merged {
        if window.duration() < MIN_WINDOW_SECS {
            continue;
        }
        if window.duration() <= MAX_UTTERANCE_SECS {
            windows.push(window);
            continue;
        }
        let chunk_count = (window.duration() / MAX_UTTERANCE_SECS).ceil() as usize;
        let chunk_duration = window.duration() / chunk_count as f64;
        for i in 0..chunk_count {
            let chunk_start = window.start + chunk_duration * i as f64;
            let chunk_end = if i + 1 == chunk_count {
                // Land exactly on the original end, avoiding float drift
                window.end
            } else {
                chunk_start + chunk_duration
            };
            windows.push(SpeechWindow::new(chunk_start, chunk_end));
        }
    }

    windows
}
