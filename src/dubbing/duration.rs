/*!
 * Spoken-duration floor estimation.
 *
 * A cheap heuristic over word and character counts, tuned against real TTS
 * output. It bounds how far the scheduler should stretch a segment; it does
 * not try to predict the exact length of synthesized audio.
 */

use super::{MAX_UTTERANCE_SECS, MIN_SEGMENT_SECS, collapse_whitespace};

/// Fixed per-utterance overhead in seconds
const BASE_UTTERANCE_SECS: f64 = 0.55;

/// Seconds per word beyond the first
const PER_WORD_SECS: f64 = 0.17;

/// Assumed characters per word for scripts without whitespace word breaks
const CHARS_PER_WORD: f64 = 3.0;

/// Estimate the minimum plausible spoken duration of `text`, in seconds.
///
/// Word count is cross-checked against a character-derived count so that
/// scripts without spaces (or heavily hyphenated text) are not undercounted.
/// The result is clamped to `[0.6, 20.0]` seconds.
pub fn estimate_spoken_duration(text: &str) -> f64 {
    let normalized = collapse_whitespace(text);
    if normalized.is_empty() {
        return MIN_SEGMENT_SECS;
    }

    let words = normalized.split_whitespace().count();
    let chars = normalized.chars().filter(|c| !c.is_whitespace()).count();
    let approx_words = words.max((chars as f64 / CHARS_PER_WORD).ceil() as usize);

    let estimated = BASE_UTTERANCE_SECS + approx_words.saturating_sub(1) as f64 * PER_WORD_SECS;
    estimated.clamp(MIN_SEGMENT_SECS, MAX_UTTERANCE_SECS)
}
