/*!
 * Assignment of subtitle cues to speech windows.
 *
 * Cue timing and detected speech rarely agree exactly, so matching allows a
 * small slack on window edges. A single forward pointer walks the window
 * list while cues are visited in start order, which keeps the whole pass
 * linear in cues plus windows.
 */

use super::{EDGE_TOLERANCE_SECS, SourceCue, SpeechWindow};

/// Result of routing every cue to a window or to the leftover list.
#[derive(Debug, Clone, Default)]
pub struct CueAssignment {
    /// Cues per window, indexed like the window list; inner order follows
    /// cue start order
    pub buckets: Vec<Vec<SourceCue>>,
    /// Cues overlapping no window; scheduled later on their own timing
    pub leftovers: Vec<SourceCue>,
}

/// True when the cue and window overlap, with slack on both window edges.
fn overlaps(cue: &SourceCue, window: &SpeechWindow) -> bool {
    cue.end >= window.start - EDGE_TOLERANCE_SECS && cue.start <= window.end + EDGE_TOLERANCE_SECS
}

/// Route each cue to the speech window it overlaps, or to the leftovers.
///
/// Cues with non-finite timing are malformed and dropped here, before any
/// sorting or matching, so they can never reach the scheduler and disturb
/// output ordering.
///
/// The window pointer only ever advances, driven by the cue midpoint. Because
/// it can overshoot a window the cue still touches, both the current and the
/// immediately preceding window are tested; one step of lookback is enough
/// since cues are visited in start order against non-overlapping windows.
///
/// An empty window list (detection unavailable) routes every cue to the
/// leftover list, which is the degraded path the scheduler expects.
pub fn assign_cues_to_windows(cues: &[SourceCue], windows: &[SpeechWindow]) -> CueAssignment {
    let mut assignment = CueAssignment {
        buckets: vec![Vec::new(); windows.len()],
        leftovers: Vec::new(),
    };

    let mut sorted: Vec<&SourceCue> = cues
        .iter()
        .filter(|cue| cue.start.is_finite() && cue.end.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    if windows.is_empty() {
        assignment.leftovers = sorted.into_iter().cloned().collect();
        return assignment;
    }

    let mut i = 0usize;
    for cue in sorted {
        let midpoint = cue.midpoint();
        while i + 1 < windows.len() && midpoint > windows[i].end + EDGE_TOLERANCE_SECS {
            i += 1;
        }

        // Current window first, then the one the pointer just left behind
        if overlaps(cue, &windows[i]) {
            assignment.buckets[i].push(cue.clone());
        } else if i > 0 && overlaps(cue, &windows[i - 1]) {
            assignment.buckets[i - 1].push(cue.clone());
        } else {
            assignment.leftovers.push(cue.clone());
        }
    }

    assignment
}
