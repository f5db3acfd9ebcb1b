/*!
 * Tests for the duration-fitting scheduler
 */

use dubwai::dubbing::aggregation::AggregatedEntry;
use dubwai::dubbing::{estimate_spoken_duration, schedule_segments};
use crate::common::assert_close;

/// Shorthand for an aggregated entry with a target duration
fn entry(start: f64, end: f64, translation: &str) -> AggregatedEntry {
    AggregatedEntry {
        start,
        end,
        translation: translation.to_string(),
        original: String::new(),
        target_duration: Some(end - start),
    }
}

/// Test that an entry already longer than its floor is left untouched
#[test]
fn test_schedule_withComfortableDuration_shouldNotStretch() {
    let segments = schedule_segments(vec![entry(0.0, 3.0, "Hi there friend")]);

    assert_eq!(segments.len(), 1);
    assert_close(segments[0].start, 0.0, "start untouched");
    assert_close(segments[0].end, 3.0, "end untouched");
    assert_eq!(segments[0].index, 1);
    assert!(!segments[0].overlap);
}

/// Test the unbounded extension of a final entry with no trailing neighbor
#[test]
fn test_schedule_withShortLastEntry_shouldExtendUnbounded() {
    let text = "A very long translated sentence with many words";
    let segments = schedule_segments(vec![entry(10.0, 10.3, text)]);

    let floor = estimate_spoken_duration(text);
    assert_eq!(segments.len(), 1);
    assert_close(segments[0].start, 10.0, "start anchored");
    assert_close(segments[0].end, 10.0 + floor, "end grows to the floor");
    assert_close(segments[0].target_duration, floor, "final duration");
}

/// Test that a too-short entry is first padded to the minimum segment length
#[test]
fn test_schedule_withTinyEntry_shouldPadToMinimumSegment() {
    let segments = schedule_segments(vec![entry(1.0, 1.2, "Hi")]);

    assert_close(segments[0].start, 1.0, "start anchored");
    assert_close(segments[0].end, 1.6, "padded to 0.6s");
}

/// Test extension into trailing silence bounded by the next entry
#[test]
fn test_schedule_withTrailingSilence_shouldExtendUpToNextEntry() {
    let text = "This sentence needs quite a bit more speaking room than half a second";
    let entries = vec![entry(0.0, 0.5, text), entry(30.0, 33.0, "Later on we continue")];

    let segments = schedule_segments(entries);

    let floor = estimate_spoken_duration(text);
    assert_eq!(segments.len(), 2);
    // Plenty of room before 30.0 - 0.15, so the full floor is granted forward
    assert_close(segments[0].start, 0.0, "start anchored");
    assert_close(segments[0].end, floor, "end grows to the floor");
    assert!(!segments[0].overlap);
    // The neighbor is untouched
    assert_close(segments[1].start, 30.0, "next entry untouched");
}

/// Test the backward shift into leading silence when the next entry is close
#[test]
fn test_schedule_withCloseFollower_shouldShiftEarlier() {
    let text = "Seven little words should do nicely"; // floor well above one second
    let entries = vec![entry(5.0, 5.5, text), entry(6.0, 9.0, "Next line of dialogue here")];

    let segments = schedule_segments(entries);

    let floor = estimate_spoken_duration(text);
    // Forward room is only 6.0 - 0.15 - 5.6 = 0.25s; the rest comes from
    // shifting the start back with the end pinned
    let base = 0.6; // max(0.6, 0.5)
    let forward = 0.25;
    let shift = floor - base - forward;
    assert_close(segments[0].end, 5.0 + base + forward, "end capped by neighbor");
    assert_close(segments[0].start, 5.0 - shift, "start shifted back");
    assert_close(segments[0].target_duration, floor, "floor met");
    assert!(!segments[0].overlap);
}

/// Test that the backward shift respects the previous finalized segment
#[test]
fn test_schedule_withPreviousSegment_shouldKeepGapWhenShifting() {
    let text = "This middle entry needs far more room than it was given in the cut";
    let entries = vec![
        entry(0.0, 4.0, "Opening line"),
        entry(4.5, 5.0, text),
        entry(5.5, 9.0, "Closing line of the scene"),
    ];

    let segments = schedule_segments(entries);

    // Earliest legal start is the previous end plus the 0.15s gap
    assert_close(segments[1].start, segments[0].end + 0.15, "gap to previous kept");
}

/// Test the force-extend fallback when blocked on both sides
#[test]
fn test_schedule_withTightNeighbors_shouldForceExtendAndFlagOverlap() {
    let text = "An absurdly long piece of dialogue squeezed into a tiny slot between neighbors";
    let entries = vec![
        entry(0.0, 4.0, "Opening line"),
        entry(4.2, 4.4, text),
        entry(4.8, 8.0, "Closing line"),
    ];

    let segments = schedule_segments(entries);

    let floor = estimate_spoken_duration(text);
    assert_eq!(segments.len(), 3);
    // Dialogue is never truncated: the full floor is met even though the
    // segment now intrudes into its neighbor's slot
    assert_close(segments[1].target_duration, floor, "floor met despite blockage");
    assert!(segments[1].overlap, "overlap flag set");
    assert!(segments[1].end > segments[2].start - 0.15, "intrudes into neighbor slot");
    assert!(!segments[0].overlap);
    assert!(!segments[2].overlap);
}

/// Test that entries with no speakable text vanish without disturbing indices
#[test]
fn test_schedule_withEmptyTranslation_shouldSkipEntryAndKeepDenseIndices() {
    let entries = vec![
        entry(0.0, 2.0, "First"),
        entry(3.0, 4.0, "   "),
        entry(5.0, 7.0, "Second"),
    ];

    let segments = schedule_segments(entries);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].index, 1);
    assert_eq!(segments[1].index, 2);
    assert_eq!(segments[0].translation, "First");
    assert_eq!(segments[1].translation, "Second");
}

/// Test that output ordering and index density hold across many entries
#[test]
fn test_schedule_withManyEntries_shouldKeepOrderingInvariant() {
    let entries: Vec<_> = (0..20)
        .map(|i| entry(i as f64 * 5.0, i as f64 * 5.0 + 3.0, "A line of dialogue"))
        .collect();

    let segments = schedule_segments(entries);

    assert_eq!(segments.len(), 20);
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.index, i + 1);
    }
    for pair in segments.windows(2) {
        assert!(pair[0].start < pair[1].start, "segments out of order");
    }
}

/// Test that no entries produce no segments
#[test]
fn test_schedule_withNoEntries_shouldReturnEmpty() {
    assert!(schedule_segments(Vec::new()).is_empty());
}

/// Test that a negative start is clamped to zero before scheduling
#[test]
fn test_schedule_withNegativeStart_shouldClampToZero() {
    let segments = schedule_segments(vec![entry(-2.0, 1.0, "Hello there")]);

    assert_close(segments[0].start, 0.0, "clamped start");
}
