/*!
 * Tests for cue-to-window assignment
 */

use dubwai::dubbing::{SpeechWindow, assign_cues_to_windows};
use crate::common::cue;

/// Test that a cue inside a window lands in that window's bucket
#[test]
fn test_assign_withCueInsideWindow_shouldBucketCue() {
    let windows = vec![SpeechWindow::new(0.0, 3.0)];
    let cues = vec![cue(0.5, 1.0, "Hi")];

    let assignment = assign_cues_to_windows(&cues, &windows);

    assert_eq!(assignment.buckets[0].len(), 1);
    assert!(assignment.leftovers.is_empty());
}

/// Test that a cue far from every window becomes a leftover
#[test]
fn test_assign_withDistantCue_shouldRouteToLeftovers() {
    let windows = vec![SpeechWindow::new(0.0, 1.0)];
    let cues = vec![cue(10.0, 11.0, "Alone")];

    let assignment = assign_cues_to_windows(&cues, &windows);

    assert!(assignment.buckets[0].is_empty());
    assert_eq!(assignment.leftovers.len(), 1);
    assert_eq!(assignment.leftovers[0].start, 10.0);
}

/// Test that an empty window list routes every cue to leftovers
#[test]
fn test_assign_withNoWindows_shouldRouteEverythingToLeftovers() {
    let cues = vec![cue(0.0, 1.0, "One"), cue(2.0, 3.0, "Two")];

    let assignment = assign_cues_to_windows(&cues, &[]);

    assert!(assignment.buckets.is_empty());
    assert_eq!(assignment.leftovers.len(), 2);
}

/// Test the edge tolerance: a cue just past a window edge still matches
#[test]
fn test_assign_withCueJustPastWindowEnd_shouldStillMatch() {
    let windows = vec![SpeechWindow::new(0.0, 2.0)];
    // Starts 0.1s after the window ends, inside the 0.15s tolerance
    let cues = vec![cue(2.1, 2.5, "Close enough")];

    let assignment = assign_cues_to_windows(&cues, &windows);

    assert_eq!(assignment.buckets[0].len(), 1);
}

/// Test the one-step lookback after the pointer advances past a window
#[test]
fn test_assign_withPointerOvershoot_shouldCheckPreviousWindow() {
    let windows = vec![SpeechWindow::new(0.0, 3.0), SpeechWindow::new(10.0, 12.0)];
    // Midpoint 3.3 pushes the pointer to the second window, but the cue
    // still starts inside the first window's tolerance band
    let cues = vec![cue(2.0, 4.6, "Trailing sentence")];

    let assignment = assign_cues_to_windows(&cues, &windows);

    assert_eq!(assignment.buckets[0].len(), 1);
    assert!(assignment.buckets[1].is_empty());
    assert!(assignment.leftovers.is_empty());
}

/// Test that cues with non-finite timing are dropped as malformed
#[test]
fn test_assign_withNonFiniteCueTiming_shouldDropCue() {
    let windows = vec![SpeechWindow::new(0.0, 3.0)];
    let cues = vec![
        cue(f64::NAN, f64::NAN, "Ghost line"),
        cue(1.0, f64::INFINITY, "Endless line"),
        cue(f64::NEG_INFINITY, 2.0, "Timeless line"),
        cue(0.5, 1.5, "Real line"),
    ];

    let assignment = assign_cues_to_windows(&cues, &windows);

    assert_eq!(assignment.buckets[0].len(), 1);
    assert_eq!(assignment.buckets[0][0].translation.as_deref(), Some("Real line"));
    assert!(assignment.leftovers.is_empty());
}

/// Test that a cue between two windows without touching either is left over
#[test]
fn test_assign_withCueInGap_shouldRouteToLeftovers() {
    let windows = vec![SpeechWindow::new(0.0, 2.0), SpeechWindow::new(5.0, 7.0)];
    let cues = vec![cue(3.0, 4.0, "Between")];

    let assignment = assign_cues_to_windows(&cues, &windows);

    assert!(assignment.buckets[0].is_empty());
    assert!(assignment.buckets[1].is_empty());
    assert_eq!(assignment.leftovers.len(), 1);
}

/// Test that bucket order follows cue start order
#[test]
fn test_assign_withMultipleCuesPerWindow_shouldPreserveStartOrder() {
    let windows = vec![SpeechWindow::new(0.0, 10.0)];
    // Deliberately unsorted input
    let cues = vec![
        cue(4.0, 5.0, "second"),
        cue(1.0, 2.0, "first"),
        cue(7.0, 8.0, "third"),
    ];

    let assignment = assign_cues_to_windows(&cues, &windows);

    let texts: Vec<_> = assignment.buckets[0]
        .iter()
        .map(|c| c.translation.clone().unwrap())
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

/// Test that cues spread over many windows land in their own windows
#[test]
fn test_assign_withManyWindows_shouldAdvancePointerMonotonically() {
    let windows = vec![
        SpeechWindow::new(0.0, 2.0),
        SpeechWindow::new(5.0, 7.0),
        SpeechWindow::new(10.0, 12.0),
    ];
    let cues = vec![
        cue(0.2, 1.8, "a"),
        cue(5.1, 6.9, "b"),
        cue(10.3, 11.5, "c"),
    ];

    let assignment = assign_cues_to_windows(&cues, &windows);

    assert_eq!(assignment.buckets[0].len(), 1);
    assert_eq!(assignment.buckets[1].len(), 1);
    assert_eq!(assignment.buckets[2].len(), 1);
    assert!(assignment.leftovers.is_empty());
}
