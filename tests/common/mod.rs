/*!
 * Common test utilities for the dubwai test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use dubwai::dubbing::{RawInterval, SourceCue};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;
    create_test_file(dir, filename, content)
}

/// Shorthand for a raw detection interval
pub fn interval(start: f64, end: f64) -> RawInterval {
    RawInterval::new(start, end)
}

/// Shorthand for a translated cue without original text
pub fn cue(start: f64, end: f64, translation: &str) -> SourceCue {
    SourceCue::new(start, end, Some(translation.to_string()), None)
}

/// Shorthand for a cue carrying only original-language text
pub fn original_only_cue(start: f64, end: f64, original: &str) -> SourceCue {
    SourceCue::new(start, end, None, Some(original.to_string()))
}

/// Absolute-difference float comparison for segment timing
pub fn assert_close(actual: f64, expected: f64, message: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{}: expected {} but got {}",
        message,
        expected,
        actual
    );
}
