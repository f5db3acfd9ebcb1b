/*!
 * Error types for the dubwai application.
 *
 * This module contains custom error types for the boundaries of the
 * application, using the thiserror crate for ergonomic error definitions.
 * The dub scheduling core itself is infallible and defines no error type.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while detecting speech in a media file
#[derive(Error, Debug)]
pub enum DetectionError {
    /// Error when spawning or running an ffmpeg/ffprobe process
    #[error("Detection process failed: {0}")]
    ProcessFailed(String),

    /// Error when the detector produced unusable output
    #[error("Failed to parse detection output: {0}")]
    ParseError(String),

    /// Error when the detection run exceeded its time budget
    #[error("Detection timed out: {0}")]
    Timeout(String),
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Error when an SRT file could not be parsed
    #[error("Failed to parse subtitle content: {0}")]
    ParseError(String),

    /// Error when a subtitle entry is malformed
    #[error("Invalid subtitle entry {seq_num}: {message}")]
    InvalidEntry {
        /// Sequence number of the offending entry
        seq_num: usize,
        /// Description of the problem
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from speech detection
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
