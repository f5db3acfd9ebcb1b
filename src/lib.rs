/*!
 * # dubwai - Dubbing With AI
 *
 * A Rust library for planning dubbed audio tracks from translated video
 * subtitles.
 *
 * ## Features
 *
 * - Parse translated (and original) SRT subtitle files
 * - Detect speech intervals in a media file's audio track via ffmpeg
 * - Reconcile detection intervals, cue timing, and spoken-text length into
 *   one ordered, TTS-ready dub segment list
 * - Deterministic degraded behavior when speech detection is unavailable
 * - Emit dub plans as JSON for downstream synthesis and muxing stages
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Subtitle file handling and cue extraction
 * - `speech_detection`: ffmpeg-based voice-activity detection boundary
 * - `dubbing`: the dub segment scheduling core:
 *   - `dubbing::speech_windows`: raw interval normalization
 *   - `dubbing::assignment`: cue-to-window assignment
 *   - `dubbing::aggregation`: per-window dialogue aggregation
 *   - `dubbing::duration`: spoken-duration floor estimation
 *   - `dubbing::scheduler`: duration-fitting segment scheduling
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod dubbing;
pub mod errors;
pub mod speech_detection;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, DubPlan};
pub use dubbing::{DubSegment, RawInterval, SourceCue, SpeechWindow, plan_dub_segments};
pub use errors::{AppError, DetectionError, SubtitleError};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
