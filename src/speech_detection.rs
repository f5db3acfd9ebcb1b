/*!
 * Voice-activity detection over a media file's audio track.
 *
 * Runs ffmpeg's `silencedetect` filter and inverts the reported silence
 * spans over `[0, media_duration]` into raw speech intervals. The intervals
 * are deliberately left unpolished (unmerged, unbounded) — the dubbing
 * pipeline's normalizer owns that cleanup.
 *
 * Detection failure is not fatal to a dub request: the caller maps any
 * error here to an empty interval list and the scheduler degrades to
 * cue-timed segments.
 */

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, error};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, from_str};
use tokio::process::Command;

use crate::dubbing::RawInterval;

// @const: silencedetect stderr markers
static SILENCE_START_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"silence_start:\s*(-?\d+(?:\.\d+)?)").unwrap());
static SILENCE_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"silence_end:\s*(-?\d+(?:\.\d+)?)").unwrap());

/// Tuning for the silencedetect pass
#[derive(Debug, Clone)]
pub struct DetectionSettings {
    /// Noise tolerance handed to silencedetect, e.g. "-30dB"
    pub noise_threshold: String,
    /// Minimum silence length in seconds before a gap counts as silence
    pub min_silence_secs: f64,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            noise_threshold: "-30dB".to_string(),
            min_silence_secs: 0.4,
        }
    }
}

/// Detect speech intervals in the audio track of `media_path`.
///
/// Returns raw, detector-shaped intervals; callers wanting scheduler input
/// must feed them through `dubbing::normalize_intervals`.
pub async fn detect_speech_intervals<P: AsRef<Path>>(
    media_path: P,
    settings: &DetectionSettings,
) -> Result<Vec<RawInterval>> {
    let media_path = media_path.as_ref();

    if !media_path.exists() {
        return Err(anyhow!("Media file does not exist: {:?}", media_path));
    }

    let duration = probe_media_duration(media_path).await?;

    let filter = format!(
        "silencedetect=noise={}:d={}",
        settings.noise_threshold, settings.min_silence_secs
    );
    let ffmpeg_future = Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-i", media_path.to_str().unwrap_or_default(),
            "-vn",                      // Audio only
            "-af", &filter,
            "-f", "null",
            "-",
        ])
        .output();

    let timeout_duration = std::time::Duration::from_secs(300); // 5 minute timeout for long media
    let output = tokio::select! {
        result = ffmpeg_future => {
            result.map_err(|e| anyhow!("Failed to execute ffmpeg command for silence detection: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffmpeg silence detection timed out after 5 minutes"));
        }
    };

    // silencedetect reports on stderr even on success
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        let filtered = filter_ffmpeg_stderr(&stderr);
        error!("Silence detection failed: {}", filtered);
        return Err(anyhow!("ffmpeg silence detection failed: {}", filtered));
    }

    let intervals = speech_intervals_from_silence(&stderr, duration);
    debug!(
        "Detected {} speech interval(s) over {:.2}s of audio",
        intervals.len(),
        duration
    );
    Ok(intervals)
}

/// Probe the media duration in seconds via ffprobe
async fn probe_media_duration(media_path: &Path) -> Result<f64> {
    let ffprobe_future = Command::new("ffprobe")
        .args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            media_path.to_str().unwrap_or(""),
        ])
        .output();

    let timeout_duration = std::time::Duration::from_secs(60); // 1 minute timeout
    let output = tokio::select! {
        result = ffprobe_future => {
            result.map_err(|e| anyhow!("Failed to execute ffprobe command: {}", e))?
        },
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(anyhow!("ffprobe command timed out after 60 seconds"));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("ffprobe failed: {}", stderr);
        return Err(anyhow!("ffprobe command failed: {}", stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: Value = from_str(&stdout).context("Failed to parse ffprobe JSON output")?;

    json.get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| anyhow!("ffprobe reported no usable duration for {:?}", media_path))
}

/// Invert silencedetect output into speech intervals over `[0, duration]`.
///
/// Visible for tests; the parser is pure over the captured stderr text.
pub fn speech_intervals_from_silence(stderr: &str, duration: f64) -> Vec<RawInterval> {
    let mut intervals = Vec::new();
    let mut speech_start = 0.0f64;

    for line in stderr.lines() {
        if let Some(caps) = SILENCE_START_REGEX.captures(line) {
            if let Ok(silence_start) = caps[1].parse::<f64>() {
                if silence_start > speech_start {
                    intervals.push(RawInterval::new(speech_start, silence_start.min(duration)));
                }
                speech_start = f64::INFINITY; // Inside silence until silence_end
            }
        } else if let Some(caps) = SILENCE_END_REGEX.captures(line) {
            if let Ok(silence_end) = caps[1].parse::<f64>() {
                speech_start = silence_end.max(0.0);
            }
        }
    }

    // Trailing speech after the last silence span
    if speech_start.is_finite() && speech_start < duration {
        intervals.push(RawInterval::new(speech_start, duration));
    }

    intervals
}

/// Filter ffmpeg stderr to only show meaningful error lines, stripping the
/// version banner, build configuration, and stream metadata noise.
fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let dominated_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "  Metadata:",
        "  Duration:",
        "  Chapter",
        "    Chapter",
        "  Stream #",
        "      Metadata:",
        "        title",
        "        BPS",
        "        DURATION",
        "        NUMBER_OF",
        "        _STATISTICS",
        "Output #",
        "Stream mapping:",
        "Press [q]",
        "[silencedetect",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return false;
            }
            !dominated_prefixes.iter().any(|p| line.starts_with(p) || trimmed.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
