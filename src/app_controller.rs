use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::app_config::Config;
use crate::dubbing::{DubSegment, RawInterval, SourceCue, plan_dub_segments};
use crate::speech_detection::{DetectionSettings, detect_speech_intervals};
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for dub planning

/// A complete dub plan as written to disk
#[derive(Debug, Serialize, Deserialize)]
pub struct DubPlan {
    /// Media file the plan was built for
    pub source_file: PathBuf,

    /// Target language of the dialogue text
    pub target_language: String,

    /// Number of subtitle cues that fed the plan
    pub cue_count: usize,

    /// Number of raw speech intervals detection reported (0 when skipped or degraded)
    pub interval_count: usize,

    /// The scheduled dub segments, ordered by start time
    pub segments: Vec<DubSegment>,
}

/// Main application controller for dub planning
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Run the main workflow: load cues, detect speech, schedule, write plan
    pub async fn run(
        &self,
        media_file: PathBuf,
        translated_srt: PathBuf,
        original_srt: Option<PathBuf>,
        output_file: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !self.is_initialized() {
            return Err(anyhow!("Controller not properly initialized"));
        }
        if output_file.exists() && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists (use --force-overwrite): {}",
                output_file.display()
            ));
        }

        let translated =
            SubtitleCollection::load_from_srt(&translated_srt, &self.config.target_language)?;
        let original = match &original_srt {
            Some(path) => Some(SubtitleCollection::load_from_srt(
                path,
                &self.config.source_language,
            )?),
            None => None,
        };
        let cues = SubtitleCollection::to_source_cues(&translated, original.as_ref());
        info!("Loaded {} cue(s) from {}", cues.len(), translated_srt.display());

        let intervals = self.detect_or_degrade(&media_file).await;
        let plan = self.build_plan(&media_file, &cues, &intervals);

        summarize(&plan);
        self.write_plan(&plan, &output_file)?;

        info!(
            "Dub plan written to {} in {:.2}s",
            output_file.display(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Run detection, mapping failure or a disabled detector to an empty
    /// interval list. An empty list is the documented degraded state: the
    /// scheduler then routes every cue through the leftover path.
    async fn detect_or_degrade(&self, media_file: &Path) -> Vec<RawInterval> {
        if !self.config.speech_detection.enabled {
            info!("Speech detection disabled; scheduling on cue timing only");
            return Vec::new();
        }

        let settings = DetectionSettings {
            noise_threshold: self.config.speech_detection.noise_threshold.clone(),
            min_silence_secs: self.config.speech_detection.min_silence_secs,
        };

        match detect_speech_intervals(media_file, &settings).await {
            Ok(intervals) => {
                debug!("Speech detection reported {} interval(s)", intervals.len());
                intervals
            }
            Err(e) => {
                warn!(
                    "Speech detection failed ({}); scheduling on cue timing only",
                    e
                );
                Vec::new()
            }
        }
    }

    /// Build a plan from already-loaded cues and intervals; pure, used by
    /// tests to exercise the workflow without ffmpeg
    pub fn build_plan(
        &self,
        media_file: &Path,
        cues: &[SourceCue],
        intervals: &[RawInterval],
    ) -> DubPlan {
        let segments = plan_dub_segments(intervals, cues);
        DubPlan {
            source_file: media_file.to_path_buf(),
            target_language: self.config.target_language.clone(),
            cue_count: cues.len(),
            interval_count: intervals.len(),
            segments,
        }
    }

    /// Serialize the plan to pretty JSON
    fn write_plan(&self, plan: &DubPlan, output_file: &Path) -> Result<()> {
        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(plan).context("Failed to serialize dub plan")?;
        fs::write(output_file, content)
            .with_context(|| format!("Failed to write dub plan: {}", output_file.display()))?;
        Ok(())
    }
}

/// Log a one-line summary of the finished plan
fn summarize(plan: &DubPlan) {
    let overlapping = plan.segments.iter().filter(|s| s.overlap).count();
    let span = plan
        .segments
        .last()
        .map(|s| s.end)
        .unwrap_or(0.0);

    info!(
        "Scheduled {} segment(s) over {:.2}s ({} overlap(s) from force-extension)",
        plan.segments.len(),
        span,
        overlapping
    );
    if overlapping > 0 {
        warn!(
            "{} segment(s) overlap their neighbor; dialogue was kept in full at the cost of timing",
            overlapping
        );
    }
}
