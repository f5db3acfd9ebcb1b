// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod dubbing;
mod errors;
mod speech_detection;
mod subtitle_processor;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Plan dub segments for a video from its translated subtitles (default command)
    Plan(PlanArgs),

    /// Generate shell completions for dubwai
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input media file to plan a dub for
    #[arg(value_name = "MEDIA_PATH")]
    media_path: PathBuf,

    /// Translated subtitle file (SRT) carrying the dialogue to dub
    #[arg(short = 's', long)]
    subtitle: PathBuf,

    /// Original-language subtitle file (SRT), attached for diagnostics
    #[arg(long)]
    original_subtitle: Option<PathBuf>,

    /// Output path for the dub plan JSON (defaults next to the media file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Skip speech detection and schedule on cue timing only
    #[arg(long)]
    no_detection: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// dubwai - Dubbing With AI
///
/// Plans a dubbed audio track for a video: detects speech in the audio,
/// aligns translated subtitle cues onto the detected speech, and schedules
/// TTS-ready dub segments with spoken-length-feasible timing.
#[derive(Parser, Debug)]
#[command(name = "dubwai")]
#[command(version = "0.3.0")]
#[command(about = "Speech-aligned dub segment planner")]
#[command(long_about = "dubwai reconciles detected speech intervals, subtitle cue timing, and the
spoken length of translated dialogue into one ordered dub segment list.

EXAMPLES:
    dubwai movie.mkv -s movie.es.srt                 # Plan using default config
    dubwai movie.mkv -s movie.es.srt -o plan.json    # Explicit output path
    dubwai movie.mkv -s es.srt --original-subtitle en.srt
    dubwai --no-detection movie.mkv -s es.srt        # Cue timing only
    dubwai completions bash > dubwai.bash            # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input media file to plan a dub for
    #[arg(value_name = "MEDIA_PATH")]
    media_path: Option<PathBuf>,

    /// Translated subtitle file (SRT) carrying the dialogue to dub
    #[arg(short = 's', long)]
    subtitle: Option<PathBuf>,

    /// Original-language subtitle file (SRT), attached for diagnostics
    #[arg(long)]
    original_subtitle: Option<PathBuf>,

    /// Output path for the dub plan JSON (defaults next to the media file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Skip speech detection and schedule on cue timing only
    #[arg(long)]
    no_detection: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "dubwai", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Plan(args)) => run_plan(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let media_path = cli.media_path.ok_or_else(|| {
                anyhow::anyhow!("MEDIA_PATH is required when no subcommand is specified")
            })?;
            let subtitle = cli.subtitle.ok_or_else(|| {
                anyhow::anyhow!("--subtitle is required when no subcommand is specified")
            })?;

            let plan_args = PlanArgs {
                media_path,
                subtitle,
                original_subtitle: cli.original_subtitle,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                no_detection: cli.no_detection,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_plan(plan_args).await
        }
    }
}

async fn run_plan(options: PlanArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    // Command line overrides take precedence over the config file
    if let Some(cmd_log_level) = &options.log_level {
        config.log_level = cmd_log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }
    if options.no_detection {
        config.speech_detection.enabled = false;
    }

    let output_file = options.output.clone().unwrap_or_else(|| {
        options.media_path.with_extension("dubplan.json")
    });

    let controller = Controller::with_config(config)?;
    controller
        .run(
            options.media_path,
            options.subtitle,
            options.original_subtitle,
            output_file,
            options.force_overwrite,
        )
        .await
}
