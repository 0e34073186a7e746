//! Posecount: squat counting from pose landmarks.
//!
//! Posecount takes the per-frame body landmarks produced by a pose model,
//! maps them onto a display surface, measures the knee angle and counts
//! squat repetitions with a threshold state machine. It produces a draw list
//! for an overlay and a stream of rep events; it does no pose estimation,
//! capture or drawing of its own.
//!
//! # Modules
//!
//! - [`pose`]: Landmark, frame and recording types, plus JSON/CSV recording I/O
//! - [`geometry`]: Coordinate mapping (fit/fill) and joint angles
//! - [`counter`]: The rep-counting state machine
//! - [`render`]: Per-frame orchestration and draw commands
//! - [`events`]: Channel-based rep event delivery
//! - [`session`]: Session ownership, replay and reporting
//! - [`validation`]: Recording validation and error reporting
//! - [`config`]: Session configuration
//! - [`error`]: Error types for posecount operations

pub mod config;
pub mod counter;
pub mod error;
pub mod events;
pub mod geometry;
pub mod pose;
pub mod render;
pub mod session;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub use error::PoseCountError;

use config::SessionConfig;
use geometry::ScaleMode;
use pose::{Coord, Dimensions, Pixel, Recording, RunningMode};
use render::FrameOutput;
use session::{Session, SessionReport};

/// The posecount CLI application.
#[derive(Parser)]
#[command(name = "posecount")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Replay a landmark recording and count squats.
    Count(CountArgs),
    /// Validate a landmark recording for errors and warnings.
    Validate(ValidateArgs),
    /// Map one normalized point onto a surface.
    Map(MapArgs),
    /// Compute the joint angle at the middle of three pixel points.
    Angle(AngleArgs),
}

/// Options shared by the subcommands that read recordings.
#[derive(clap::Args)]
struct RecordingArgs {
    /// Recording file to read.
    input: PathBuf,

    /// Recording format ('json', 'csv', or 'auto' to pick by extension).
    #[arg(long, default_value = "auto")]
    format: String,

    /// Capture mode for formats that do not store it ('image', 'video', 'live-stream').
    #[arg(long)]
    running_mode: Option<String>,
}

/// Arguments for the count subcommand.
#[derive(clap::Args)]
struct CountArgs {
    #[command(flatten)]
    recording: RecordingArgs,

    /// Session config file (.yaml, .yml or .json).
    #[arg(long, env = "POSECOUNT_CONFIG")]
    config: Option<PathBuf>,

    /// Knee-angle threshold in degrees.
    #[arg(long)]
    threshold: Option<f64>,

    /// Dead band around the threshold in degrees.
    #[arg(long)]
    hysteresis: Option<f64>,

    /// Scale policy ('fit' or 'fill'); defaults to the running mode's.
    #[arg(long)]
    scale_mode: Option<String>,

    /// Drawing surface size as WIDTHxHEIGHT.
    #[arg(long)]
    surface: Option<String>,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,

    /// Also print every frame's draw commands.
    #[arg(long)]
    draw: bool,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    #[command(flatten)]
    recording: RecordingArgs,

    /// Config file supplying the tracked joints.
    #[arg(long, env = "POSECOUNT_CONFIG")]
    config: Option<PathBuf>,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the map subcommand.
#[derive(clap::Args)]
struct MapArgs {
    /// Normalized x coordinate.
    #[arg(long, allow_negative_numbers = true)]
    x: f64,

    /// Normalized y coordinate.
    #[arg(long, allow_negative_numbers = true)]
    y: f64,

    /// Source image size as WIDTHxHEIGHT.
    #[arg(long)]
    image: String,

    /// Surface size as WIDTHxHEIGHT.
    #[arg(long)]
    surface: String,

    /// Scale policy ('fit' or 'fill').
    #[arg(long, default_value = "fit")]
    scale_mode: String,
}

/// Arguments for the angle subcommand.
#[derive(clap::Args)]
struct AngleArgs {
    /// Three points as X,Y: first ray end, vertex, second ray end.
    #[arg(num_args = 3, required = true, allow_hyphen_values = true)]
    points: Vec<String>,
}

/// Run the posecount CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PoseCountError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Count(args)) => run_count(args),
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Map(args)) => run_map(args),
        Some(Commands::Angle(args)) => run_angle(args),
        None => {
            println!("posecount {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Squat counting from pose landmarks.");
            println!();
            println!("Run 'posecount --help' for usage information.");
            Ok(())
        }
    }
}

/// Logs go to stderr so reports on stdout stay machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load a recording in the requested format.
fn load_recording(args: &RecordingArgs) -> Result<Recording, PoseCountError> {
    let running_mode = args
        .running_mode
        .as_deref()
        .map(str::parse::<RunningMode>)
        .transpose()?;

    let format = match args.format.as_str() {
        "auto" => detect_format(&args.input),
        other => other,
    };

    let mut recording = match format {
        "json" => pose::io_json::read_recording_json(&args.input)?,
        "csv" => pose::io_csv::read_recording_csv(
            &args.input,
            running_mode.unwrap_or(RunningMode::Video),
        )?,
        other => {
            return Err(PoseCountError::UnsupportedFormat(format!(
                "'{}' (supported: json, csv, auto)",
                other
            )));
        }
    };

    if let Some(mode) = running_mode {
        recording.running_mode = mode;
    }
    Ok(recording)
}

fn detect_format(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => "csv",
        _ => "json",
    }
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig, PoseCountError> {
    match path {
        Some(path) => SessionConfig::load(path),
        None => Ok(SessionConfig::default()),
    }
}

#[derive(Serialize)]
struct CountOutput<'a> {
    report: &'a SessionReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    frames: Vec<FrameOutput>,
}

/// Execute the count subcommand.
fn run_count(args: CountArgs) -> Result<(), PoseCountError> {
    let recording = load_recording(&args.recording)?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(hysteresis) = args.hysteresis {
        config.hysteresis = hysteresis;
    }
    if let Some(mode) = &args.scale_mode {
        config.scale_mode = Some(mode.parse::<ScaleMode>()?);
    }
    if let Some(surface) = &args.surface {
        config.surface = Some(surface.parse::<Dimensions>()?);
    }
    config.check().map_err(PoseCountError::InvalidArgument)?;

    let json = match args.output.as_str() {
        "json" => true,
        "text" => false,
        other => {
            return Err(PoseCountError::UnsupportedFormat(format!(
                "output '{}' (supported: text, json)",
                other
            )));
        }
    };

    let mut session = Session::new(config);
    let mut frames = Vec::new();
    let report = session.replay_with(&recording, |position, output| {
        if !args.draw {
            return;
        }
        if json {
            frames.push(output.clone());
        } else {
            print_frame(position, output);
        }
    });

    if json {
        let body = CountOutput { report, frames };
        let text = serde_json::to_string_pretty(&body).map_err(|e| {
            PoseCountError::InvalidArgument(format!("could not encode report: {}", e))
        })?;
        println!("{}", text);
    } else {
        print!("{}", report);
    }

    Ok(())
}

fn print_frame(position: usize, output: &FrameOutput) {
    print!("frame {}", position);
    if let Some(angle) = output.angle {
        print!(" angle={:.2}", angle);
    }
    if let Some(event) = output.event {
        print!(" rep={}", event.count);
    }
    if let Some(reason) = &output.skipped {
        print!(" skipped: {}", reason);
    }
    println!();
    for command in &output.commands {
        println!("  {}", command);
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), PoseCountError> {
    let recording = load_recording(&args.recording)?;
    let config = load_config(args.config.as_deref())?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
        joints: config.joints,
    };
    let report = validation::validate_recording(&recording, &opts);

    match args.output.as_str() {
        "json" => {
            let body = serde_json::json!({
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": &report.issues,
            });
            let text = serde_json::to_string_pretty(&body).map_err(|e| {
                PoseCountError::InvalidArgument(format!("could not encode report: {}", e))
            })?;
            println!("{}", text);
        }
        _ => {
            print!("{}", report);
        }
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(PoseCountError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the map subcommand.
fn run_map(args: MapArgs) -> Result<(), PoseCountError> {
    let image: Dimensions = args.image.parse()?;
    let surface: Dimensions = args.surface.parse()?;
    let mode: ScaleMode = args.scale_mode.parse()?;

    let mapper = geometry::CoordinateMapper::new(image, surface, mode)?;
    let at = mapper.map(Coord::new(args.x, args.y));
    println!(
        "({:.2}, {:.2}) scale={} mode={}",
        at.x,
        at.y,
        mapper.scale_factor(),
        mode
    );
    Ok(())
}

/// Execute the angle subcommand.
fn run_angle(args: AngleArgs) -> Result<(), PoseCountError> {
    let points = args
        .points
        .iter()
        .map(|p| parse_point(p))
        .collect::<Result<Vec<_>, _>>()?;

    let [first, vertex, last] = points[..] else {
        return Err(PoseCountError::InvalidArgument(format!(
            "expected 3 points, got {}",
            points.len()
        )));
    };

    println!("{:.2}", geometry::angle_at(first, vertex, last));
    Ok(())
}

fn parse_point(s: &str) -> Result<Coord<Pixel>, PoseCountError> {
    let invalid = || PoseCountError::InvalidArgument(format!("'{}' is not a point (expected X,Y)", s));
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok(Coord::new(x, y))
}
