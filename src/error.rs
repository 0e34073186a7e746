use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationReport;

/// The main error type for posecount operations.
///
/// Per-frame faults never use this type inside the pipeline: an unusable
/// image size or a missing tracked joint becomes a
/// [`SkipReason`](crate::render::SkipReason) on the frame output.
/// `InvalidDimensions` is only returned by the standalone geometry API.
#[derive(Debug, Error)]
pub enum PoseCountError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse recording JSON from {path}: {source}")]
    RecordingJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write recording JSON to {path}: {source}")]
    RecordingJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse recording CSV from {path}: {source}")]
    RecordingCsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write recording CSV to {path}: {source}")]
    RecordingCsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid recording CSV {path}: {message}")]
    RecordingCsvInvalid { path: PathBuf, message: String },

    #[error("Failed to load config from {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid dimensions {width}x{height}: image width and height must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
