//! JSON recordings.
//!
//! The JSON form mirrors [`Recording`] field for field:
//!
//! ```json
//! {
//!   "running_mode": "video",
//!   "frames": [
//!     {
//!       "timestamp_ms": 0,
//!       "image": { "width": 480, "height": 640 },
//!       "landmarks": [ { "index": 23, "x": 0.45, "y": 0.5, "z": 0.0 } ]
//!     }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::Recording;
use crate::error::PoseCountError;

/// Reads a recording from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be opened or is not a valid recording.
pub fn read_recording_json(path: &Path) -> Result<Recording, PoseCountError> {
    let file = File::open(path).map_err(PoseCountError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| PoseCountError::RecordingJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a recording to a JSON file, pretty-printed.
pub fn write_recording_json(path: &Path, recording: &Recording) -> Result<(), PoseCountError> {
    let file = File::create(path).map_err(PoseCountError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, recording).map_err(|source| {
        PoseCountError::RecordingJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

pub fn from_json_str(json: &str) -> Result<Recording, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn from_json_slice(bytes: &[u8]) -> Result<Recording, serde_json::Error> {
    serde_json::from_slice(bytes)
}

pub fn to_json_string(recording: &Recording) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(recording)
}
