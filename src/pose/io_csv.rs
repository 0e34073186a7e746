//! Long-form CSV recordings.
//!
//! Many pose-model dumps are flat tables with one row per landmark. This
//! module reads and writes that layout:
//!
//! ```text
//! frame,timestamp_ms,image_width,image_height,index,x,y,z
//! 0,0,480,640,23,0.45,0.50,0.0
//! 0,0,480,640,25,0.47,0.68,0.0
//! 1,33,480,640,23,0.45,0.52,0.0
//! ```
//!
//! Rows sharing a `frame` value form one [`LandmarkSet`]. Frames are emitted in
//! order of first appearance, landmarks in row order. `timestamp_ms` may be
//! left empty.
//!
//! # Format Limitations
//!
//! The CSV layout cannot represent:
//! - the running mode or surface size (the caller supplies the running mode)
//! - frames without landmarks
//! - visibility scores

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{Dimensions, LandmarkSet, Recording, RunningMode};
use super::{Landmark, LandmarkIndex};
use crate::error::PoseCountError;

/// A single row of the long-form CSV.
#[derive(Debug, Serialize, Deserialize)]
struct LandmarkRow {
    frame: u64,
    timestamp_ms: Option<u64>,
    image_width: u32,
    image_height: u32,
    index: u32,
    x: f64,
    y: f64,
    z: f64,
}

/// Reads a recording from a long-form CSV file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if rows of the
/// same frame disagree on image size or timestamp.
pub fn read_recording_csv(
    path: &Path,
    running_mode: RunningMode,
) -> Result<Recording, PoseCountError> {
    let file = File::open(path).map_err(PoseCountError::Io)?;
    let reader = BufReader::new(file);

    let rows = parse_rows(csv::Reader::from_reader(reader), path)?;
    rows_to_recording(rows, running_mode, path)
}

/// Writes a recording to a long-form CSV file.
///
/// Frame numbers are the frames' positions in the recording.
pub fn write_recording_csv(path: &Path, recording: &Recording) -> Result<(), PoseCountError> {
    let file = File::create(path).map_err(PoseCountError::Io)?;
    let writer = BufWriter::new(file);

    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in recording_to_rows(recording) {
        csv_writer
            .serialize(&row)
            .map_err(|source| PoseCountError::RecordingCsvWrite {
                path: path.to_path_buf(),
                source,
            })?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| PoseCountError::Io(e.into_error()))?
        .flush()
        .map_err(PoseCountError::Io)?;

    Ok(())
}

pub fn from_csv_str(csv_str: &str, running_mode: RunningMode) -> Result<Recording, PoseCountError> {
    from_csv_slice(csv_str.as_bytes(), running_mode)
}

/// Reads a recording from CSV bytes without requiring UTF-8 upfront.
pub fn from_csv_slice(bytes: &[u8], running_mode: RunningMode) -> Result<Recording, PoseCountError> {
    let source = Path::new("<bytes>");
    let rows = parse_rows(csv::Reader::from_reader(bytes), source)?;
    rows_to_recording(rows, running_mode, source)
}

pub fn to_csv_string(recording: &Recording) -> Result<String, PoseCountError> {
    let target = Path::new("<string>");

    let mut csv_writer = csv::Writer::from_writer(Vec::new());
    for row in recording_to_rows(recording) {
        csv_writer
            .serialize(&row)
            .map_err(|source| PoseCountError::RecordingCsvWrite {
                path: target.to_path_buf(),
                source,
            })?;
    }

    let bytes = csv_writer
        .into_inner()
        .map_err(|e| PoseCountError::Io(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| PoseCountError::RecordingCsvInvalid {
        path: target.to_path_buf(),
        message: format!("Invalid UTF-8 in output: {}", e),
    })
}

fn parse_rows<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<Vec<LandmarkRow>, PoseCountError> {
    reader
        .deserialize()
        .map(|result| {
            result.map_err(|source| PoseCountError::RecordingCsvParse {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

fn rows_to_recording(
    rows: Vec<LandmarkRow>,
    running_mode: RunningMode,
    path: &Path,
) -> Result<Recording, PoseCountError> {
    let mut frames: Vec<LandmarkSet> = Vec::new();
    let mut position_by_frame: HashMap<u64, usize> = HashMap::new();

    for row in rows {
        let image = Dimensions::new(row.image_width, row.image_height);
        let landmark = Landmark::new(LandmarkIndex::new(row.index), row.x, row.y, row.z);

        match position_by_frame.get(&row.frame) {
            Some(&pos) => {
                let frame = &mut frames[pos];
                if frame.image != image {
                    return Err(PoseCountError::RecordingCsvInvalid {
                        path: path.to_path_buf(),
                        message: format!(
                            "Inconsistent image size in frame {}: {} vs {}",
                            row.frame, frame.image, image
                        ),
                    });
                }
                if frame.timestamp_ms != row.timestamp_ms {
                    return Err(PoseCountError::RecordingCsvInvalid {
                        path: path.to_path_buf(),
                        message: format!(
                            "Inconsistent timestamp in frame {}: {:?} vs {:?}",
                            row.frame, frame.timestamp_ms, row.timestamp_ms
                        ),
                    });
                }
                frame.landmarks.push(landmark);
            }
            None => {
                position_by_frame.insert(row.frame, frames.len());
                frames.push(LandmarkSet {
                    timestamp_ms: row.timestamp_ms,
                    image,
                    landmarks: vec![landmark],
                });
            }
        }
    }

    Ok(Recording::new(running_mode, frames))
}

fn recording_to_rows(recording: &Recording) -> Vec<LandmarkRow> {
    recording
        .frames
        .iter()
        .enumerate()
        .flat_map(|(frame_no, frame)| {
            frame.landmarks.iter().map(move |lm| LandmarkRow {
                frame: frame_no as u64,
                timestamp_ms: frame.timestamp_ms,
                image_width: frame.image.width,
                image_height: frame.image.height,
                index: lm.index.as_u32(),
                x: lm.x,
                y: lm.y,
                z: lm.z,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "frame,timestamp_ms,image_width,image_height,index,x,y,z
0,0,480,640,23,0.45,0.50,0.0
0,0,480,640,25,0.47,0.68,0.0
1,33,480,640,23,0.45,0.52,0.0
0,0,480,640,27,0.46,0.88,0.0
";

    #[test]
    fn test_rows_grouped_by_frame() {
        let recording = from_csv_str(SAMPLE, RunningMode::Video).expect("parse");
        assert_eq!(recording.running_mode, RunningMode::Video);
        assert_eq!(recording.frames.len(), 2);

        let first = &recording.frames[0];
        assert_eq!(first.timestamp_ms, Some(0));
        assert_eq!(first.len(), 3);
        assert!(first.contains(LandmarkIndex::LEFT_ANKLE));

        let second = &recording.frames[1];
        assert_eq!(second.timestamp_ms, Some(33));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_empty_timestamp_is_none() {
        let csv = "frame,timestamp_ms,image_width,image_height,index,x,y,z\n4,,100,100,0,0.5,0.5,0.0\n";
        let recording = from_csv_str(csv, RunningMode::Image).expect("parse");
        assert_eq!(recording.frames[0].timestamp_ms, None);
    }

    #[test]
    fn test_inconsistent_frame_size_rejected() {
        let csv = "frame,timestamp_ms,image_width,image_height,index,x,y,z
0,0,480,640,23,0.4,0.5,0.0
0,0,640,480,25,0.4,0.6,0.0
";
        let err = from_csv_str(csv, RunningMode::Image).unwrap_err();
        assert!(matches!(err, PoseCountError::RecordingCsvInvalid { .. }));
        assert!(err.to_string().contains("Inconsistent image size in frame 0"));
    }

    #[test]
    fn test_bad_number_is_parse_error() {
        let csv = "frame,timestamp_ms,image_width,image_height,index,x,y,z\n0,0,480,640,23,abc,0.5,0.0\n";
        let err = from_csv_str(csv, RunningMode::Image).unwrap_err();
        assert!(matches!(err, PoseCountError::RecordingCsvParse { .. }));
    }

    #[test]
    fn test_written_csv_renumbers_frames() {
        let recording = from_csv_str(SAMPLE, RunningMode::Video).expect("parse");
        let out = to_csv_string(&recording).expect("write");
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("frame,timestamp_ms,image_width,image_height,index,x,y,z")
        );
        assert_eq!(out.lines().count(), 5);
        assert!(out.contains("1,33,480,640,23,0.45,0.52,0.0"));
    }
}
