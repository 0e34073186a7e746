//! Replay summary.

use serde::Serialize;
use std::fmt;

use crate::geometry::ScaleMode;

/// Where in the stream a rep was completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RepMark {
    /// Zero-based position of the frame within the session.
    pub frame: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    /// Count after this rep.
    pub count: u32,
}

/// Summary of everything a session has processed so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SessionReport {
    pub frames: usize,
    /// Frames whose angle reached the counter.
    pub frames_counted: usize,
    pub frames_skipped: usize,
    pub missing_landmark_frames: usize,
    pub invalid_dimension_frames: usize,
    pub non_finite_angle_frames: usize,
    pub out_of_order_frames: usize,
    pub reps: u32,
    pub events: Vec<RepMark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_angle: Option<f64>,
    pub threshold: f64,
    pub hysteresis: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_mode: Option<ScaleMode>,
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Squats counted: {}", self.reps)?;
        writeln!(f)?;
        writeln!(
            f,
            "Frames: {} processed, {} counted, {} skipped",
            self.frames, self.frames_counted, self.frames_skipped
        )?;
        if self.frames_skipped > 0 {
            writeln!(f, "  missing landmark:   {}", self.missing_landmark_frames)?;
            writeln!(f, "  invalid dimensions: {}", self.invalid_dimension_frames)?;
            writeln!(f, "  non-finite angle:   {}", self.non_finite_angle_frames)?;
            writeln!(f, "  out of order:       {}", self.out_of_order_frames)?;
        }

        write!(f, "Threshold: {:.1}°", self.threshold)?;
        if self.hysteresis > 0.0 {
            write!(f, " ± {:.1}°", self.hysteresis)?;
        }
        if let Some(mode) = self.scale_mode {
            write!(f, " (scale: {})", mode)?;
        }
        writeln!(f)?;

        if let (Some(min), Some(max)) = (self.min_angle, self.max_angle) {
            writeln!(f, "Angle range: {:.2}° .. {:.2}°", min, max)?;
        }

        if !self.events.is_empty() {
            writeln!(f)?;
            writeln!(f, "Reps:")?;
            for mark in &self.events {
                match mark.timestamp_ms {
                    Some(ts) => writeln!(f, "  #{:<3} frame {} ({} ms)", mark.count, mark.frame, ts)?,
                    None => writeln!(f, "  #{:<3} frame {}", mark.count, mark.frame)?,
                }
            }
        }

        Ok(())
    }
}
