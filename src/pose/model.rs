//! Frame and recording model.
//!
//! A [`LandmarkSet`] is everything the pipeline knows about one processed
//! frame. A [`Recording`] is an ordered sequence of them, as dumped by a pose
//! model run, and is what the CLI replays.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::landmark::{Landmark, LandmarkIndex};
use crate::error::PoseCountError;
use crate::geometry::ScaleMode;

/// Pixel size of an image or drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if both sides are non-zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = PoseCountError;

    /// Parses `WIDTHxHEIGHT`, e.g. `480x640`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            PoseCountError::InvalidArgument(format!(
                "'{}' is not a size (expected WIDTHxHEIGHT, e.g. 480x640)",
                s
            ))
        };
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(width, height))
    }
}

/// The capture mode that produced a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningMode {
    /// A single still image.
    #[default]
    Image,
    /// Frames decoded from a video file.
    Video,
    /// Continuous camera capture shown in a cropping preview.
    LiveStream,
}

impl RunningMode {
    /// The scale policy a display of this mode uses.
    ///
    /// Still images and video are letterboxed; the live preview crops to fill
    /// the surface, so landmarks must be scaled up to match.
    pub fn scale_mode(self) -> ScaleMode {
        match self {
            RunningMode::Image | RunningMode::Video => ScaleMode::Fit,
            RunningMode::LiveStream => ScaleMode::Fill,
        }
    }
}

impl FromStr for RunningMode {
    type Err = PoseCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(RunningMode::Image),
            "video" => Ok(RunningMode::Video),
            "live-stream" | "live_stream" | "live" => Ok(RunningMode::LiveStream),
            other => Err(PoseCountError::InvalidArgument(format!(
                "unknown running mode '{}' (supported: image, video, live-stream)",
                other
            ))),
        }
    }
}

/// Landmarks for one tracked body in one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    /// Capture time, if the source provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,

    /// Size of the source image the landmarks were normalized against.
    pub image: Dimensions,

    /// Landmarks in model output order.
    pub landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(image: Dimensions, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms: None,
            image,
            landmarks,
        }
    }

    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    /// Looks up a landmark by anatomical index.
    ///
    /// Models may drop joints, so the set is searched rather than indexed by
    /// position. With duplicates the first occurrence wins.
    pub fn get(&self, index: LandmarkIndex) -> Option<&Landmark> {
        self.landmarks.iter().find(|lm| lm.index == index)
    }

    pub fn contains(&self, index: LandmarkIndex) -> bool {
        self.get(index).is_some()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// A replayable stream of frames from one tracking session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Capture mode; selects the default scale policy.
    #[serde(default)]
    pub running_mode: RunningMode,

    /// Display surface the overlay was drawn on, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<Dimensions>,

    pub frames: Vec<LandmarkSet>,
}

impl Recording {
    pub fn new(running_mode: RunningMode, frames: Vec<LandmarkSet>) -> Self {
        Self {
            running_mode,
            surface: None,
            frames,
        }
    }

    pub fn with_surface(mut self, surface: Dimensions) -> Self {
        self.surface = Some(surface);
        self
    }
}
