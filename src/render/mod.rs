//! Per-frame orchestration: landmarks in, draw list and rep events out.
//!
//! [`FrameRenderer::render`] maps every landmark onto the surface, derives the
//! tracked joint angle, advances the caller's [`RepCounter`] and rebuilds the
//! full overlay. Frame faults never abort rendering; they are reported as a
//! [`SkipReason`] and only the derived features (angle, count update) are
//! dropped for that frame.

mod command;
mod skeleton;

pub use command::DrawCommand;
pub use skeleton::POSE_CONNECTIONS;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{JointTriple, SessionConfig, DEFAULT_TEXT_OFFSET};
use crate::counter::{RepCounter, RepEvent};
use crate::geometry::{angle_at, CoordinateMapper, ScaleMode};
use crate::pose::{Coord, Dimensions, LandmarkIndex, LandmarkSet, Pixel};

/// Why a frame's angle and count update were not computed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The source image size has a zero side; points were drawn at the origin.
    InvalidDimensions { width: u32, height: u32 },
    /// One of the tracked joints is absent from the frame.
    MissingLandmark { index: LandmarkIndex },
    /// The tracked joints produced a NaN or infinite angle.
    NonFiniteAngle,
    /// The frame's timestamp is not after the previously processed frame.
    OutOfOrder { previous_ms: u64, timestamp_ms: u64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions {}x{}", width, height)
            }
            SkipReason::MissingLandmark { index } => write!(f, "missing landmark {}", index),
            SkipReason::NonFiniteAngle => write!(f, "non-finite joint angle"),
            SkipReason::OutOfOrder {
                previous_ms,
                timestamp_ms,
            } => write!(
                f,
                "timestamp {} ms does not follow previous frame at {} ms",
                timestamp_ms, previous_ms
            ),
        }
    }
}

/// Everything produced for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameOutput {
    /// Full overlay for this frame: points, bones, then labels.
    pub commands: Vec<DrawCommand>,
    /// Tracked joint angle in degrees, when it could be computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Rep completed on this frame, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<RepEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    /// Scale factor the landmarks were mapped with.
    pub scale_factor: f64,
}

/// Builds the overlay for one frame and feeds the tracked angle to a counter.
///
/// The renderer holds configuration only; counter state lives with the
/// caller and is passed in per frame.
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    joints: JointTriple,
    text_offset: f64,
}

impl FrameRenderer {
    pub fn new(joints: JointTriple) -> Self {
        Self {
            joints,
            text_offset: DEFAULT_TEXT_OFFSET,
        }
    }

    pub fn with_text_offset(mut self, text_offset: f64) -> Self {
        self.text_offset = text_offset;
        self
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.joints).with_text_offset(config.text_offset)
    }

    pub fn joints(&self) -> JointTriple {
        self.joints
    }

    pub fn render(
        &self,
        frame: &LandmarkSet,
        surface: Dimensions,
        mode: ScaleMode,
        counter: &mut RepCounter,
    ) -> FrameOutput {
        self.draw(frame, surface, mode, counter, None)
    }

    /// Draws points, bones and the current count for a frame that must not
    /// reach the counter. The output carries `reason` and no angle.
    pub fn render_skipped(
        &self,
        frame: &LandmarkSet,
        surface: Dimensions,
        mode: ScaleMode,
        counter: &RepCounter,
        reason: SkipReason,
    ) -> FrameOutput {
        // The copy only supplies the count label; it is never updated.
        let mut frozen = counter.clone();
        self.draw(frame, surface, mode, &mut frozen, Some(reason))
    }

    fn draw(
        &self,
        frame: &LandmarkSet,
        surface: Dimensions,
        mode: ScaleMode,
        counter: &mut RepCounter,
        rejected: Option<SkipReason>,
    ) -> FrameOutput {
        let (mapper, mut skipped) = match CoordinateMapper::new(frame.image, surface, mode) {
            Ok(mapper) => (mapper, rejected),
            Err(err) => {
                warn!(%err, "mapping frame with zero scale");
                (
                    CoordinateMapper::degenerate(frame.image, surface, mode),
                    rejected.or(Some(SkipReason::InvalidDimensions {
                        width: frame.image.width,
                        height: frame.image.height,
                    })),
                )
            }
        };

        let mut commands = Vec::with_capacity(frame.len() + POSE_CONNECTIONS.len() + 2);

        // First occurrence wins for duplicated indices, matching LandmarkSet::get.
        let mut pixels: HashMap<LandmarkIndex, Coord<Pixel>> = HashMap::new();
        for landmark in &frame.landmarks {
            let at = mapper.map_landmark(landmark);
            pixels.entry(landmark.index).or_insert(at);
            commands.push(DrawCommand::point(at));
        }

        for (start, end) in POSE_CONNECTIONS {
            if let (Some(&from), Some(&to)) = (pixels.get(&start), pixels.get(&end)) {
                commands.push(DrawCommand::line(from, to));
            }
        }

        let mut angle = None;
        let mut event = None;
        if skipped.is_none() {
            match self.locate_joints(&pixels) {
                Ok([hip, knee, ankle]) => {
                    let degrees = angle_at(hip, knee, ankle);
                    if degrees.is_finite() {
                        angle = Some(degrees);
                        event = counter.update(degrees);
                        commands.push(DrawCommand::text(
                            knee.offset(0.0, -self.text_offset),
                            format!("Knee Angle: {:.2}", degrees),
                        ));
                    } else {
                        skipped = Some(SkipReason::NonFiniteAngle);
                    }
                }
                Err(index) => {
                    skipped = Some(SkipReason::MissingLandmark { index });
                }
            }
        }

        if let Some(reason) = &skipped {
            debug!(%reason, "skipping angle and count for frame");
        }

        if let Some(&hip) = pixels.get(&self.joints.hip) {
            commands.push(DrawCommand::text(hip, format!("Squats: {}", counter.count())));
        }

        FrameOutput {
            commands,
            angle,
            event,
            skipped,
            scale_factor: mapper.scale_factor(),
        }
    }

    /// Pixel positions of hip, knee and ankle, or the first missing index.
    fn locate_joints(
        &self,
        pixels: &HashMap<LandmarkIndex, Coord<Pixel>>,
    ) -> Result<[Coord<Pixel>; 3], LandmarkIndex> {
        let lookup = |index: LandmarkIndex| pixels.get(&index).copied().ok_or(index);
        Ok([
            lookup(self.joints.hip)?,
            lookup(self.joints.knee)?,
            lookup(self.joints.ankle)?,
        ])
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new(JointTriple::default())
    }
}
