//! Landmark indices and single landmarks.
//!
//! Indices follow the 33-point BlazePose layout emitted by the pose model.
//! The counting pipeline never hard-codes them; it reads the tracked joints
//! from a [`JointTriple`](crate::config::JointTriple).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::coord::Coord;
use super::Normalized;

/// Position of a landmark in the pose model's anatomical vocabulary.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkIndex(pub u32);

impl LandmarkIndex {
    pub const NOSE: Self = Self(0);
    pub const LEFT_EYE_INNER: Self = Self(1);
    pub const LEFT_EYE: Self = Self(2);
    pub const LEFT_EYE_OUTER: Self = Self(3);
    pub const RIGHT_EYE_INNER: Self = Self(4);
    pub const RIGHT_EYE: Self = Self(5);
    pub const RIGHT_EYE_OUTER: Self = Self(6);
    pub const LEFT_EAR: Self = Self(7);
    pub const RIGHT_EAR: Self = Self(8);
    pub const MOUTH_LEFT: Self = Self(9);
    pub const MOUTH_RIGHT: Self = Self(10);
    pub const LEFT_SHOULDER: Self = Self(11);
    pub const RIGHT_SHOULDER: Self = Self(12);
    pub const LEFT_ELBOW: Self = Self(13);
    pub const RIGHT_ELBOW: Self = Self(14);
    pub const LEFT_WRIST: Self = Self(15);
    pub const RIGHT_WRIST: Self = Self(16);
    pub const LEFT_PINKY: Self = Self(17);
    pub const RIGHT_PINKY: Self = Self(18);
    pub const LEFT_INDEX: Self = Self(19);
    pub const RIGHT_INDEX: Self = Self(20);
    pub const LEFT_THUMB: Self = Self(21);
    pub const RIGHT_THUMB: Self = Self(22);
    pub const LEFT_HIP: Self = Self(23);
    pub const RIGHT_HIP: Self = Self(24);
    pub const LEFT_KNEE: Self = Self(25);
    pub const RIGHT_KNEE: Self = Self(26);
    pub const LEFT_ANKLE: Self = Self(27);
    pub const RIGHT_ANKLE: Self = Self(28);
    pub const LEFT_HEEL: Self = Self(29);
    pub const RIGHT_HEEL: Self = Self(30);
    pub const LEFT_FOOT_INDEX: Self = Self(31);
    pub const RIGHT_FOOT_INDEX: Self = Self(32);

    /// Number of landmarks in the full-body layout.
    pub const COUNT: u32 = 33;

    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for LandmarkIndex {
    fn from(index: u32) -> Self {
        LandmarkIndex::new(index)
    }
}

impl fmt::Debug for LandmarkIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LandmarkIndex({})", self.0)
    }
}

impl fmt::Display for LandmarkIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One detected body keypoint.
///
/// `x` and `y` are normalized to the source image, `z` is the model's relative
/// depth and is carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub index: LandmarkIndex,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,

    /// Model-reported visibility score, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    pub fn new(index: impl Into<LandmarkIndex>, x: f64, y: f64, z: f64) -> Self {
        Self {
            index: index.into(),
            x,
            y,
            z,
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: f64) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// The landmark's image-plane position.
    #[inline]
    pub fn position(&self) -> Coord<Normalized> {
        Coord::new(self.x, self.y)
    }

    /// Returns true if x, y and z are all finite.
    pub fn is_finite(&self) -> bool {
        self.position().is_finite() && self.z.is_finite()
    }
}
