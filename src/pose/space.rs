//! Coordinate space markers.
//!
//! Landmarks arrive from the pose model in a resolution-independent space and
//! leave the pipeline in surface pixels. The two markers below keep those
//! apart at compile time.

use std::fmt;

/// Surface pixel space: absolute positions on the drawing surface, origin at
/// the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Normalized image space: fractions of the source image width and height,
/// nominally in `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
