//! Normalized landmark space to surface pixel space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PoseCountError;
use crate::pose::{Coord, Dimensions, Landmark, Normalized, Pixel};

/// How an image of one aspect ratio is placed on a surface of another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Contain: the whole image stays visible, the surface may letterbox.
    #[default]
    Fit,
    /// Cover: the image fills the surface and the overflow is cropped.
    Fill,
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMode::Fit => write!(f, "fit"),
            ScaleMode::Fill => write!(f, "fill"),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = PoseCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fit" | "contain" => Ok(ScaleMode::Fit),
            "fill" | "cover" => Ok(ScaleMode::Fill),
            other => Err(PoseCountError::InvalidArgument(format!(
                "unknown scale mode '{}' (supported: fit, fill)",
                other
            ))),
        }
    }
}

/// Maps normalized landmarks onto a drawing surface.
///
/// A mapper is built for one (image size, surface size, mode) combination and
/// never changes afterwards; when either size changes, build a new one. The
/// computed scale factor is exposed read-only for renderers that need it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    image: Dimensions,
    surface: Dimensions,
    mode: ScaleMode,
    scale_factor: f64,
}

impl CoordinateMapper {
    /// Builds a mapper for the given source image and target surface.
    ///
    /// The scale factor is `min(sw / iw, sh / ih)` for [`ScaleMode::Fit`] and
    /// the `max` of the same ratios for [`ScaleMode::Fill`]. A zero-sized
    /// surface is allowed and yields a degenerate but defined mapping.
    ///
    /// # Errors
    /// Returns [`PoseCountError::InvalidDimensions`] if the image width or
    /// height is zero.
    pub fn new(
        image: Dimensions,
        surface: Dimensions,
        mode: ScaleMode,
    ) -> Result<Self, PoseCountError> {
        if !image.is_positive() {
            return Err(PoseCountError::InvalidDimensions {
                width: image.width,
                height: image.height,
            });
        }

        let ratio_x = f64::from(surface.width) / f64::from(image.width);
        let ratio_y = f64::from(surface.height) / f64::from(image.height);
        let scale_factor = match mode {
            ScaleMode::Fit => ratio_x.min(ratio_y),
            ScaleMode::Fill => ratio_x.max(ratio_y),
        };

        Ok(Self {
            image,
            surface,
            mode,
            scale_factor,
        })
    }

    /// A mapper with scale factor 0 that sends every point to the origin.
    ///
    /// Used in place of [`CoordinateMapper::new`] when the image size is
    /// unusable, so raw points can still be emitted.
    pub fn degenerate(image: Dimensions, surface: Dimensions, mode: ScaleMode) -> Self {
        Self {
            image,
            surface,
            mode,
            scale_factor: 0.0,
        }
    }

    #[inline]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn image(&self) -> Dimensions {
        self.image
    }

    pub fn surface(&self) -> Dimensions {
        self.surface
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Maps a normalized point to surface pixels.
    #[inline]
    pub fn map(&self, point: Coord<Normalized>) -> Coord<Pixel> {
        Coord::new(
            point.x * f64::from(self.image.width) * self.scale_factor,
            point.y * f64::from(self.image.height) * self.scale_factor,
        )
    }

    #[inline]
    pub fn map_landmark(&self, landmark: &Landmark) -> Coord<Pixel> {
        self.map(landmark.position())
    }
}

/// Maps a single normalized point without keeping the mapper around.
pub fn map_point(
    point: Coord<Normalized>,
    image: Dimensions,
    surface: Dimensions,
    mode: ScaleMode,
) -> Result<Coord<Pixel>, PoseCountError> {
    Ok(CoordinateMapper::new(image, surface, mode)?.map(point))
}
