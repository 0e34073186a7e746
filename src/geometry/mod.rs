//! Geometric feature extraction.
//!
//! - [`CoordinateMapper`]: normalized landmark → surface pixel under a
//!   [`ScaleMode`].
//! - [`angle_at`]: three pixel points → joint angle in degrees.

mod angle;
mod mapper;

pub use angle::angle_at;
pub use mapper::{map_point, CoordinateMapper, ScaleMode};
