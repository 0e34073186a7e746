//! Pose landmark model for posecount.
//!
//! Types in this module describe what the external pose model hands us:
//! normalized landmarks with anatomical indices, grouped per frame together
//! with the source image size.
//!
//! # Design Principles
//!
//! 1. **Space tagging**: [`Coord`] carries a [`Normalized`] or [`Pixel`]
//!    marker so a landmark cannot be drawn without being mapped first.
//!
//! 2. **Lookup by index**: a [`LandmarkSet`] may omit joints the model did not
//!    detect. Consumers ask for an index and handle `None`.
//!
//! 3. **Permissive construction**: out-of-range or non-finite values are
//!    representable so that [`validation`](crate::validation) can report them.
//!
//! # Example
//!
//! ```
//! use posecount::pose::{Dimensions, Landmark, LandmarkIndex, LandmarkSet};
//!
//! let frame = LandmarkSet::new(
//!     Dimensions::new(480, 640),
//!     vec![
//!         Landmark::new(LandmarkIndex::LEFT_HIP, 0.45, 0.50, 0.0),
//!         Landmark::new(LandmarkIndex::LEFT_KNEE, 0.47, 0.68, 0.0),
//!         Landmark::new(LandmarkIndex::LEFT_ANKLE, 0.46, 0.88, 0.0),
//!     ],
//! );
//! assert!(frame.contains(LandmarkIndex::LEFT_KNEE));
//! ```

mod coord;
pub mod io_csv;
pub mod io_json;
mod landmark;
mod model;
mod space;

pub use coord::Coord;
pub use landmark::{Landmark, LandmarkIndex};
pub use model::{Dimensions, LandmarkSet, Recording, RunningMode};
pub use space::{Normalized, Pixel};
