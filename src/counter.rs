//! Squat repetition counting.
//!
//! [`RepCounter`] is a two-state machine over the joint-angle stream. A sample
//! below the threshold moves it from [`Phase::Up`] to [`Phase::Down`]; the
//! next sample at or above the threshold moves it back and completes a rep.
//!
//! ```
//! use posecount::counter::{Phase, RepCounter};
//!
//! let mut counter = RepCounter::new(200.0);
//! assert_eq!(counter.update(250.0), None);
//! assert_eq!(counter.update(180.0), None);
//! assert_eq!(counter.phase(), Phase::Down);
//! let event = counter.update(210.0).expect("rep completed");
//! assert_eq!(event.count, 1);
//! ```
//!
//! With the default zero hysteresis a stream that hovers on the threshold
//! toggles on every crossing. A positive margin widens the boundary into a
//! band: entering `Down` needs `angle < threshold - margin` and leaving it
//! needs `angle >= threshold + margin`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Default knee-angle threshold in degrees, in the sweep convention of
/// [`angle_at`](crate::geometry::angle_at).
pub const DEFAULT_THRESHOLD: f64 = 200.0;

/// Which side of the threshold the joint is on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Standing; the initial phase.
    #[default]
    Up,
    /// Squatting.
    Down,
}

/// Counter state persisted across frames of one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepCounterState {
    pub phase: Phase,
    pub count: u32,
}

/// Emitted once per completed down→up cycle.
///
/// Carries a snapshot of the new count so consumers never need to read the
/// counter itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepEvent {
    pub count: u32,
}

/// Threshold-crossing rep counter.
///
/// Must be fed samples in frame order from a single owner; `update` takes
/// `&mut self` so the borrow checker enforces that.
#[derive(Clone, Debug, PartialEq)]
pub struct RepCounter {
    threshold: f64,
    hysteresis: f64,
    state: RepCounterState,
}

impl RepCounter {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            hysteresis: 0.0,
            state: RepCounterState::default(),
        }
    }

    /// Sets the hysteresis margin in degrees. Negative or NaN margins are
    /// treated as zero.
    pub fn with_hysteresis(mut self, margin: f64) -> Self {
        self.hysteresis = margin.max(0.0);
        self
    }

    /// Feeds one angle sample and returns an event if it completed a rep.
    ///
    /// Non-finite samples are ignored.
    pub fn update(&mut self, angle: f64) -> Option<RepEvent> {
        if !angle.is_finite() {
            warn!(angle, "ignoring non-finite angle sample");
            return None;
        }

        match self.state.phase {
            Phase::Up if angle < self.threshold - self.hysteresis => {
                self.state.phase = Phase::Down;
                trace!(angle, threshold = self.threshold, "phase up -> down");
                None
            }
            Phase::Down if angle >= self.threshold + self.hysteresis => {
                self.state.phase = Phase::Up;
                self.state.count += 1;
                debug!(angle, count = self.state.count, "rep completed");
                Some(RepEvent {
                    count: self.state.count,
                })
            }
            _ => None,
        }
    }

    /// Returns to `Up` with a zero count. Safe to call at any time.
    pub fn reset(&mut self) {
        self.state = RepCounterState::default();
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.state.count
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> RepCounterState {
        self.state
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn hysteresis(&self) -> f64 {
        self.hysteresis
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
