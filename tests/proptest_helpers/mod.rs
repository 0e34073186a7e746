#![allow(dead_code)]

use posecount::pose::{Dimensions, Landmark, LandmarkIndex, LandmarkSet, Recording, RunningMode};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Relative comparison for values that went through a multiply.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
}

pub fn arb_dimensions() -> impl Strategy<Value = Dimensions> {
    (1u32..4096, 1u32..4096).prop_map(|(w, h)| Dimensions::new(w, h))
}

pub fn arb_running_mode() -> impl Strategy<Value = RunningMode> {
    prop_oneof![
        Just(RunningMode::Image),
        Just(RunningMode::Video),
        Just(RunningMode::LiveStream),
    ]
}

/// A point on an integer grid, so angle differences never collapse to
/// rounding noise.
pub fn arb_grid_point() -> impl Strategy<Value = (f64, f64)> {
    (-100i32..=100, -100i32..=100).prop_map(|(x, y)| (x as f64, y as f64))
}

/// Knee angles spread around the default 200 degree threshold.
pub fn arb_angle_sequence(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(100.0f64..300.0, 0..max_len)
}

pub fn arb_landmark(index: u32) -> impl Strategy<Value = Landmark> {
    (0.0f64..=1.0, 0.0f64..=1.0, -1.0f64..=1.0)
        .prop_map(move |(x, y, z)| Landmark::new(LandmarkIndex::new(index), x, y, z))
}

/// A frame carrying the left-leg joints plus a few distinct upper-body points.
pub fn arb_frame(image: Dimensions) -> impl Strategy<Value = LandmarkSet> {
    let leg = (
        arb_landmark(LandmarkIndex::LEFT_HIP.as_u32()),
        arb_landmark(LandmarkIndex::LEFT_KNEE.as_u32()),
        arb_landmark(LandmarkIndex::LEFT_ANKLE.as_u32()),
    );
    let upper_body: Vec<u32> = (0..LandmarkIndex::LEFT_HIP.as_u32()).collect();
    let extras = prop::sample::subsequence(upper_body, 0..5).prop_flat_map(|indices| {
        indices.into_iter().map(arb_landmark).collect::<Vec<_>>()
    });

    (leg, extras).prop_map(move |((hip, knee, ankle), extras)| {
        let mut landmarks = vec![hip, knee, ankle];
        landmarks.extend(extras);
        LandmarkSet::new(image, landmarks)
    })
}

/// A recording with strictly increasing timestamps and one image size.
pub fn arb_recording(max_frames: usize) -> impl Strategy<Value = Recording> {
    (arb_running_mode(), arb_dimensions()).prop_flat_map(move |(mode, image)| {
        prop::collection::vec((arb_frame(image), 1u64..100), 1..max_frames).prop_map(
            move |frames| {
                let mut timestamp_ms = 0;
                let frames = frames
                    .into_iter()
                    .map(|(frame, step)| {
                        timestamp_ms += step;
                        frame.with_timestamp(timestamp_ms)
                    })
                    .collect();
                Recording::new(mode, frames)
            },
        )
    })
}
