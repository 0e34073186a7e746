//! Recording validation for posecount.
//!
//! Checks a [`Recording`] before replay for:
//! - Structural integrity (non-empty, increasing timestamps, unique indices)
//! - Usable frames (positive image size, tracked joints present)
//! - Landmark quality (finite values, coordinates inside the image)

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::collections::HashSet;

use crate::config::JointTriple;
use crate::pose::{LandmarkIndex, LandmarkSet, Recording};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, callers should treat warnings as errors.
    pub strict: bool,
    /// Joints that must be present for a frame to be counted.
    pub joints: JointTriple,
}

/// Validates a recording and returns a report of all issues found.
pub fn validate_recording(recording: &Recording, opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();

    if recording.frames.is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyRecording,
            "Recording contains no frames",
            IssueContext::Recording,
        ));
        return report;
    }

    validate_timestamps(recording, &mut report);

    for (position, frame) in recording.frames.iter().enumerate() {
        validate_frame(position, frame, &opts.joints, &mut report);
    }

    report
}

fn validate_timestamps(recording: &Recording, report: &mut ValidationReport) {
    let mut previous: Option<u64> = None;

    for (position, frame) in recording.frames.iter().enumerate() {
        let Some(ts) = frame.timestamp_ms else {
            continue;
        };
        if let Some(prev) = previous {
            if ts <= prev {
                report.add(ValidationIssue::error(
                    IssueCode::NonMonotonicTimestamp,
                    format!("Timestamp {} ms does not follow previous {} ms", ts, prev),
                    IssueContext::Frame { frame: position },
                ));
                // Keep the high-water mark, as replay does.
                continue;
            }
        }
        previous = Some(ts);
    }
}

fn validate_frame(
    position: usize,
    frame: &LandmarkSet,
    joints: &JointTriple,
    report: &mut ValidationReport,
) {
    let context = IssueContext::Frame { frame: position };

    if !frame.image.is_positive() {
        report.add(ValidationIssue::error(
            IssueCode::InvalidFrameDimensions,
            format!("Invalid image dimensions {} (must be positive)", frame.image),
            context.clone(),
        ));
    }

    if frame.is_empty() {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyFrame,
            "Frame has no landmarks",
            context,
        ));
        return;
    }

    let mut seen: HashSet<LandmarkIndex> = HashSet::new();
    for landmark in &frame.landmarks {
        let index = landmark.index;
        let landmark_context = IssueContext::Landmark {
            frame: position,
            index,
        };

        if !seen.insert(index) {
            report.add(ValidationIssue::error(
                IssueCode::DuplicateLandmarkIndex,
                format!("Landmark index {} appears more than once", index),
                landmark_context.clone(),
            ));
        }

        if !landmark.is_finite() {
            report.add(ValidationIssue::error(
                IssueCode::LandmarkNotFinite,
                format!(
                    "Non-finite coordinates ({}, {}, {})",
                    landmark.x, landmark.y, landmark.z
                ),
                landmark_context,
            ));
            continue;
        }

        if !landmark.position().is_within_unit_square() {
            report.add(ValidationIssue::warning(
                IssueCode::LandmarkOutOfRange,
                format!(
                    "Normalized position ({:.3}, {:.3}) lies outside [0, 1]",
                    landmark.x, landmark.y
                ),
                landmark_context,
            ));
        }
    }

    for index in joints.indices() {
        if !seen.contains(&index) {
            report.add(ValidationIssue::warning(
                IssueCode::MissingTrackedLandmark,
                format!("Tracked landmark {} is missing; frame will not be counted", index),
                context.clone(),
            ));
        }
    }
}
