use std::path::Path;
use std::thread;

use posecount::config::{JointTriple, SessionConfig};
use posecount::geometry::ScaleMode;
use posecount::pose::io_csv::read_recording_csv;
use posecount::pose::io_json::{read_recording_json, write_recording_json};
use posecount::pose::{Dimensions, RunningMode};
use posecount::render::{DrawCommand, FrameOutput, SkipReason};
use posecount::session::Session;

#[test]
fn replay_delivers_events_to_a_consumer_thread() {
    let recording =
        read_recording_json(Path::new("tests/fixtures/squat_valid.json")).expect("read fixture");

    let mut session = Session::new(SessionConfig::default());
    let rx = session.subscribe();
    let consumer = thread::spawn(move || rx.iter().map(|e| e.count).collect::<Vec<_>>());

    let report = session.replay(&recording).clone();
    drop(session);

    assert_eq!(consumer.join().expect("consumer"), vec![1, 2]);
    assert_eq!(report.reps, 2);
    assert_eq!(report.events.iter().map(|m| m.frame).collect::<Vec<_>>(), vec![2, 4]);
    assert_eq!(report.events[0].timestamp_ms, Some(66));
    assert_eq!(report.scale_mode, Some(ScaleMode::Fit));
}

#[test]
fn json_and_csv_fixtures_agree() {
    let json =
        read_recording_json(Path::new("tests/fixtures/squat_valid.json")).expect("read json");
    let csv = read_recording_csv(Path::new("tests/fixtures/squat_valid.csv"), RunningMode::Video)
        .expect("read csv");

    let mut from_json = Session::default();
    let mut from_csv = Session::default();
    let a = from_json.replay(&json);
    let b = from_csv.replay(&csv);

    assert_eq!(a.reps, 2);
    assert_eq!(b.reps, 2);
    assert_eq!(
        a.events.iter().map(|m| (m.frame, m.timestamp_ms)).collect::<Vec<_>>(),
        b.events.iter().map(|m| (m.frame, m.timestamp_ms)).collect::<Vec<_>>()
    );
    assert_eq!(a.min_angle, b.min_angle);
    assert_eq!(a.max_angle, b.max_angle);
}

#[test]
fn configured_surface_scales_every_command() {
    let recording =
        read_recording_json(Path::new("tests/fixtures/squat_valid.json")).expect("read fixture");
    let mut session = Session::new(SessionConfig {
        surface: Some(Dimensions::new(240, 320)),
        ..Default::default()
    });

    let mut outputs = Vec::new();
    session.replay_with(&recording, |_, out| outputs.push(out.clone()));

    let first = &outputs[0];
    assert_eq!(first.scale_factor, 0.5);
    assert!(first.commands.iter().all(|c| match c {
        DrawCommand::Point { x, y } => *x <= 240.0 && *y <= 320.0,
        _ => true,
    }));
    assert_eq!(count_label(first), Some((120.0, 128.0, "Squats: 0".to_string())));
    assert_eq!(count_label(&outputs[4]), Some((120.0, 128.0, "Squats: 2".to_string())));
}

/// The count label, with its position rounded to a hundredth of a pixel.
fn count_label(output: &FrameOutput) -> Option<(f64, f64, String)> {
    output.commands.iter().find_map(|c| match c {
        DrawCommand::Text { x, y, text } if text.starts_with("Squats") => Some((
            (x * 100.0).round() / 100.0,
            (y * 100.0).round() / 100.0,
            text.clone(),
        )),
        _ => None,
    })
}

#[test]
fn untracked_leg_skips_every_frame() {
    let recording =
        read_recording_json(Path::new("tests/fixtures/squat_valid.json")).expect("read fixture");
    let mut session = Session::new(SessionConfig {
        joints: JointTriple::RIGHT_LEG,
        ..Default::default()
    });

    let mut skips = Vec::new();
    let report = session
        .replay_with(&recording, |_, out| skips.push(out.skipped))
        .clone();

    assert_eq!(report.reps, 0);
    assert_eq!(report.missing_landmark_frames, 5);
    assert!(skips.iter().all(|s| matches!(s, Some(SkipReason::MissingLandmark { .. }))));
}

#[test]
fn written_recording_replays_identically() {
    let recording =
        read_recording_json(Path::new("tests/fixtures/squat_valid.json")).expect("read fixture");
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("copy.json");
    write_recording_json(&path, &recording).expect("write");

    let copy = read_recording_json(&path).expect("read copy");
    let mut a = Session::default();
    let mut b = Session::default();
    assert_eq!(a.replay(&recording), b.replay(&copy));
}
