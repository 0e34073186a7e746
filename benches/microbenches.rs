//! Criterion microbenches for posecount's per-frame path.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Recording JSON parsing (from_json_str)
//! - Joint angles and coordinate mapping
//! - Full session replay (mapping, drawing, counting)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use posecount::config::SessionConfig;
use posecount::geometry::{angle_at, CoordinateMapper, ScaleMode};
use posecount::pose::io_json::from_json_str;
use posecount::pose::{Coord, Dimensions};
use posecount::session::Session;

// Include test fixtures at compile time (no file I/O during benchmark)
const RECORDING_FIXTURE: &str = include_str!("../tests/fixtures/squat_valid.json");

/// Benchmark recording JSON parsing.
fn bench_recording_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("recording_parse");
    group.throughput(Throughput::Bytes(RECORDING_FIXTURE.len() as u64));

    group.bench_function("from_json_str", |b| {
        b.iter(|| {
            let recording = from_json_str(black_box(RECORDING_FIXTURE)).unwrap();
            black_box(recording)
        })
    });

    group.finish();
}

/// Benchmark the geometry primitives.
fn bench_geometry(c: &mut Criterion) {
    let mapper = CoordinateMapper::new(
        Dimensions::new(480, 640),
        Dimensions::new(1080, 1920),
        ScaleMode::Fill,
    )
    .unwrap();

    let mut group = c.benchmark_group("geometry");

    group.bench_function("angle_at", |b| {
        b.iter(|| {
            black_box(angle_at(
                black_box(Coord::new(240.0, 256.0)),
                black_box(Coord::new(312.0, 384.0)),
                black_box(Coord::new(240.0, 512.0)),
            ))
        })
    });

    group.bench_function("map", |b| {
        b.iter(|| black_box(mapper.map(black_box(Coord::new(0.42, 0.61)))))
    });

    group.finish();
}

/// Benchmark replaying a whole recording through a fresh session.
fn bench_replay(c: &mut Criterion) {
    // Parse the fixture once (outside the timed region)
    let recording = from_json_str(RECORDING_FIXTURE).expect("Failed to parse recording fixture");

    let mut group = c.benchmark_group("session");
    group.throughput(Throughput::Elements(recording.frames.len() as u64));

    group.bench_function("replay", |b| {
        b.iter(|| {
            let mut session = Session::new(SessionConfig::default());
            let reps = session.replay(black_box(&recording)).reps;
            black_box(reps)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_recording_parse, bench_geometry, bench_replay);
criterion_main!(benches);
