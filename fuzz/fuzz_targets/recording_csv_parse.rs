//! Fuzz target for long-form CSV recording parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use posecount::pose::io_csv::from_csv_slice;
use posecount::pose::RunningMode;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_csv_slice(data, RunningMode::Video);
});
