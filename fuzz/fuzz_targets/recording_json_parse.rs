//! Fuzz target for recording JSON parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the recording JSON parser,
//! checking for panics, crashes, or hangs.
//!
//! Run with:
//!   cargo +nightly fuzz run recording_json_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use posecount::pose::io_json::from_json_slice;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_json_slice(data);
});
