//! Fuzz target for replaying parsed recordings.
//!
//! Any recording that parses must replay and validate without panicking,
//! whatever its sizes, coordinates or timestamps.

#![no_main]

use libfuzzer_sys::fuzz_target;
use posecount::config::SessionConfig;
use posecount::pose::io_json::from_json_slice;
use posecount::session::Session;
use posecount::validation::{validate_recording, ValidateOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(recording) = from_json_slice(data) else {
        return;
    };

    let _ = validate_recording(&recording, &ValidateOptions::default());
    let mut session = Session::new(SessionConfig::default());
    let _ = session.replay(&recording);
});
