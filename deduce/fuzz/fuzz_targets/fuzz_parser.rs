#![no_main]

use deduce::{parse, ResourceLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse(s, Some("fuzz_input".to_string()), &ResourceLimits::default());
    }
});
