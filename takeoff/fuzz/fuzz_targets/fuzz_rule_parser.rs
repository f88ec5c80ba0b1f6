#![no_main]

use libfuzzer_sys::fuzz_target;
use takeoff::{parse_rule, ResourceLimits};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_rule(s, &ResourceLimits::default());
    }
});
