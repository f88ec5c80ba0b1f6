#![no_main]

use libfuzzer_sys::fuzz_target;
use takeoff::{Fact, InferenceEngine, HAS_VALUE};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut engine = InferenceEngine::new();
        engine.add_fact(Fact::has_value("x", 7));
        engine.add_fact(Fact::has_value("y", 0));
        if engine.add_rule_text(&format!("result = {}", s)).is_ok() {
            let _ = engine.query(HAS_VALUE, "result");
        }
    }
});
