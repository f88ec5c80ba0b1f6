#![no_main]

use libfuzzer_sys::fuzz_target;
use takeoff::InferenceEngine;

fuzz_target!(|depth: u8| {
    let mut engine = InferenceEngine::new();

    let depth = (depth as usize % 150) + 1;

    let mut expr = String::from("1");
    for _ in 0..depth {
        expr = format!("({} + 1)", expr);
    }

    let _ = engine.add_rule_text(&format!("deeply_nested = {}", expr));
});
