#![no_main]

use libfuzzer_sys::fuzz_target;
use takeoff::ProjectRegistry;

fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = serde_json::from_slice::<serde_json::Value>(data) {
        let registry = ProjectRegistry::with_builtin_types();
        if let Ok(project) = registry.from_json(&payload) {
            let _ = project.to_json();
        }
    }
});
