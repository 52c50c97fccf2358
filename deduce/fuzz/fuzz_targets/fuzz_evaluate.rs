#![no_main]

use deduce::Engine;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(mut engine) = Engine::from_source(s, "fuzz_input") {
            // Contradictions are fine, panics are not
            let _ = engine.evaluate();
        }
    }
});
