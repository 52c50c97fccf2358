#![no_main]

use deduce::{parse_symbols, Engine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (facts, queries) = data;
    let Ok(mut engine) = Engine::from_source("A + B => C\nC ^ D => E\n=A\n?E\n", "fuzz") else {
        return;
    };

    if let Ok(names) = parse_symbols(facts) {
        let _ = engine.set_facts(&names);
    }
    if let Ok(names) = parse_symbols(queries) {
        let _ = engine.set_queries(&names);
    }
    let _ = engine.evaluate();
});
