#![no_main]

use deduce::Engine;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|depth: u8| {
    let depth = (depth as usize % 150) + 1;

    let mut expr = String::from("A");
    for i in 0..depth {
        let op = ["+", "|", "^"][i % 3];
        expr = format!("!({} {} B)", expr, op);
    }

    let code = format!("{} => C\n=A\n?C\n", expr);

    if let Ok(mut engine) = Engine::from_source(&code, "fuzz_nested") {
        let _ = engine.evaluate();
    }
});
