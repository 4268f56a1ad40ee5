#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let engine = pure_formula::Engine::new();
    let _ = engine.render(data, true);
});
