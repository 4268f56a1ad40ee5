#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    formula: &'a str,
    variables: Vec<(&'a str, Option<&'a str>)>,
    aliases: Vec<(&'a str, bool)>,
    collapse_spaces: bool,
    reset_on_finish: bool,
}

fuzz_target!(|input: Input<'_>| {
    let mut engine = pure_formula::Engine::new();
    for (name, value) in input.variables {
        engine.set_variable(name, value);
    }
    for (name, enabled) in input.aliases {
        engine.set_alias(name, enabled);
    }
    let before = engine.symbols().clone();
    match engine.execute(input.formula, input.collapse_spaces, input.reset_on_finish) {
        Ok(_) if input.reset_on_finish => assert!(engine.symbols().is_empty()),
        Ok(_) => assert_eq!(engine.symbols(), &before),
        Err(_) => assert_eq!(engine.symbols(), &before),
    }
});
