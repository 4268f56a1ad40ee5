use pure_formula::{Engine, Error, ErrorKind};

#[test]
fn compile_empty() {
    let result = Engine::new().render("", true).unwrap();
    assert_eq!(result, "");
}

#[test]
fn compile_nested_blocks() {
    Engine::new()
        .render("$[a $[b $[c ## d] ## e] ## f]", true)
        .unwrap();
}

#[test]
fn compile_empty_block() {
    let result = Engine::new().render("lorem $[] ipsum", true).unwrap();
    assert_eq!(result, "lorem ipsum");
}

#[test]
fn compile_err_unterminated_block() {
    let err = Engine::new().render("lorem $[ipsum", true).unwrap_err();
    assert_err(
        &err,
        ErrorKind::UnterminatedBlock,
        "unterminated block",
        "
   |
 1 | lorem $[ipsum
   |       ^^ unterminated block
",
    );
    assert_eq!(err.span(), 6..8);
}

#[test]
fn compile_err_unterminated_block_fallback() {
    let err = Engine::new()
        .render("lorem $[ipsum ## dolor $[sit]", true)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnterminatedBlock);
    assert_eq!(err.span(), 6..8);
}

#[test]
fn compile_err_alternation_outside_block() {
    let err = Engine::new()
        .render("lorem $[ipsum] ## dolor", true)
        .unwrap_err();
    assert_err(
        &err,
        ErrorKind::AlternationOutsideBlock,
        "alternation outside of a block",
        "
   |
 1 | lorem $[ipsum] ## dolor
   |                ^^ alternation outside of a block
",
    );
}

#[test]
fn compile_err_guard_after_alternation() {
    let err = Engine::new()
        .render(
            "You have $[:none: no coupons ## :one: one coupon ## $number coupons]",
            true,
        )
        .unwrap_err();
    assert_err(
        &err,
        ErrorKind::MisplacedAliasGuard,
        "alias guard must directly follow the start of a block",
        "
   |
 1 | You have $[:none: no coupons ## :one: one coupon ## $number coupons]
   |                                 ^^^^^ alias guard must directly follow the start of a block
",
    );
}

#[test]
fn compile_err_multiline() {
    let err = Engine::new()
        .render("lorem\nipsum $[dolor\nsit", true)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnterminatedBlock);
    assert_eq!(
        format!("{err:#}"),
        "
   |
 2 | ipsum $[dolor
   |       ^^ unterminated block
"
    );
}

#[test]
fn compile_err_display() {
    let err = Engine::new().render("lorem ## ipsum", true).unwrap_err();
    assert_eq!(
        err.to_string(),
        "alternation outside of a block between bytes 6 and 8"
    );
    assert_eq!(err.reason(), "alternation outside of a block");
}

#[test]
fn compile_err_is_std_error() {
    fn check(_: &dyn std::error::Error) {}
    let err = Engine::new().render("$[", true).unwrap_err();
    check(&err);
}

#[track_caller]
fn assert_err(err: &Error, kind: ErrorKind, reason: &str, pretty: &str) {
    let display = format!("{err}");
    let display_alt = format!("{err:#}");
    let debug = format!("{err:?}");
    assert_eq!(err.kind(), kind);
    assert!(display.starts_with(reason), "{display}");
    assert_eq!(display_alt, pretty);
    assert_eq!(debug, pretty);
}

#[test]
fn compile_deeply_nested_blocks() {
    let engine = Engine::new();

    let result = engine.render(&nested(128), true).unwrap();
    assert_eq!(result, "x");

    for depth in [129, 1_000, 100_000] {
        let err = engine.render(&nested(depth), true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
        assert_eq!(err.span(), 256..258);
    }
}

#[test]
fn compile_err_nesting_too_deep_display() {
    let err = Engine::new().render(&nested(129), true).unwrap_err();
    assert_eq!(
        err.to_string(),
        "blocks nested deeper than 128 levels between bytes 256 and 258"
    );
}

fn nested(depth: usize) -> String {
    format!("{}x{}", "$[".repeat(depth), "]".repeat(depth))
}
