use pure_formula::{Engine, ErrorKind, Syntax};

#[test]
fn syntax_default() {
    let syntax = Syntax::builder().build();
    assert_eq!(syntax, Syntax::default());
    assert_eq!(Engine::new().syntax(), &Syntax::default());
}

#[test]
fn syntax_custom_tokens() {
    let syntax = Syntax::builder()
        .variable("%")
        .block("{", "}")
        .alternation("||")
        .guard("@")
        .build();
    let mut engine = Engine::with_syntax(syntax);
    engine.assign_variable("name", "Stan");
    engine.enable_alias("vip");

    let result = engine
        .execute("Hello %{@vip@ dear %name}, %{%nick || stranger}!", true, false)
        .unwrap();
    assert_eq!(result, "Hello dear Stan, stranger!");

    engine.disable_alias("vip");
    let result = engine
        .execute("Hello %{@vip@ dear %name}!", true, false)
        .unwrap();
    assert_eq!(result, "Hello!");
}

#[test]
fn syntax_default_tokens_are_literal_with_custom_syntax() {
    let syntax = Syntax::builder().variable("%").block("{", "}").build();
    let mut engine = Engine::with_syntax(syntax);
    engine.assign_variable("name", "Stan");
    let result = engine.execute("$name $[x] %name", true, true).unwrap();
    assert_eq!(result, "$name $[x] Stan");
}

#[test]
fn syntax_multichar_tokens() {
    let syntax = Syntax::builder()
        .variable("%%")
        .block("((", "))")
        .alternation("|")
        .guard("::")
        .build();
    let mut engine = Engine::with_syntax(syntax);
    engine.assign_variable("x", "1");
    engine.enable_alias("on");
    let result = engine
        .execute("a %%((::on:: %%x)) %%((%%y | b))", true, true)
        .unwrap();
    assert_eq!(result, "a 1 b");
}

#[test]
fn syntax_custom_errors() {
    let syntax = Syntax::builder().block("{", "}").alternation("||").build();
    let engine = Engine::with_syntax(syntax);

    let err = engine.render("lorem ${ipsum", true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnterminatedBlock);
    assert_eq!(err.span(), 6..8);

    let err = engine.render("lorem || ipsum", true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlternationOutsideBlock);
    assert_eq!(err.span(), 6..8);
}

#[test]
#[should_panic]
fn syntax_empty_variable() {
    Syntax::builder().variable("");
}

#[test]
#[should_panic]
fn syntax_empty_block() {
    Syntax::builder().block("[", "");
}

#[test]
#[should_panic]
fn syntax_empty_alternation() {
    Syntax::builder().alternation("");
}

#[test]
#[should_panic]
fn syntax_empty_guard() {
    Syntax::builder().guard("");
}
