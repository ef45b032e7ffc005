//! Command results stay free of terminal escapes even with colour forced on.

mod common;

use common::{json_response, run, StubTransport, HOST_URL};
use httpsh::{output::format_json, Renderer, Shell, TerminalRenderer, Value, ValueType};
use serde_json::json;

const ESC: char = '\x1b';

fn coloured_shell(stub: &StubTransport) -> Shell {
    colored::control::set_override(true);
    let mut shell = Shell::new(Box::new(stub.clone()));
    run(&mut shell, &format!("host api {}", HOST_URL)).unwrap();
    run(&mut shell, "header accept application/json").unwrap();
    shell
}

fn plain(value: &Value) -> String {
    match value {
        Value::Text { text, .. } => text.clone(),
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn test_bound_select_is_plain_json() {
    let stub = StubTransport::new();
    stub.always(json_response(200, &json!({"dog": {"name": "Fluffy", "age": 3}})));
    let mut shell = coloured_shell(&stub);

    run(&mut shell, "x = get /dogs | dog").unwrap();
    let bound = shell.env().lookup("x", Some(ValueType::Text)).unwrap().clone();

    assert_eq!(plain(&bound), format_json(&json!({"name": "Fluffy", "age": 3})));
    assert!(!bound.summary().contains(ESC));

    let vars = plain(&run(&mut shell, "vars").unwrap());
    assert!(vars.contains("x = text { {"), "{}", vars);
    assert!(!vars.contains(ESC));
}

#[test]
fn test_listings_are_plain_text() {
    let stub = StubTransport::new();
    let mut shell = coloured_shell(&stub);

    for line in ["env", "hosts", "headers", "help", "vars"] {
        let text = plain(&run(&mut shell, line).unwrap());
        assert!(!text.contains(ESC), "{} produced {:?}", line, text);
    }
}

#[test]
fn test_renderer_colours_selected_json() {
    colored::control::set_override(true);
    let doc = json!({"name": "Fluffy"});
    let mut renderer = TerminalRenderer::new(Vec::new());
    renderer.display(&Value::json(&doc));
    let out = String::from_utf8(renderer.into_inner()).unwrap();

    assert!(out.contains(ESC));
    assert!(out.contains("Fluffy"));
}
