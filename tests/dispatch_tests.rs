use httpsh::{
    commands::{Category, Command, Context},
    dispatch::{tokenize, Dispatch, Registry},
    ShellError, Value,
};

fn resolved(registry: &Registry, line: &str) -> (String, Vec<String>) {
    match registry.resolve(&tokenize(line)).unwrap() {
        Dispatch::Found { command, args } => (command.name().to_string(), args),
        Dispatch::Unresolved(tokens) => panic!("'{}' did not resolve: {:?}", line, tokens),
    }
}

struct Ping;

impl Command for Ping {
    fn name(&self) -> &str {
        "ping"
    }

    fn aliases(&self) -> &[&str] {
        &["g"]
    }

    fn help(&self) -> &str {
        "answers pong."
    }

    fn evaluate(&self, _ctx: &mut Context<'_>, _args: &[String]) -> Result<Value, ShellError> {
        Ok(Value::text("pong"))
    }
}

// ============================================================================
// Tokenizing
// ============================================================================

#[test]
fn test_tokenize_collapses_whitespace() {
    assert_eq!(tokenize("  get   /dogs \t| name "), vec!["get", "/dogs", "|", "name"]);
}

#[test]
fn test_tokenize_empty_line() {
    assert!(tokenize("   ").is_empty());
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolve_by_name() {
    let registry = Registry::builtin();
    let (name, args) = resolved(&registry, "get /dogs");
    assert_eq!(name, "get");
    assert_eq!(args, vec!["/dogs"]);
}

#[test]
fn test_resolve_by_alias() {
    let registry = Registry::builtin();
    assert_eq!(resolved(&registry, "g /dogs").0, "get");
    assert_eq!(resolved(&registry, "GET /dogs").0, "get");
    assert_eq!(resolved(&registry, "@ get /dogs").0, "request");
    assert_eq!(resolved(&registry, "! req").0, "send");
    assert_eq!(resolved(&registry, "? select").0, "help");
    assert_eq!(resolved(&registry, ". script").0, "run");
    assert_eq!(resolved(&registry, "ls").0, "vars");
}

#[test]
fn test_resolve_unknown_returns_tokens() {
    let registry = Registry::builtin();
    match registry.resolve(&tokenize("frobnicate the widget")).unwrap() {
        Dispatch::Unresolved(tokens) => assert_eq!(tokens, vec!["frobnicate", "the", "widget"]),
        Dispatch::Found { .. } => panic!("frobnicate is not a command"),
    }
}

#[test]
fn test_resolve_empty_is_unresolved() {
    let registry = Registry::builtin();
    assert!(matches!(registry.resolve(&[]).unwrap(), Dispatch::Unresolved(t) if t.is_empty()));
}

#[test]
fn test_every_name_and_alias_resolves_to_its_command() {
    let registry = Registry::builtin();
    for command in registry.commands() {
        let found = registry.get(command.name()).expect("name is registered");
        assert_eq!(found.name(), command.name());
    }
    assert!(registry.get("nope").is_none());
}

#[test]
fn test_del_alias_goes_to_remove() {
    let registry = Registry::builtin();
    assert_eq!(resolved(&registry, "del accept").0, "remove");
    assert_eq!(resolved(&registry, "delete /dogs/1").0, "delete");
}

#[test]
fn test_later_registration_wins() {
    let mut registry = Registry::builtin();
    registry.register(Ping);
    assert_eq!(resolved(&registry, "g").0, "ping");
    assert_eq!(resolved(&registry, "get /dogs").0, "get");
}

#[test]
fn test_builtin_categories() {
    let registry = Registry::builtin();
    let category = |name: &str| registry.get(name).unwrap().category();
    assert_eq!(category("get"), Category::Http);
    assert_eq!(category("select"), Category::Json);
    assert_eq!(category("env"), Category::Environment);
    assert_eq!(category("host"), Category::Hosts);
    assert_eq!(category("send"), Category::Requests);
    assert_eq!(category("help"), Category::Misc);
}

// ============================================================================
// Assignment
// ============================================================================

#[test]
fn test_assignment_resolves_right_hand_command() {
    let registry = Registry::builtin();
    let (name, args) = resolved(&registry, "dogs = get /dogs");
    assert_eq!(name, "get");
    assert_eq!(args, vec!["/dogs"]);
}

#[test]
fn test_assignment_via_alias() {
    let registry = Registry::builtin();
    let (name, args) = resolved(&registry, "r = @ post /dogs");
    assert_eq!(name, "request");
    assert_eq!(args, vec!["post", "/dogs"]);
}

#[test]
fn test_assignment_unknown_command() {
    let registry = Registry::builtin();
    let err = registry.resolve(&tokenize("x = fetch /dogs")).err().unwrap();
    assert!(matches!(err, ShellError::Usage(_)));
    assert_eq!(err.to_string(), "could not find command: fetch /dogs");
}

#[test]
fn test_assignment_without_right_hand_side() {
    let registry = Registry::builtin();
    let err = registry.resolve(&tokenize("x =")).err().unwrap();
    assert!(matches!(err, ShellError::Usage(_)));
}

#[test]
fn test_equals_elsewhere_is_not_assignment() {
    let registry = Registry::builtin();
    let (name, args) = resolved(&registry, "header x = y");
    assert_eq!(name, "header");
    assert_eq!(args, vec!["x", "=", "y"]);
}
