use httpsh::{
    select::{select, Glob, Segment},
    ShellError,
};
use serde_json::{json, Value};

fn dog() -> Value {
    json!({
        "dog": {
            "name": "Fluffy",
            "nicknames": ["Mr Fluffy", "Fluffster"],
            "breed": "Chihuahua"
        },
        "_links": []
    })
}

fn kennel() -> Value {
    json!({
        "dogs": [
            {"name": "Rex", "age": 3, "breed": "Pug"},
            {"name": "Fido", "age": 5, "breed": "Beagle"}
        ],
        "count": 2
    })
}

fn exhausted_at(result: Result<Value, ShellError>) -> (String, Vec<String>) {
    match result {
        Err(ShellError::TraversalExhausted { segment, remaining }) => (segment, remaining),
        other => panic!("expected TraversalExhausted, got {:?}", other),
    }
}

// ============================================================================
// Segment parsing
// ============================================================================

#[test]
fn test_segment_single_key() {
    let seg = Segment::parse("dog");
    assert_eq!(seg.patterns(), vec!["dog"]);
    assert!(seg.collect().is_empty());
}

#[test]
fn test_segment_key_list_and_collect() {
    let seg = Segment::parse("name,breed(age,id)");
    assert_eq!(seg.patterns(), vec!["name", "breed"]);
    assert_eq!(seg.collect(), vec!["age", "id"]);
}

#[test]
fn test_segment_drops_empty_entries() {
    let seg = Segment::parse("name,,breed(,age)");
    assert_eq!(seg.patterns(), vec!["name", "breed"]);
    assert_eq!(seg.collect(), vec!["age"]);
}

#[test]
fn test_segment_collect_only() {
    let seg = Segment::parse("(count)");
    assert!(seg.patterns().is_empty());
    assert_eq!(seg.collect(), vec!["count"]);
}

#[test]
fn test_segment_unclosed_paren_keeps_prefix() {
    let seg = Segment::parse("dog(name");
    assert_eq!(seg.patterns(), vec!["dog"]);
    assert!(seg.collect().is_empty());
}

// ============================================================================
// Glob matching
// ============================================================================

#[test]
fn test_glob_literal_is_anchored() {
    let glob = Glob::new("name");
    assert!(glob.matches("name"));
    assert!(!glob.matches("nickname"));
    assert!(!glob.matches("names"));
}

#[test]
fn test_glob_star_matches_any_run() {
    let glob = Glob::new("*name*");
    assert!(glob.matches("name"));
    assert!(glob.matches("nicknames"));
    assert!(!glob.matches("breed"));
}

#[test]
fn test_glob_treats_regex_characters_literally() {
    let glob = Glob::new("a+b");
    assert!(glob.matches("a+b"));
    assert!(!glob.matches("aab"));

    let dotted = Glob::new("v1.0");
    assert!(dotted.matches("v1.0"));
    assert!(!dotted.matches("v1x0"));
}

// ============================================================================
// Object traversal
// ============================================================================

#[test]
fn test_select_top_level_key() {
    let result = select(&dog(), "dog").unwrap();
    assert_eq!(result, json!({"dog": dog()["dog"]}));
}

#[test]
fn test_select_nested_key_keeps_outer_wrapper() {
    let result = select(&dog(), "dog.name").unwrap();
    assert_eq!(result, json!({"dog": {"name": "Fluffy"}}));
}

#[test]
fn test_select_wildcard_returns_all_children() {
    let result = select(&dog(), "dog.*").unwrap();
    assert_eq!(result, json!({"dog": dog()["dog"]}));
}

#[test]
fn test_select_glob_suffix() {
    let result = select(&dog(), "dog.*name*").unwrap();
    assert_eq!(
        result,
        json!({"dog": {"name": "Fluffy", "nicknames": ["Mr Fluffy", "Fluffster"]}})
    );
}

#[test]
fn test_select_key_list() {
    let result = select(&dog(), "dog.name,breed").unwrap();
    assert_eq!(result, json!({"dog": {"name": "Fluffy", "breed": "Chihuahua"}}));
}

#[test]
fn test_select_overlapping_patterns_do_not_duplicate() {
    let result = select(&dog(), "dog.name,na*").unwrap();
    assert_eq!(result, json!({"dog": {"name": "Fluffy"}}));
}

#[test]
fn test_select_collects_sibling() {
    let result = select(&dog(), "dog(breed).name").unwrap();
    assert_eq!(result, json!({"dog": {"breed": "Chihuahua", "name": "Fluffy"}}));
}

#[test]
fn test_select_collect_with_glob() {
    let result = select(&dog(), "dog(*name).breed").unwrap();
    assert_eq!(result, json!({"dog": {"name": "Fluffy", "breed": "Chihuahua"}}));
}

#[test]
fn test_select_leading_collect_segment() {
    let doc = json!({"a": {"name": "Fluffy", "breed": "X"}, "b": 1});
    let result = select(&doc, "(b).a.name").unwrap();
    assert_eq!(result, json!({"a": {"name": "Fluffy", "b": 1}}));
}

#[test]
fn test_select_collected_value_wins_on_collision() {
    let doc = json!({"a": {"x": 1, "inner": {"x": 2}}});
    let result = select(&doc, "a(x).inner.x").unwrap();
    assert_eq!(result, json!({"a": {"inner": {"x": 1}}}));
}

#[test]
fn test_select_collected_values_stay_on_their_branch() {
    let doc = json!({
        "x": {"c": 1, "k": {"v": 1}},
        "y": {"k": {"v": 2}}
    });
    let result = select(&doc, "*(c).k.v").unwrap();
    assert_eq!(
        result,
        json!({
            "x": {"k": {"c": 1, "v": 1}},
            "y": {"k": {"v": 2}}
        })
    );
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn test_select_through_array() {
    let result = select(&kennel(), "dogs.name").unwrap();
    assert_eq!(result, json!({"dogs": [{"name": "Rex"}, {"name": "Fido"}]}));
}

#[test]
fn test_select_through_array_with_key_list() {
    let result = select(&kennel(), "dogs.name,age").unwrap();
    assert_eq!(
        result,
        json!({"dogs": [{"name": "Rex", "age": 3}, {"name": "Fido", "age": 5}]})
    );
}

#[test]
fn test_select_array_elements_keep_collect_clause() {
    let doc = json!({
        "dogs": [
            {"name": "Rex", "owner": {"id": 1, "city": "Oslo"}},
            {"name": "Fido", "owner": {"id": 2, "city": "Bergen"}}
        ]
    });
    let result = select(&doc, "dogs.owner(id).city").unwrap();
    assert_eq!(
        result,
        json!({
            "dogs": [
                {"owner": {"city": "Oslo", "id": 1}},
                {"owner": {"city": "Bergen", "id": 2}}
            ]
        })
    );
}

#[test]
fn test_select_glob_segments_reused_for_every_element() {
    let rows: Vec<Value> = (0..200)
        .map(|i| json!({"id": i, "name": {"v": i, "w": -i}, "other": i}))
        .collect();
    let result = select(&json!({ "rows": rows }), "ro*(id*).na*.v").unwrap();

    let selected = result["rows"].as_array().unwrap();
    assert_eq!(selected.len(), 200);
    for (i, row) in selected.iter().enumerate() {
        assert_eq!(row, &json!({"name": {"v": i, "id": i}}));
    }
}

#[test]
fn test_select_root_array() {
    let doc = json!([{"id": 1, "x": true}, {"id": 2, "x": false}]);
    let result = select(&doc, "id").unwrap();
    assert_eq!(result, json!([{"id": 1}, {"id": 2}]));
}

#[test]
fn test_select_empty_array_stays_empty() {
    let result = select(&dog(), "_links.href").unwrap();
    assert_eq!(result, json!({"_links": []}));
}

#[test]
fn test_select_array_element_missing_key_fails() {
    let doc = json!({"dogs": [{"name": "Rex"}, {"age": 5}]});
    let (segment, remaining) = exhausted_at(select(&doc, "dogs.name"));
    assert_eq!(segment, "name");
    assert!(remaining.is_empty());
}

// ============================================================================
// Scalars and failures
// ============================================================================

#[test]
fn test_select_scalar_with_wildcard() {
    let result = select(&kennel(), "count.*").unwrap();
    assert_eq!(result, json!({"count": 2}));
}

#[test]
fn test_select_scalar_with_name_fails() {
    let (segment, remaining) = exhausted_at(select(&kennel(), "count.value"));
    assert_eq!(segment, "value");
    assert!(remaining.is_empty());
}

#[test]
fn test_select_scalar_wildcard_not_last_fails() {
    let (segment, remaining) = exhausted_at(select(&kennel(), "count.*.x"));
    assert_eq!(segment, "*");
    assert_eq!(remaining, vec!["x"]);
}

#[test]
fn test_select_missing_leaf() {
    let (segment, remaining) = exhausted_at(select(&dog(), "dog.missing"));
    assert_eq!(segment, "missing");
    assert!(remaining.is_empty());
}

#[test]
fn test_select_missing_root_reports_remaining_parts() {
    let (segment, remaining) = exhausted_at(select(&dog(), "cat.name.first"));
    assert_eq!(segment, "cat");
    assert_eq!(remaining, vec!["name", "first"]);
}

#[test]
fn test_select_missing_anywhere_fails_whole_statement() {
    let doc = json!({"a": {"name": "x"}, "b": {"other": 1}});
    assert!(select(&doc, "*.name").is_err());
}

#[test]
fn test_select_empty_statement_fails() {
    assert!(select(&dog(), "").is_err());
    assert!(select(&dog(), "(").is_err());
}

#[test]
fn test_traversal_error_message() {
    let err = select(&dog(), "dog.missing").unwrap_err();
    assert_eq!(
        err.to_string(),
        "could not traverse any deeper into JSON (part=missing, parts=[])"
    );
}
