//! Selecting subtrees of JSON documents.
//!
//! A select statement is a chain of segments separated by periods. Each
//! segment names the keys to descend into at one level of the document:
//!
//! ```text
//! statement := segment ('.' segment)*
//! segment   := patterns ['(' collect ')']
//! patterns  := pattern (',' pattern)*
//! ```
//!
//! A pattern is a key name in which `*` matches any run of characters. The
//! optional collect clause names sibling keys, one level below the segment,
//! that are copied into the final result next to whatever the rest of the
//! statement selects.
//!
//! Given the document
//!
//! ```text
//! { "dog": { "name": "Fluffy", "breed": "Chihuahua", "nicknames": ["Mr Fluffy"] } }
//! ```
//!
//! - `dog.name` → `{"dog": {"name": "Fluffy"}}`
//! - `dog.*name*` → the `name` and `nicknames` keys of `dog`
//! - `dog(breed).name` → `{"dog": {"breed": "Chihuahua", "name": "Fluffy"}}`
//!
//! Every object level must match at least one key, otherwise the whole
//! selection fails with [`ShellError::TraversalExhausted`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value as JsonValue};

use crate::error::ShellError;

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^(]*)(\(([^)]*)\))?").expect("segment pattern is valid"));

/// One parsed segment of a select statement.
///
/// Patterns are compiled once here and reused at every node the segment
/// is applied to.
#[derive(Debug, Clone, Default)]
pub struct Segment {
    patterns: Vec<String>,
    collect: Vec<String>,
    keys: Vec<Glob>,
    siblings: Vec<Glob>,
}

impl Segment {
    /// Parse a segment such as `dog,cat(name,age)`.
    ///
    /// Malformed input never fails here; it just yields fewer patterns.
    ///
    /// # Examples
    ///
    /// ```
    /// use httpsh::select::Segment;
    ///
    /// let seg = Segment::parse("dog,cat(name)");
    /// assert_eq!(seg.patterns(), ["dog", "cat"]);
    /// assert_eq!(seg.collect(), ["name"]);
    /// ```
    pub fn parse(expression: &str) -> Self {
        let Some(caps) = SEGMENT_RE.captures(expression) else {
            return Segment::default();
        };
        let patterns = caps.get(1).map(|m| split_list(m.as_str())).unwrap_or_default();
        let collect = caps.get(3).map(|m| split_list(m.as_str())).unwrap_or_default();
        Segment {
            keys: compile(&patterns),
            siblings: compile(&collect),
            patterns,
            collect,
        }
    }

    /// Key patterns to descend into.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Sibling patterns collected one level down.
    pub fn collect(&self) -> &[String] {
        &self.collect
    }

}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|item| !item.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn compile(patterns: &[String]) -> Vec<Glob> {
    patterns.iter().map(|p| Glob::new(p)).collect()
}

/// A key pattern where `*` matches any substring, anchored at both ends.
#[derive(Debug, Clone, Default)]
pub struct Glob {
    regex: Option<Regex>,
}

impl Glob {
    pub fn new(pattern: &str) -> Self {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        Glob {
            regex: Regex::new(&format!("^{}$", body)).ok(),
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(key))
    }
}

/// Keys of `node` matching any of `globs`, in pattern order then the
/// object's own order, without repeats.
fn matching_any<'a>(node: &'a Map<String, JsonValue>, globs: &[Glob]) -> Vec<&'a String> {
    let mut keys = Vec::new();
    for glob in globs {
        for key in node.keys().filter(|key| glob.matches(key)) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

/// A segment together with the text it was parsed from.
struct Step<'s> {
    part: &'s str,
    segment: Segment,
}

/// Run a select statement against a document.
///
/// # Examples
///
/// ```
/// use httpsh::select::select;
/// use serde_json::json;
///
/// let doc = json!({"a": {"name": "Fluffy", "breed": "X"}, "b": 1});
///
/// assert_eq!(select(&doc, "a.name").unwrap(), json!({"a": {"name": "Fluffy"}}));
/// assert_eq!(
///     select(&doc, "a(breed).name").unwrap(),
///     json!({"a": {"breed": "X", "name": "Fluffy"}})
/// );
/// assert!(select(&doc, "a.missing").is_err());
/// ```
pub fn select(document: &JsonValue, statement: &str) -> Result<JsonValue, ShellError> {
    let steps: Vec<Step<'_>> = statement
        .split('.')
        .map(|part| Step {
            part,
            segment: Segment::parse(part),
        })
        .collect();
    let head = &steps[0].segment;

    // A leading `(keys)` segment collects root-level siblings.
    if head.patterns.is_empty() && !head.collect.is_empty() && steps.len() >= 2 {
        select_part(document, &steps[1..], &head.siblings, Map::new())
    } else {
        select_part(document, &steps, &[], Map::new())
    }
}

/// Evaluate the first of `steps` at `node`.
///
/// `collect_here` holds the previous segment's collect clause, realized at
/// this level. `collected` accumulates those siblings along the current
/// branch and is merged into the leaf result.
fn select_part(
    node: &JsonValue,
    steps: &[Step<'_>],
    collect_here: &[Glob],
    mut collected: Map<String, JsonValue>,
) -> Result<JsonValue, ShellError> {
    let Some((step, rest)) = steps.split_first() else {
        return Ok(node.clone());
    };
    match node {
        JsonValue::Object(obj) => {
            for key in matching_any(obj, collect_here) {
                collected.insert(key.clone(), obj[key].clone());
            }

            let keys = matching_any(obj, &step.segment.keys);
            if keys.is_empty() {
                return Err(exhausted(step, rest));
            }

            if rest.is_empty() {
                let mut result: Map<String, JsonValue> = keys
                    .into_iter()
                    .map(|key| (key.clone(), obj[key].clone()))
                    .collect();
                // Collected siblings win over selected keys.
                result.extend(collected);
                Ok(JsonValue::Object(result))
            } else {
                let mut result = Map::new();
                for key in keys {
                    let child =
                        select_part(&obj[key], rest, &step.segment.siblings, collected.clone())?;
                    result.insert(key.clone(), child);
                }
                Ok(JsonValue::Object(result))
            }
        }
        JsonValue::Array(items) => items
            .iter()
            .map(|item| select_part(item, steps, collect_here, collected.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array),
        scalar => {
            if rest.is_empty() && step.segment.patterns == ["*"] {
                Ok(scalar.clone())
            } else {
                Err(exhausted(step, rest))
            }
        }
    }
}

fn exhausted(step: &Step<'_>, rest: &[Step<'_>]) -> ShellError {
    ShellError::TraversalExhausted {
        segment: step.part.to_string(),
        remaining: rest.iter().map(|s| s.part.to_string()).collect(),
    }
}
