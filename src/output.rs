//! JSON output for the terminal.
//!
//! Documents are printed with sorted keys and three-space indentation.
//! When colour is enabled, keys, strings, numbers and literals are
//! highlighted; colour is also subject to `colored`'s global override, so
//! `--no-color` turns it off everywhere at once.
//!
//! # Examples
//!
//! ```
//! use httpsh::output::format_json;
//! use serde_json::json;
//!
//! let doc = json!({"b": 1, "a": [true, null]});
//! assert_eq!(
//!     format_json(&doc),
//!     "{\n   \"a\": [\n      true,\n      null\n   ],\n   \"b\": 1\n}"
//! );
//! ```

use colored::Colorize;
use serde_json::{Map, Value as JsonValue};

const INDENT: usize = 3;

pub struct JsonPrinter {
    color: bool,
}

impl JsonPrinter {
    pub fn new(color: bool) -> Self {
        JsonPrinter { color }
    }

    pub fn print(&self, value: &JsonValue) -> String {
        self.print_value(value, 0)
    }

    fn print_value(&self, value: &JsonValue, indent: usize) -> String {
        match value {
            JsonValue::Null => self.literal("null"),
            JsonValue::Bool(b) => self.literal(&b.to_string()),
            JsonValue::Number(n) => {
                let text = n.to_string();
                if self.color { text.cyan().to_string() } else { text }
            }
            JsonValue::String(s) => {
                let text = format!("\"{}\"", escape_string(s));
                if self.color { text.green().to_string() } else { text }
            }
            JsonValue::Array(arr) => self.print_array(arr, indent),
            JsonValue::Object(obj) => self.print_object(obj, indent),
        }
    }

    fn literal(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn print_array(&self, arr: &[JsonValue], indent: usize) -> String {
        if arr.is_empty() {
            return "[]".to_string();
        }

        let items: Vec<String> = arr
            .iter()
            .map(|v| format!("{}{}", pad(indent + 1), self.print_value(v, indent + 1)))
            .collect();
        format!("[\n{}\n{}]", items.join(",\n"), pad(indent))
    }

    fn print_object(&self, obj: &Map<String, JsonValue>, indent: usize) -> String {
        if obj.is_empty() {
            return "{}".to_string();
        }

        let mut keys: Vec<_> = obj.keys().collect();
        keys.sort();

        let items: Vec<String> = keys
            .iter()
            .map(|k| {
                let key = format!("\"{}\"", escape_string(k));
                let key = if self.color { key.blue().bold().to_string() } else { key };
                format!(
                    "{}{}: {}",
                    pad(indent + 1),
                    key,
                    self.print_value(&obj[k.as_str()], indent + 1)
                )
            })
            .collect();
        format!("{{\n{}\n{}}}", items.join(",\n"), pad(indent))
    }
}

fn pad(level: usize) -> String {
    " ".repeat(level * INDENT)
}

fn escape_string(s: &str) -> String {
    s.chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            '\n' => vec!['\\', 'n'],
            '\r' => vec!['\\', 'r'],
            '\t' => vec!['\\', 't'],
            c if c.is_control() => format!("\\u{:04x}", c as u32).chars().collect(),
            c => vec![c],
        })
        .collect()
}

/// Pretty JSON without colour.
pub fn format_json(value: &JsonValue) -> String {
    JsonPrinter::new(false).print(value)
}
