use std::{collections::BTreeMap, fmt, time::Duration};

use serde_json::Value as JsonValue;

use crate::{
    error::ShellError,
    output::format_json,
    transport::{HttpResponse, Method},
};

/// The result of evaluating a command.
///
/// Values are immutable once built. They live on only when bound to a
/// variable in the [`Environment`](crate::Environment).
///
/// # Examples
///
/// ```
/// use httpsh::{Value, ValueType};
///
/// let text = Value::text("  hello world  ");
/// assert_eq!(text.value_type(), Some(ValueType::Text));
/// assert_eq!(text.summary(), "hello world");
///
/// assert!(!Value::Null.is_truthy());
/// assert!(!Value::text("   ").is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Nothing to display
    Null,

    /// Informational text
    Text { text: String, style: TextStyle },

    /// A failure reported as a message rather than an error
    Error { message: String, severe: bool },

    /// A named target with its own headers
    Host(Host),

    /// The outcome of an HTTP request
    Response(Response),

    /// A stored request that can be replayed with `send`
    Request(Request),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Plain,
    Bold,
    /// Pretty-printed JSON, highlighted when displayed
    Json,
}

/// Type tags used for typed variable lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Host,
    Response,
    Request,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Text => "text",
            ValueType::Host => "host",
            ValueType::Response => "response",
            ValueType::Request => "request",
        };
        f.write_str(name)
    }
}

const SUMMARY_WIDTH: usize = 20;

impl Value {
    /// Plain text, trimmed of surrounding whitespace.
    pub fn text(text: impl AsRef<str>) -> Self {
        Value::Text {
            text: text.as_ref().trim().to_string(),
            style: TextStyle::Plain,
        }
    }

    pub fn bold(text: impl AsRef<str>) -> Self {
        Value::Text {
            text: text.as_ref().trim().to_string(),
            style: TextStyle::Bold,
        }
    }

    /// A JSON document as uncoloured, pretty-printed text.
    pub fn json(document: &JsonValue) -> Self {
        Value::Text {
            text: format_json(document),
            style: TextStyle::Json,
        }
    }

    /// A mild warning (yellow).
    pub fn warning(message: impl Into<String>) -> Self {
        Value::Error {
            message: message.into(),
            severe: false,
        }
    }

    /// A severe error (red).
    pub fn failure(message: impl Into<String>) -> Self {
        Value::Error {
            message: message.into(),
            severe: true,
        }
    }

    /// The type tag of this value; `Null` has none.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Text { .. } | Value::Error { .. } => Some(ValueType::Text),
            Value::Host(_) => Some(ValueType::Host),
            Value::Response(_) => Some(ValueType::Response),
            Value::Request(_) => Some(ValueType::Request),
        }
    }

    /// The type tag as shown to the user.
    pub fn type_name(&self) -> String {
        self.value_type()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "null".to_string())
    }

    /// Whether the value is worth binding; falsy values unbind instead.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Text { text, .. } => !text.is_empty(),
            Value::Error { message, .. } => !message.is_empty(),
            _ => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// A one-line description used by `env` and `vars`.
    pub fn summary(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Text { text, .. } => truncate(text),
            Value::Error { message, .. } => truncate(message),
            Value::Host(host) => host.summary(),
            Value::Response(resp) => resp.summary(),
            Value::Request(req) => req.summary(),
        }
    }

    pub fn as_host(&self) -> Option<&Host> {
        match self {
            Value::Host(host) => Some(host),
            _ => None,
        }
    }

    pub fn as_response(&self) -> Option<&Response> {
        match self {
            Value::Response(resp) => Some(resp),
            _ => None,
        }
    }

    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Value::Request(req) => Some(req),
            _ => None,
        }
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > SUMMARY_WIDTH {
        let head: String = text.chars().take(SUMMARY_WIDTH).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// A target host: an alias, a base URL and the headers sent with every request.
#[derive(Debug, Clone, PartialEq)]
pub struct Host {
    pub alias: String,
    pub hostname: String,
    pub headers: BTreeMap<String, String>,
}

impl Host {
    pub fn new(alias: impl Into<String>, hostname: impl Into<String>) -> Self {
        Host {
            alias: alias.into(),
            hostname: hostname.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn summary(&self) -> String {
        format!("hostname = {}", self.hostname)
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(name)
    }

    /// Join the base URL with a request path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.hostname, normalize_path(path))
    }
}

/// Give a path its leading slash.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// A received HTTP response together with the time it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub http: HttpResponse,
    pub elapsed: Duration,
}

impl Response {
    pub fn new(http: HttpResponse, elapsed: Duration) -> Self {
        Response { http, elapsed }
    }

    pub fn status(&self) -> u16 {
        self.http.status
    }

    pub fn summary(&self) -> String {
        format!(
            "status: {}, length: {}",
            self.http.status,
            self.http.body.len()
        )
    }

    /// JSON-ness is decided by the content-type header alone.
    pub fn is_json(&self) -> bool {
        self.http
            .header("content-type")
            .map(|ct| {
                let ct = ct.to_lowercase();
                ct.starts_with("application/json") || ct.starts_with("application/hal+json")
            })
            .unwrap_or(false)
    }

    /// The decoded body, or [`ShellError::NotJson`] if the content type says otherwise.
    pub fn json(&self) -> Result<JsonValue, ShellError> {
        if !self.is_json() {
            return Err(ShellError::NotJson);
        }
        self.http.json().map_err(ShellError::InvalidJson)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.http.body).into_owned()
    }
}

/// A request captured for later replay.
///
/// The host is a snapshot: header edits made on the live host after the
/// request was created do not reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub host: Host,
    pub method: Method,
    pub path: String,
    pub payload: Option<JsonValue>,
}

impl Request {
    pub fn new(host: &Host, method: Method, path: impl Into<String>) -> Self {
        Request {
            host: host.clone(),
            method,
            path: path.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Option<JsonValue>) -> Self {
        self.payload = payload;
        self
    }

    pub fn summary(&self) -> String {
        format!(
            "method: {}, host: {}, path: {}",
            self.method, self.host.hostname, self.path
        )
    }
}
