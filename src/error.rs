use std::{io, path::PathBuf};

use thiserror::Error;

use crate::value::ValueType;

/// Errors that can occur while evaluating a shell command.
///
/// Every failure is caught by the session loop and reported; none of them
/// terminates the process.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Unknown variable, header or command reference
    #[error("{0}")]
    NotFound(String),

    /// A variable exists but holds a different type than the one required
    #[error("variable: {name} has type: {actual} not {expected}")]
    TypeMismatch {
        name: String,
        actual: String,
        expected: ValueType,
    },

    /// The right-hand side of `NAME = ...` cannot produce a bindable value
    #[error("the '{command}' command is not assignable. (aliases: {aliases})")]
    NotAssignable { command: String, aliases: String },

    /// A select statement matched nothing at some depth
    #[error("could not traverse any deeper into JSON (part={segment}, parts={remaining:?})")]
    TraversalExhausted {
        segment: String,
        remaining: Vec<String>,
    },

    /// Select attempted on a response whose content type is not JSON
    #[error("response is not JSON.")]
    NotJson,

    /// Malformed command arguments
    #[error("{0}")]
    Usage(String),

    /// The transport could not reach the host
    #[error("connection failed: {0}")]
    ConnectionFailure(String),

    /// The response claims to be JSON but its body does not parse
    #[error("could not decode response as JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// A payload line that is not valid JSON
    #[error("invalid payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("could not open script {}: {source}", .path.display())]
    Script { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line editor failure: {0}")]
    LineEditor(String),

    /// Ctrl-C while waiting for a line
    #[error("interrupted")]
    Interrupted,
}

impl ShellError {
    /// Whether this failure belongs to the ordinary error taxonomy.
    ///
    /// Anything else is reported with its full debug representation.
    pub fn is_expected(&self) -> bool {
        use ShellError::*;
        matches!(
            self,
            NotFound(_)
                | TypeMismatch { .. }
                | NotAssignable { .. }
                | TraversalExhausted { .. }
                | NotJson
                | Usage(_)
                | ConnectionFailure(_)
                | Interrupted
        )
    }
}
