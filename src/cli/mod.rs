//! Terminal front end for httpsh
//!
//! Line editing with persistent history, plus the errors that can stop the
//! binary before a session starts.

mod console;

pub use console::ConsoleLines;

use std::io;

use thiserror::Error;

use crate::ShellError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Shell evaluation error
    #[error("{0}")]
    Shell(#[from] ShellError),
    /// Line editor could not be created
    #[error("could not start the line editor: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
