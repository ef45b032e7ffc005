//! Where command lines come from.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde_json::Value as JsonValue;

use crate::error::ShellError;

/// A source of command and payload lines.
///
/// `Ok(None)` signals end of input.
pub trait LineSource {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;

    /// Read a JSON payload. An empty line means "no payload".
    fn next_payload(&mut self, prompt: &str) -> Result<Option<JsonValue>, ShellError> {
        match self.next_line(prompt)? {
            Some(line) if !line.trim().is_empty() => serde_json::from_str(line.trim())
                .map(Some)
                .map_err(ShellError::InvalidPayload),
            _ => Ok(None),
        }
    }

    /// Read a one-off answer to a question. Answers are not commands and
    /// stay out of any command history.
    fn next_answer(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        self.next_line(prompt)
    }

    /// Whether a person is typing. Scripts echo their commands and never prompt.
    fn interactive(&self) -> bool {
        false
    }
}

/// Sequential lines from a script.
pub struct FileLines<R> {
    reader: R,
}

impl<R: BufRead> FileLines<R> {
    pub fn new(reader: R) -> Self {
        FileLines { reader }
    }
}

impl FileLines<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ShellError> {
        let file = File::open(path).map_err(|source| ShellError::Script {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(FileLines::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource for FileLines<R> {
    fn next_line(&mut self, _prompt: &str) -> Result<Option<String>, ShellError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
