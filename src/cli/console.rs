//! Interactive line source backed by rustyline

use std::path::PathBuf;

use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};
use serde_json::Value as JsonValue;

use super::CliError;
use crate::{config::ShellConfig, input::LineSource, ShellError};

/// One editor per kind of line, so payloads and commands keep separate histories.
struct HistoryEditor {
    editor: Editor<(), DefaultHistory>,
    path: Option<PathBuf>,
}

impl HistoryEditor {
    fn new(path: Option<PathBuf>) -> Result<Self, CliError> {
        let mut editor: Editor<(), DefaultHistory> = Editor::new()?;
        if let Some(path) = &path {
            if let Err(e) = editor.load_history(path) {
                // A missing file is expected on first run
                let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
                if !is_not_found {
                    tracing::warn!("Failed to load history from {}: {}", path.display(), e);
                }
            }
        }
        Ok(HistoryEditor { editor, path })
    }

    fn read(&mut self, prompt: &str, remember: bool) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim().to_string();
                if remember && !line.is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Err(ShellError::Interrupted),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(ShellError::LineEditor(e.to_string())),
        }
    }

    fn save(&mut self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
            }
        }
        if let Err(e) = self.editor.save_history(path) {
            tracing::warn!("Failed to save history to {}: {}", path.display(), e);
        }
    }
}

/// Lines typed at the terminal.
pub struct ConsoleLines {
    commands: HistoryEditor,
    payloads: HistoryEditor,
}

impl ConsoleLines {
    pub fn new(config: &ShellConfig) -> Result<Self, CliError> {
        Ok(ConsoleLines {
            commands: HistoryEditor::new(config.command_history.clone())?,
            payloads: HistoryEditor::new(config.payload_history.clone())?,
        })
    }

    /// Persist both histories.
    pub fn save_history(&mut self) {
        self.commands.save();
        self.payloads.save();
    }
}

impl LineSource for ConsoleLines {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        self.commands.read(prompt, true)
    }

    fn next_answer(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        self.commands.read(prompt, false)
    }

    fn next_payload(&mut self, prompt: &str) -> Result<Option<JsonValue>, ShellError> {
        match self.payloads.read(prompt, true)? {
            Some(line) if !line.is_empty() => serde_json::from_str(&line)
                .map(Some)
                .map_err(ShellError::InvalidPayload),
            _ => Ok(None),
        }
    }

    fn interactive(&self) -> bool {
        true
    }
}
