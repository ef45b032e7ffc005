//! Session configuration: where history lives and what runs at start-up.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

pub const COMMAND_HISTORY_FILE: &str = ".httpsh_history";
pub const PAYLOAD_HISTORY_FILE: &str = ".httpsh_payload_history";
pub const STARTUP_SCRIPT: &str = ".httpshrc";

#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    pub command_history: Option<PathBuf>,
    pub payload_history: Option<PathBuf>,
    /// Run before the first prompt when it exists
    pub startup_script: Option<PathBuf>,
    pub color: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let home = home_dir();
        ShellConfig {
            command_history: home.as_ref().map(|h| h.join(COMMAND_HISTORY_FILE)),
            payload_history: home.as_ref().map(|h| h.join(PAYLOAD_HISTORY_FILE)),
            startup_script: home.as_ref().map(|h| h.join(STARTUP_SCRIPT)),
            color: true,
        }
    }
}

impl ShellConfig {
    pub fn without_startup_script(mut self) -> Self {
        self.startup_script = None;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// The start-up script, if one is configured and present on disk.
    pub fn existing_startup_script(&self) -> Option<&Path> {
        self.startup_script.as_deref().filter(|p| p.is_file())
    }
}

fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|b| b.home_dir().to_path_buf())
}

/// Replace a leading `~` with the home directory.
///
/// # Examples
///
/// ```
/// use httpsh::config::expand_home;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_home("scripts/setup"), PathBuf::from("scripts/setup"));
/// ```
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };
    match (rest, home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
