//! Mapping command lines to commands.

use std::{collections::BTreeMap, rc::Rc};

use crate::{
    commands::{self, Assign, Command},
    error::ShellError,
};

/// Split a line into tokens. There is no quoting or escaping.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// The outcome of resolving a token list.
pub enum Dispatch {
    /// A command and the arguments that follow it
    Found {
        command: Rc<dyn Command>,
        args: Vec<String>,
    },
    /// No command matched; the tokens are handed back untouched
    Unresolved(Vec<String>),
}

/// Every command the shell knows, reachable by name and by alias.
///
/// # Examples
///
/// ```
/// use httpsh::dispatch::{tokenize, Dispatch, Registry};
///
/// let registry = Registry::builtin();
/// match registry.resolve(&tokenize("get /dogs")).unwrap() {
///     Dispatch::Found { command, args } => {
///         assert_eq!(command.name(), "get");
///         assert_eq!(args, vec!["/dogs"]);
///     }
///     Dispatch::Unresolved(_) => panic!("get is a builtin"),
/// }
/// ```
#[derive(Default)]
pub struct Registry {
    by_name: BTreeMap<String, Rc<dyn Command>>,
    by_alias: BTreeMap<String, Rc<dyn Command>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding all builtin commands.
    pub fn builtin() -> Self {
        let mut registry = Registry::new();
        for command in commands::builtins() {
            registry.register_rc(command);
        }
        registry
    }

    /// Register under the primary name and every alias; later registrations win.
    pub fn register(&mut self, command: impl Command + 'static) {
        self.register_rc(Rc::new(command));
    }

    fn register_rc(&mut self, command: Rc<dyn Command>) {
        let name = command.name().to_string();
        for alias in command.aliases() {
            self.by_alias.insert(alias.to_string(), Rc::clone(&command));
        }
        self.by_alias.insert(name.clone(), Rc::clone(&command));
        self.by_name.insert(name, command);
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn Command>> {
        self.by_alias.get(name).cloned()
    }

    /// Commands by primary name, sorted.
    pub fn commands(&self) -> impl Iterator<Item = &Rc<dyn Command>> {
        self.by_name.values()
    }

    /// Find the command a token list refers to.
    ///
    /// `NAME = COMMAND ARGS...` resolves to an [`Assign`] wrapping the
    /// command on the right.
    pub fn resolve(&self, tokens: &[String]) -> Result<Dispatch, ShellError> {
        if tokens.len() >= 2 && tokens[1] == "=" {
            let target = &tokens[0];
            let rvalue = &tokens[2..];
            return match self.resolve(rvalue)? {
                Dispatch::Found { command, args } => {
                    tracing::debug!(variable = %target, command = command.name(), "resolved assignment");
                    Ok(Dispatch::Found {
                        command: Rc::new(Assign::new(target, command)),
                        args,
                    })
                }
                Dispatch::Unresolved(_) => Err(ShellError::Usage(format!(
                    "could not find command: {}",
                    rvalue.join(" ")
                ))),
            };
        }

        match tokens.first().and_then(|name| self.get(name)) {
            Some(command) => {
                tracing::debug!(command = command.name(), "resolved command");
                Ok(Dispatch::Found {
                    command,
                    args: tokens[1..].to_vec(),
                })
            }
            None => Ok(Dispatch::Unresolved(tokens.to_vec())),
        }
    }
}
