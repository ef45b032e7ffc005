//! The shell's commands.
//!
//! Each command exposes a fixed capability surface: a name, aliases, a help
//! category, whether it may appear on the right of an assignment, and its
//! evaluation.

mod env;
mod hosts;
mod http;
mod json;
mod misc;

use std::{fmt, rc::Rc};

pub use env::{EnvCommand, RemoveCommand, TypeCommand, VarsCommand};
pub use hosts::{HeaderCommand, HeadersCommand, HostCommand, HostsCommand};
pub use http::{CurlCommand, HttpCommand, RequestCommand, SendCommand};
pub use json::SelectCommand;
pub use misc::{HelpCommand, RepeatCommand, RunCommand};

use crate::{
    dispatch::Registry,
    environment::Environment,
    error::ShellError,
    input::LineSource,
    render::Renderer,
    transport::Transport,
    value::Value,
};

/// Everything a command may touch while it runs.
pub struct Context<'a> {
    pub env: &'a mut Environment,
    pub registry: &'a Registry,
    pub transport: &'a dyn Transport,
    pub input: &'a mut dyn LineSource,
    pub renderer: &'a mut dyn Renderer,
}

impl<'a> Context<'a> {
    /// The same session reading from a different line source.
    pub fn with_input<'b>(&'b mut self, input: &'b mut dyn LineSource) -> Context<'b> {
        Context {
            env: &mut *self.env,
            registry: self.registry,
            transport: self.transport,
            input,
            renderer: &mut *self.renderer,
        }
    }
}

/// Help groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    Http,
    Json,
    Environment,
    Hosts,
    Misc,
    Requests,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Http => "HTTP",
            Category::Json => "JSON",
            Category::Environment => "environment",
            Category::Hosts => "hosts",
            Category::Misc => "misc",
            Category::Requests => "requests",
        };
        f.write_str(name)
    }
}

pub trait Command {
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    fn category(&self) -> Category {
        Category::Misc
    }

    /// Help text; the first line is the short description.
    fn help(&self) -> &str;

    /// Whether `NAME = <this command>` is allowed.
    fn assignable(&self) -> bool {
        false
    }

    /// Present when this command sends an HTTP request.
    fn as_http(&self) -> Option<&HttpCommand> {
        None
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError>;
}

/// Binds the result of another command to a variable.
pub struct Assign {
    target: String,
    inner: Rc<dyn Command>,
}

impl Assign {
    pub fn new(target: impl Into<String>, inner: Rc<dyn Command>) -> Self {
        Assign {
            target: target.into(),
            inner,
        }
    }
}

impl Command for Assign {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn help(&self) -> &str {
        self.inner.help()
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        if !self.inner.assignable() {
            return Err(ShellError::NotAssignable {
                command: self.inner.name().to_string(),
                aliases: self.inner.aliases().join(", "),
            });
        }
        let result = self.inner.evaluate(ctx, args)?;
        Ok(ctx.env.bind(&self.target, result))
    }
}

/// The select statement following a `|` in second position, if any.
///
/// `get /dogs | content.name` pipes the response through `select`.
pub fn pipe_target(args: &[String]) -> Option<&str> {
    match args {
        [_, bar, statement, ..] if bar == "|" => Some(statement.as_str()),
        _ => None,
    }
}

/// Builtins in registration order.
pub(crate) fn builtins() -> Vec<Rc<dyn Command>> {
    vec![
        Rc::new(HelpCommand),
        Rc::new(RunCommand),
        Rc::new(RepeatCommand),
        Rc::new(SelectCommand),
        Rc::new(RequestCommand),
        Rc::new(SendCommand),
        Rc::new(CurlCommand),
        Rc::new(HttpCommand::head()),
        Rc::new(HttpCommand::options()),
        Rc::new(HttpCommand::get()),
        Rc::new(HttpCommand::put()),
        Rc::new(HttpCommand::post()),
        Rc::new(HttpCommand::get_with_payload()),
        Rc::new(HttpCommand::patch()),
        Rc::new(HttpCommand::delete()),
        Rc::new(HeadersCommand),
        Rc::new(HostsCommand),
        Rc::new(HeaderCommand),
        Rc::new(TypeCommand),
        Rc::new(EnvCommand),
        Rc::new(RemoveCommand),
        Rc::new(VarsCommand::all()),
        Rc::new(VarsCommand::requests()),
        Rc::new(HostCommand),
    ]
}
