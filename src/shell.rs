//! The read/evaluate/print loop.

use std::path::Path;

use crate::{
    commands::{Command, Context, RunCommand},
    dispatch::{tokenize, Dispatch, Registry},
    environment::Environment,
    error::ShellError,
    input::{FileLines, LineSource},
    render::Renderer,
    transport::Transport,
    value::Value,
};

/// What one pass of [`read_eval_print`] did.
#[derive(Debug, PartialEq)]
pub enum Step {
    /// A command ran and its result was displayed
    Evaluated,
    /// The line named no command; its tokens are returned
    Unresolved(Vec<String>),
    /// The line source is exhausted
    Finished,
}

/// The prompt for the current state of the environment.
pub fn prompt(env: &Environment) -> String {
    match env.host_alias() {
        Some(alias) => format!("[{}] -> ", alias),
        None => "-> ".to_string(),
    }
}

/// Read lines until one holds a command, then evaluate and display it.
///
/// Blank lines and `#` comments are skipped. Errors are returned to the
/// caller; the session loop reports them, a script lets them end the script.
pub fn read_eval_print(ctx: &mut Context<'_>) -> Result<Step, ShellError> {
    let line = loop {
        let prompt = prompt(ctx.env);
        match ctx.input.next_line(&prompt)? {
            None => return Ok(Step::Finished),
            Some(line) => {
                let line = line.trim();
                if !line.is_empty() && !line.starts_with('#') {
                    break line.to_string();
                }
            }
        }
    };

    match ctx.registry.resolve(&tokenize(&line))? {
        Dispatch::Found { command, args } => {
            if !ctx.input.interactive() {
                ctx.renderer.echo(command.name(), &args);
            }
            let result = command.evaluate(ctx, &args)?;
            if !result.is_null() {
                ctx.renderer.display(&result);
            }
            Ok(Step::Evaluated)
        }
        Dispatch::Unresolved(tokens) => Ok(Step::Unresolved(tokens)),
    }
}

/// A lone unknown word shows the variable of that name.
fn show_unresolved(env: &Environment, tokens: &[String]) -> Result<Value, ShellError> {
    match tokens {
        [] => Ok(Value::Null),
        [name] => env.lookup(name, None).cloned(),
        _ => Err(ShellError::NotFound(format!(
            "unknown command or variable: {}",
            tokens.join(" ")
        ))),
    }
}

/// One shell session: its environment, commands and transport.
pub struct Shell {
    env: Environment,
    registry: Registry,
    transport: Box<dyn Transport>,
}

impl Shell {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Shell {
            env: Environment::new(),
            registry: Registry::builtin(),
            transport,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    fn context<'a>(
        &'a mut self,
        input: &'a mut dyn LineSource,
        renderer: &'a mut dyn Renderer,
    ) -> Context<'a> {
        Context {
            env: &mut self.env,
            registry: &self.registry,
            transport: self.transport.as_ref(),
            input,
            renderer,
        }
    }

    /// Evaluate a single line and return its value without displaying it.
    ///
    /// `input` supplies payloads and answers to prompts.
    pub fn execute(
        &mut self,
        line: &str,
        input: &mut dyn LineSource,
        renderer: &mut dyn Renderer,
    ) -> Result<Value, ShellError> {
        let tokens = tokenize(line);
        match self.registry.resolve(&tokens)? {
            Dispatch::Found { command, args } => {
                let mut ctx = self.context(input, renderer);
                command.evaluate(&mut ctx, &args)
            }
            Dispatch::Unresolved(tokens) => show_unresolved(&self.env, &tokens),
        }
    }

    /// Run a script file the way `run` does.
    pub fn run_script(
        &mut self,
        path: &Path,
        renderer: &mut dyn Renderer,
    ) -> Result<Value, ShellError> {
        let mut no_input = FileLines::new(std::io::empty());
        let mut ctx = self.context(&mut no_input, renderer);
        RunCommand.evaluate(&mut ctx, &[path.display().to_string()])
    }

    /// Read and evaluate lines until the input ends.
    ///
    /// Every failure is reported through the renderer and the loop carries on.
    pub fn run(&mut self, input: &mut dyn LineSource, renderer: &mut dyn Renderer) {
        loop {
            let mut ctx = self.context(input, renderer);
            let step = read_eval_print(&mut ctx);
            let outcome = match step {
                Ok(Step::Finished) => break,
                Ok(Step::Evaluated) => Ok(Value::Null),
                Ok(Step::Unresolved(tokens)) => show_unresolved(&self.env, &tokens),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(value) => {
                    if !value.is_null() {
                        renderer.display(&value);
                    }
                }
                Err(ShellError::Interrupted) => {
                    renderer.display(&Value::text("Press Ctrl-D to quit."));
                }
                Err(e) => renderer.report(&e),
            }
        }
    }
}
