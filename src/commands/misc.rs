use std::time::Instant;

use super::{Category, Command, Context};
use crate::{
    config::expand_home,
    dispatch::Dispatch,
    error::ShellError,
    input::FileLines,
    shell::{read_eval_print, Step},
    value::Value,
};

pub struct HelpCommand;

impl HelpCommand {
    fn short_help(command: &dyn Command) -> String {
        let summary = command.help().lines().next().unwrap_or_default();
        format!("{:<8} - {}", command.name(), summary)
    }

    fn long_help(command: &dyn Command) -> String {
        let mut doc = format!("{} - {}", command.name(), command.help());
        if !command.aliases().is_empty() {
            doc.push_str(&format!("\nAliases: {}", command.aliases().join(", ")));
        }
        doc
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["?"]
    }

    fn help(&self) -> &str {
        "displays help for all commands, or for one command.

For example:

    -> help
    -> help select"
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        if !args.is_empty() {
            return match ctx.registry.resolve(args)? {
                Dispatch::Found { command, .. } => Ok(Value::text(Self::long_help(&*command))),
                Dispatch::Unresolved(_) => Ok(Value::warning(format!(
                    "unknown command: {}",
                    args.join(" ")
                ))),
            };
        }

        let mut commands: Vec<_> = ctx.registry.commands().collect();
        commands.sort_by(|a, b| (a.category(), a.name()).cmp(&(b.category(), b.name())));

        let mut text = format!(
            "httpsh v{}\nThe following are commands that you can enter in the shell, grouped by category:\n",
            env!("CARGO_PKG_VERSION")
        );
        let mut current = None;
        for command in commands {
            if current != Some(command.category()) {
                current = Some(command.category());
                text.push_str(&format!("\n{}:\n", command.category()));
            }
            text.push_str(&format!("  {}\n", Self::short_help(&**command)));
        }
        Ok(Value::text(text))
    }
}

pub struct RunCommand;

impl Command for RunCommand {
    fn name(&self) -> &str {
        "run"
    }

    fn aliases(&self) -> &[&str] {
        &[".", "source"]
    }

    fn help(&self) -> &str {
        "evaluates commands stored in a file.

Variables and hosts defined by the script remain afterwards. A failing
command stops the script.

For example:

    -> run script
    -> run ~/script"
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some(file_name) = args.first() else {
            return Err(ShellError::Usage("usage: run SCRIPT_NAME".to_string()));
        };
        let path = expand_home(file_name);
        let mut script = FileLines::open(&path)?;
        tracing::info!(path = %path.display(), "running script");

        let start = Instant::now();
        let mut sub = ctx.with_input(&mut script);
        loop {
            match read_eval_print(&mut sub)? {
                Step::Finished => break,
                Step::Evaluated => {}
                Step::Unresolved(tokens) => {
                    tracing::warn!(line = %tokens.join(" "), "skipping unknown command in script");
                }
            }
        }
        let elapsed = start.elapsed();
        tracing::info!(path = %path.display(), ?elapsed, "script finished");

        Ok(Value::bold(format!(
            "Script ran in: {:.3} seconds",
            elapsed.as_secs_f64()
        )))
    }
}

pub struct RepeatCommand;

impl Command for RepeatCommand {
    fn name(&self) -> &str {
        "repeat"
    }

    fn help(&self) -> &str {
        "repeats a command n times and prints the average time.

There is no delay between repetitions.

For example:

    -> repeat 100 get /customers
    -> repeat 10 run script"
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let usage = || ShellError::Usage("usage: repeat COUNT COMMAND [ARGS...]".to_string());
        let (count, rest) = args.split_first().ok_or_else(usage)?;
        let repetitions: usize = count.parse().map_err(|_| usage())?;
        if repetitions == 0 {
            return Err(usage());
        }

        let (command, cmd_args) = match ctx.registry.resolve(rest)? {
            Dispatch::Found { command, args } => (command, args),
            Dispatch::Unresolved(tokens) => {
                return Err(ShellError::NotFound(format!(
                    "unknown command: {}",
                    tokens.join(" ")
                )));
            }
        };

        let mut total = 0.0;
        for _ in 0..repetitions {
            let start = Instant::now();
            let result = command.evaluate(ctx, &cmd_args)?;
            if !result.is_null() {
                ctx.renderer.display(&result);
            }
            total += start.elapsed().as_secs_f64();
        }

        Ok(Value::bold(format!(
            "Ran command: {} times.  Average time: {:.6} seconds",
            repetitions,
            total / repetitions as f64
        )))
    }
}
