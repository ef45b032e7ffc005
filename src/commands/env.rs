use super::{Category, Command, Context};
use crate::{
    error::ShellError,
    value::{Value, ValueType},
};

pub struct TypeCommand;

impl Command for TypeCommand {
    fn name(&self) -> &str {
        "type"
    }

    fn aliases(&self) -> &[&str] {
        &["t"]
    }

    fn category(&self) -> Category {
        Category::Environment
    }

    fn help(&self) -> &str {
        "displays the type of a variable."
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some(name) = args.first() else {
            return Ok(Value::warning("usage: type VAR"));
        };
        match ctx.env.lookup(name, None) {
            Ok(value) => Ok(Value::text(value.type_name())),
            Err(ShellError::NotFound(_)) => Ok(Value::warning(format!("unknown variable: {}", name))),
            Err(e) => Err(e),
        }
    }
}

pub struct EnvCommand;

impl Command for EnvCommand {
    fn name(&self) -> &str {
        "env"
    }

    fn category(&self) -> Category {
        Category::Environment
    }

    fn help(&self) -> &str {
        "displays the environment: the current host, its headers and all variables."
    }

    fn evaluate(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<Value, ShellError> {
        let mut result = "host: ".to_string();
        if let Some(host) = ctx.env.host() {
            result.push_str(&format!("{} ({})", host.hostname, host.alias));
            for (name, value) in &host.headers {
                result.push_str(&format!("\n  {}: {}", name, value));
            }
        }
        result.push('\n');
        result.push_str("variables:");
        for (name, value) in ctx.env.variables() {
            result.push_str(&format!(
                "\n  {} = {} {{ {} }}",
                name,
                value.type_name(),
                value.summary()
            ));
        }
        Ok(Value::text(result))
    }
}

pub struct RemoveCommand;

impl Command for RemoveCommand {
    fn name(&self) -> &str {
        "remove"
    }

    fn aliases(&self) -> &[&str] {
        &["rm", "del"]
    }

    fn category(&self) -> Category {
        Category::Environment
    }

    fn help(&self) -> &str {
        "removes a variable, or a header from the current host.

Variables are tried first.

For example:

    removes a variable named host1 if it exists.
    -> rm host1

    removes the misspelled Acccept header from the current host.
    -> rm Acccept"
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let [name] = args else {
            return Ok(Value::warning("usage: remove NAME"));
        };
        if ctx.env.unbind(name).is_some() {
            return Ok(Value::text(format!("removed variable: {}", name)));
        }
        if let Some(host) = ctx.env.host_mut() {
            if host.remove_header(name).is_some() {
                return Ok(Value::text(format!("removed header: {}", name)));
            }
        }
        Ok(Value::warning(format!("no variable or header named: {}", name)))
    }
}

/// Lists variables, optionally only those of one type.
pub struct VarsCommand {
    name: &'static str,
    aliases: &'static [&'static str],
    category: Category,
    filter: Option<ValueType>,
    help: &'static str,
}

impl VarsCommand {
    pub fn all() -> Self {
        VarsCommand {
            name: "vars",
            aliases: &["ls"],
            category: Category::Environment,
            filter: None,
            help: "displays the variables in the environment.

For example:

    -> vars
    -> ls",
        }
    }

    pub fn requests() -> Self {
        VarsCommand {
            name: "requests",
            aliases: &[],
            category: Category::Requests,
            filter: Some(ValueType::Request),
            help: "displays the requests that have been defined.

For example:

    -> requests",
        }
    }
}

impl Command for VarsCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn aliases(&self) -> &[&str] {
        self.aliases
    }

    fn category(&self) -> Category {
        self.category
    }

    fn help(&self) -> &str {
        self.help
    }

    fn evaluate(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<Value, ShellError> {
        let lines: Vec<String> = ctx
            .env
            .variables()
            .into_iter()
            .filter(|(_, value)| self.filter.is_none() || value.value_type() == self.filter)
            .map(|(name, value)| {
                format!("{} = {} {{ {} }}", name, value.type_name(), value.summary())
            })
            .collect();
        Ok(Value::text(lines.join("\n")))
    }
}
