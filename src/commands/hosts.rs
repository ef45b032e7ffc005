use super::{Category, Command, Context};
use crate::{
    error::ShellError,
    value::{Host, Value},
};

const NO_HOST: &str = "no host.  try 'help host'";

pub struct HeadersCommand;

impl Command for HeadersCommand {
    fn name(&self) -> &str {
        "headers"
    }

    fn aliases(&self) -> &[&str] {
        &["hs"]
    }

    fn category(&self) -> Category {
        Category::Hosts
    }

    fn help(&self) -> &str {
        "shows the headers of the current host."
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some(host) = ctx.env.host() else {
            return Ok(Value::warning(NO_HOST));
        };
        if !args.is_empty() {
            return Ok(Value::warning("headers has no arguments"));
        }
        let lines: Vec<String> = host
            .headers
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        Ok(Value::text(lines.join("\n")))
    }
}

pub struct HostsCommand;

impl Command for HostsCommand {
    fn name(&self) -> &str {
        "hosts"
    }

    fn category(&self) -> Category {
        Category::Hosts
    }

    fn help(&self) -> &str {
        "shows the defined hosts.

The current host is prefixed by an asterisk."
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        if !args.is_empty() {
            return Ok(Value::warning("hosts has no arguments"));
        }
        let current = ctx.env.host_alias();
        let lines: Vec<String> = ctx
            .env
            .variables()
            .into_iter()
            .filter_map(|(name, value)| value.as_host().map(|host| (name, host)))
            .map(|(name, host)| {
                let marker = if current == Some(name) { '*' } else { ' ' };
                format!("{}{}: {}", marker, name, host.hostname)
            })
            .collect();
        Ok(Value::text(lines.join("\n")))
    }
}

pub struct HeaderCommand;

impl Command for HeaderCommand {
    fn name(&self) -> &str {
        "header"
    }

    fn aliases(&self) -> &[&str] {
        &["hd"]
    }

    fn category(&self) -> Category {
        Category::Hosts
    }

    fn help(&self) -> &str {
        "sets or displays the value of a header on the current host.

For example:

    -> header accept
    -> header accept application/json"
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some(host) = ctx.env.host_mut() else {
            return Ok(Value::warning(NO_HOST));
        };
        match args {
            [] => Ok(Value::warning("usage: header NAME [VALUE]")),
            [name] => Ok(host
                .headers
                .get(name)
                .map(Value::text)
                .unwrap_or_else(|| Value::warning(format!("unknown header: {}", name)))),
            [name, value @ ..] => {
                host.add_header(name.clone(), value.join(" "));
                Ok(Value::Null)
            }
        }
    }
}

pub struct HostCommand;

impl HostCommand {
    /// Give a bare hostname a scheme, asking for one when a person is typing.
    fn with_scheme(ctx: &mut Context<'_>, hostname: &str) -> Result<String, ShellError> {
        if hostname.starts_with("http") {
            return Ok(hostname.to_string());
        }
        let scheme = if ctx.input.interactive() {
            ctx.input
                .next_answer("Enter Schema [http/HTTPS]: ")?
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "https".to_string())
        } else {
            "https".to_string()
        };
        Ok(format!("{}://{}", scheme, hostname))
    }
}

impl Command for HostCommand {
    fn name(&self) -> &str {
        "host"
    }

    fn aliases(&self) -> &[&str] {
        &["h"]
    }

    fn category(&self) -> Category {
        Category::Hosts
    }

    fn help(&self) -> &str {
        "displays or sets the current host.

For example:

    show the current host.
    -> host

    create a host with the scheme specified.
    -> host NAME https://api.coffeeshop.com

    create a host with no scheme (you will be prompted for one).
    -> host NAME api.barbershop.com

    switch to a host by name.
    -> host NAME"
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        match args {
            [name] => {
                let host = ctx.env.switch_host(name)?;
                Ok(Value::Host(host.clone()))
            }
            [name, hostname] => {
                let hostname = Self::with_scheme(ctx, hostname)?;
                let host = Host::new(name.clone(), hostname);
                ctx.env.add_host(host.clone());
                Ok(Value::Host(host))
            }
            [] => match ctx.env.host() {
                Some(host) => Ok(Value::Host(host.clone())),
                None => Ok(Value::warning("no current host. try: host NAME HOSTNAME")),
            },
            _ => Err(ShellError::Usage("usage: host [NAME [HOSTNAME]]".to_string())),
        }
    }
}
