use std::{rc::Rc, time::Instant};

use serde_json::Value as JsonValue;

use super::{json::select_response, pipe_target, Category, Command, Context};
use crate::{
    dispatch::Dispatch,
    error::ShellError,
    transport::Method,
    value::{normalize_path, Host, Request, Response, Value, ValueType},
};

const PAYLOAD_PROMPT: &str = "Enter Payload: ";

/// Sends one HTTP verb to the active host.
pub struct HttpCommand {
    name: &'static str,
    aliases: &'static [&'static str],
    method: Method,
    takes_payload: bool,
    help: &'static str,
}

impl HttpCommand {
    pub fn head() -> Self {
        HttpCommand {
            name: "head",
            aliases: &["HEAD"],
            method: Method::Head,
            takes_payload: false,
            help: "sends a HEAD request using the current host and headers.

For example:

    -> head /customers",
        }
    }

    pub fn options() -> Self {
        HttpCommand {
            name: "options",
            aliases: &["OPTIONS", "opt"],
            method: Method::Options,
            takes_payload: false,
            help: "sends an OPTIONS request using the current host and headers.

For example:

    -> options /customers",
        }
    }

    pub fn get() -> Self {
        HttpCommand {
            name: "get",
            aliases: &["GET", "g"],
            method: Method::Get,
            takes_payload: false,
            help: "sends a GET request using the current host and headers.

For example:

    -> get /customers
    -> get /customers | content.name",
        }
    }

    pub fn put() -> Self {
        HttpCommand {
            name: "put",
            aliases: &["PUT", "pu"],
            method: Method::Put,
            takes_payload: true,
            help: "sends a PUT request with a JSON payload.

For example:

    -> put /customers/1",
        }
    }

    pub fn post() -> Self {
        HttpCommand {
            name: "post",
            aliases: &["POST", "po"],
            method: Method::Post,
            takes_payload: true,
            help: "sends a POST request with a JSON payload.

For example:

    -> post /customers",
        }
    }

    pub fn get_with_payload() -> Self {
        HttpCommand {
            name: "getp",
            aliases: &["GETP", "gp"],
            method: Method::Get,
            takes_payload: true,
            help: "sends a GET request with a JSON payload.

Some search services expect a query document in the body of a GET.

For example:

    -> getp /_search",
        }
    }

    pub fn patch() -> Self {
        HttpCommand {
            name: "patch",
            aliases: &["pat"],
            method: Method::Patch,
            takes_payload: true,
            help: "sends a PATCH request with a JSON payload.

For example:

    -> patch /customers/1",
        }
    }

    pub fn delete() -> Self {
        HttpCommand {
            name: "delete",
            aliases: &["del"],
            method: Method::Delete,
            takes_payload: false,
            help: "sends a DELETE request using the current host and headers.

For example:

    -> delete /customers/1",
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Prompt for a payload when this verb carries one.
    pub fn read_payload(&self, ctx: &mut Context<'_>) -> Result<Option<JsonValue>, ShellError> {
        if self.takes_payload {
            ctx.input.next_payload(PAYLOAD_PROMPT)
        } else {
            Ok(None)
        }
    }

    /// The curl invocation equivalent to this request.
    pub fn to_curl(
        &self,
        host: &Host,
        path: Option<&str>,
        payload: Option<&JsonValue>,
    ) -> String {
        let mut command = format!("curl -X{} \"{}", self.method, host.hostname);
        if let Some(path) = path {
            command.push_str(&normalize_path(path));
        }
        command.push('"');
        for (name, value) in &host.headers {
            command.push_str(&format!(" -H '{}: {}'", name, value));
        }
        if let Some(payload) = payload {
            if !host.headers.contains_key("Content-Type") {
                command.push_str(" -H 'Content-Type: application/json'");
            }
            command.push_str(&format!(" -d '{}'", payload));
        }
        command
    }
}

/// Send a request through the session's transport and time it.
pub fn perform(
    ctx: &mut Context<'_>,
    method: Method,
    host: &Host,
    path: &str,
    payload: Option<&JsonValue>,
) -> Result<Response, ShellError> {
    let url = host.url(path);
    let start = Instant::now();
    let http = ctx.transport.request(method, &url, &host.headers, payload)?;
    let elapsed = start.elapsed();
    tracing::debug!(%method, url = %url, status = http.status, ?elapsed, "request complete");
    Ok(Response::new(http, elapsed))
}

impl Command for HttpCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn aliases(&self) -> &[&str] {
        self.aliases
    }

    fn category(&self) -> Category {
        Category::Http
    }

    fn help(&self) -> &str {
        self.help
    }

    fn assignable(&self) -> bool {
        true
    }

    fn as_http(&self) -> Option<&HttpCommand> {
        Some(self)
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some(host) = ctx.env.host().cloned() else {
            return Ok(Value::warning("please specify a host."));
        };
        let path = args.first().map(String::as_str).unwrap_or("/");
        let payload = self.read_payload(ctx)?;
        let resp = perform(ctx, self.method, &host, path, payload.as_ref())?;

        match pipe_target(args) {
            Some(statement) => select_response(&resp, statement),
            None => Ok(Value::Response(resp)),
        }
    }
}

/// Resolve `args` to an HTTP command, or explain why not.
fn resolve_http(
    ctx: &Context<'_>,
    args: &[String],
) -> Result<Option<(Rc<dyn Command>, Vec<String>)>, ShellError> {
    match ctx.registry.resolve(args)? {
        Dispatch::Found { command, args } if command.as_http().is_some() => {
            Ok(Some((command, args)))
        }
        _ => Ok(None),
    }
}

fn not_http(args: &[String]) -> Value {
    Value::warning(format!(
        "'{}' is not an HTTP command (e.g. get, post)",
        args.join(" ")
    ))
}

pub struct RequestCommand;

impl Command for RequestCommand {
    fn name(&self) -> &str {
        "request"
    }

    fn aliases(&self) -> &[&str] {
        &["@"]
    }

    fn category(&self) -> Category {
        Category::Requests
    }

    fn help(&self) -> &str {
        "creates an HTTP request that can be sent multiple times.

Payload verbs prompt for their payload once, when the request is created.

Example:

    -> request get /dogs
    -> get_dogs = request get /dogs"
    }

    fn assignable(&self) -> bool {
        true
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some(host) = ctx.env.host().cloned() else {
            return Err(ShellError::Usage("no host.  try 'help host'".to_string()));
        };
        let Some((command, cmd_args)) = resolve_http(ctx, args)? else {
            return Ok(not_http(args));
        };
        let Some(http) = command.as_http() else {
            return Ok(not_http(args));
        };

        let path = cmd_args.first().map(String::as_str).unwrap_or("/");
        let payload = http.read_payload(ctx)?;
        Ok(Value::Request(
            Request::new(&host, http.method(), path).with_payload(payload),
        ))
    }
}

pub struct SendCommand;

impl Command for SendCommand {
    fn name(&self) -> &str {
        "send"
    }

    fn aliases(&self) -> &[&str] {
        &["!"]
    }

    fn category(&self) -> Category {
        Category::Requests
    }

    fn help(&self) -> &str {
        "sends a stored request and prints its results.

The request goes to the host as it was when the request was created.

Example:

    -> req = request get /dogs?breed=Pug
    -> send req
    -> send req | content.breed"
    }

    fn assignable(&self) -> bool {
        true
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some(name) = args.first() else {
            return Err(ShellError::Usage("usage: send VAR".to_string()));
        };
        let request = ctx
            .env
            .lookup(name, Some(ValueType::Request))?
            .as_request()
            .cloned()
            .ok_or_else(|| ShellError::Usage(format!("'{}' is not a Request", name)))?;

        let resp = perform(
            ctx,
            request.method,
            &request.host,
            &request.path,
            request.payload.as_ref(),
        )?;

        match pipe_target(args) {
            Some(statement) => select_response(&resp, statement),
            None => Ok(Value::Response(resp)),
        }
    }
}

pub struct CurlCommand;

impl Command for CurlCommand {
    fn name(&self) -> &str {
        "curl"
    }

    fn help(&self) -> &str {
        "prints a curl command for an HTTP command (e.g. get, put).

You must have an active host. Its headers are included in the curl command.

For example:

    -> curl get /customers"
    }

    fn evaluate(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<Value, ShellError> {
        let Some((command, cmd_args)) = resolve_http(ctx, args)? else {
            return Ok(not_http(args));
        };
        let Some(http) = command.as_http() else {
            return Ok(not_http(args));
        };
        let Some(host) = ctx.env.host().cloned() else {
            return Err(ShellError::Usage("no host.  try 'help host'".to_string()));
        };

        let payload = http.read_payload(ctx)?;
        Ok(Value::text(http.to_curl(
            &host,
            cmd_args.first().map(String::as_str),
            payload.as_ref(),
        )))
    }
}
