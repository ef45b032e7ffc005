//! Presenting values to the user.

use std::io::{self, Stdout, Write};

use colored::Colorize;

use crate::{
    error::ShellError,
    output::JsonPrinter,
    value::{Host, Request, Response, TextStyle, Value},
};

/// Owns all formatting of evaluation results.
///
/// The engine behaves identically whichever renderer is plugged in.
pub trait Renderer {
    fn display(&mut self, value: &Value);

    /// Called before each command read from a script.
    fn echo(&mut self, _command: &str, _args: &[String]) {}

    fn report(&mut self, error: &ShellError);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn display(&mut self, _value: &Value) {}

    fn report(&mut self, _error: &ShellError) {}
}

/// Coloured terminal output.
pub struct TerminalRenderer<W = Stdout> {
    out: W,
    json: JsonPrinter,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        TerminalRenderer::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        TerminalRenderer {
            out,
            json: JsonPrinter::new(true),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("failed to write output: {}", e);
        }
    }

    fn host_lines(&self, host: &Host) -> Vec<String> {
        let mut lines = vec![host.hostname.bold().to_string()];
        for (name, value) in &host.headers {
            lines.push(format!("  {}: {}", name.bold(), value));
        }
        lines
    }

    fn response_lines(&self, resp: &Response) -> Vec<String> {
        let mut lines: Vec<String> = resp
            .http
            .headers
            .iter()
            .map(|(k, v)| format!("{}: {}", k.bold(), v))
            .collect();

        let text = resp.text();
        if resp.is_json() {
            match resp.http.json() {
                Ok(doc) => lines.push(self.json.print(&doc)),
                Err(_) if !text.trim().is_empty() => {
                    lines.push(format!("could not decode response as JSON: {}", text))
                }
                Err(_) => {}
            }
        } else if !text.trim().is_empty() {
            lines.push(text);
        }

        let status = resp.status().to_string();
        let status = if resp.status() >= 400 {
            status.red().bold()
        } else {
            status.green().bold()
        };
        lines.push(format!(
            "{}: {} bytes in {} seconds",
            status,
            resp.http.body.len().to_string().bold(),
            format!("{:.3}", resp.elapsed.as_secs_f64()).bold()
        ));
        lines
    }

    fn request_lines(&self, req: &Request) -> Vec<String> {
        let mut lines = vec![format!("{} Request:", req.method).bold().to_string()];
        lines.extend(self.host_lines(&req.host));
        lines.push(format!("{}{}", "Path: ".bold(), req.path));
        if let Some(payload) = &req.payload {
            lines.push(format!("{}{}", "Payload: ".bold(), payload));
        }
        lines
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn display(&mut self, value: &Value) {
        let lines = match value {
            Value::Null => return,
            Value::Text { text, style } => {
                if text.is_empty() {
                    return;
                }
                match style {
                    TextStyle::Plain => vec![text.clone()],
                    TextStyle::Bold => vec![text.bold().to_string()],
                    TextStyle::Json => match serde_json::from_str(text) {
                        Ok(doc) => vec![self.json.print(&doc)],
                        Err(_) => vec![text.clone()],
                    },
                }
            }
            Value::Error { message, severe } => {
                let styled = if *severe {
                    message.red().bold()
                } else {
                    message.yellow().bold()
                };
                vec![styled.to_string()]
            }
            Value::Host(host) => self.host_lines(host),
            Value::Response(resp) => self.response_lines(resp),
            Value::Request(req) => self.request_lines(req),
        };
        for line in lines {
            self.emit(&line);
        }
    }

    fn echo(&mut self, command: &str, args: &[String]) {
        let line = format!(">> {} {}", command, args.join(" "));
        self.emit(&line.blue().to_string());
    }

    fn report(&mut self, error: &ShellError) {
        let message = error.to_string();
        self.emit(&message.yellow().bold().to_string());
        if !error.is_expected() {
            self.emit(&format!("{:?}", error));
        }
    }
}
