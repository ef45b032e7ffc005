#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
    io::Cursor,
    rc::Rc,
};

use httpsh::{
    FileLines, HttpResponse, Method, Renderer, Shell, ShellError, Transport, Value,
};
use serde_json::Value as JsonValue;

pub const HOST_URL: &str = "https://api.example.com";

/// A request the stub received.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<JsonValue>,
}

#[derive(Default)]
struct StubState {
    queued: VecDeque<Result<HttpResponse, String>>,
    fallback: Option<HttpResponse>,
    calls: Vec<Call>,
}

/// Transport that replays canned responses and records every call.
#[derive(Clone, Default)]
pub struct StubTransport {
    state: Rc<RefCell<StubState>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next request with `resp`.
    pub fn respond(&self, resp: HttpResponse) {
        self.state.borrow_mut().queued.push_back(Ok(resp));
    }

    /// Fail the next request as if the host were unreachable.
    pub fn refuse(&self, reason: &str) {
        self.state.borrow_mut().queued.push_back(Err(reason.to_string()));
    }

    /// Answer every request not otherwise queued with `resp`.
    pub fn always(&self, resp: HttpResponse) {
        self.state.borrow_mut().fallback = Some(resp);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }
}

impl Transport for StubTransport {
    fn request(
        &self,
        method: Method,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&JsonValue>,
    ) -> Result<HttpResponse, ShellError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call {
            method,
            url: url.to_string(),
            headers: headers.clone(),
            body: body.cloned(),
        });
        match state.queued.pop_front() {
            Some(Ok(resp)) => Ok(resp),
            Some(Err(reason)) => Err(ShellError::ConnectionFailure(reason)),
            None => Ok(state.fallback.clone().unwrap_or_else(|| HttpResponse::new(404))),
        }
    }
}

pub fn json_response(status: u16, body: &JsonValue) -> HttpResponse {
    HttpResponse::new(status)
        .with_header("Content-Type", "application/json; charset=utf-8")
        .with_body(body.to_string())
}

pub fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(status)
        .with_header("Content-Type", "text/html")
        .with_body(body)
}

/// Keeps everything it is shown.
#[derive(Default)]
pub struct RecordingRenderer {
    pub displayed: Vec<Value>,
    pub echoed: Vec<String>,
    pub errors: Vec<String>,
}

impl Renderer for RecordingRenderer {
    fn display(&mut self, value: &Value) {
        self.displayed.push(value.clone());
    }

    fn echo(&mut self, command: &str, args: &[String]) {
        self.echoed.push(format!("{} {}", command, args.join(" ")).trim().to_string());
    }

    fn report(&mut self, error: &ShellError) {
        self.errors.push(error.to_string());
    }
}

pub fn lines(text: &str) -> FileLines<Cursor<String>> {
    FileLines::new(Cursor::new(text.to_string()))
}

pub fn shell(stub: &StubTransport) -> Shell {
    colored::control::set_override(false);
    Shell::new(Box::new(stub.clone()))
}

/// A shell whose active host is `api`.
pub fn shell_with_host(stub: &StubTransport) -> Shell {
    let mut shell = shell(stub);
    run(&mut shell, &format!("host api {}", HOST_URL)).expect("host is created");
    shell
}

pub fn run(shell: &mut Shell, line: &str) -> Result<Value, ShellError> {
    run_with_input(shell, line, "")
}

/// Evaluate `line`, answering payload prompts from `input`.
pub fn run_with_input(shell: &mut Shell, line: &str, input: &str) -> Result<Value, ShellError> {
    let mut input = lines(input);
    let mut renderer = RecordingRenderer::default();
    shell.execute(line, &mut input, &mut renderer)
}

pub fn text_of(value: &Value) -> String {
    match value {
        Value::Text { text, .. } => text.clone(),
        Value::Error { message, .. } => message.clone(),
        other => panic!("expected text, got {:?}", other),
    }
}
