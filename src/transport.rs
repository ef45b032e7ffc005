//! The network side of the shell.
//!
//! Commands never talk to the network directly; they go through a
//! [`Transport`], which keeps the engine testable with a stub.

use std::{collections::BTreeMap, fmt};

use serde_json::Value as JsonValue;

use crate::error::ShellError;

/// HTTP verbs supported by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Options,
    Put,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Raw response data as returned by a transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are stored lowercase.
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        HttpResponse {
            status,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Something that can perform a blocking HTTP request.
pub trait Transport {
    fn request(
        &self,
        method: Method,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&JsonValue>,
    ) -> Result<HttpResponse, ShellError>;
}

/// The real transport, backed by a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ShellError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| ShellError::ConnectionFailure(format!("http client init failed: {}", e)))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn request(
        &self,
        method: Method,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&JsonValue>,
    ) -> Result<HttpResponse, ShellError> {
        let mut request = self.client.request(method.into(), url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, url, "sending request");
        let response = request
            .send()
            .map_err(|e| ShellError::ConnectionFailure(e.to_string()))?;

        let status = response.status().as_u16();
        let mut header_values = BTreeMap::new();
        for (name, value) in response.headers() {
            let rendered = value.to_str().unwrap_or_default().to_string();
            header_values.insert(name.as_str().to_lowercase(), rendered);
        }
        let body = response
            .bytes()
            .map_err(|e| ShellError::ConnectionFailure(format!("could not read response body: {}", e)))?
            .to_vec();
        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers: header_values,
            body,
        })
    }
}
