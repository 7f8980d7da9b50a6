//! HTTP transport for the WebDriver client.
//!
//! `HttpTransport` keeps the wire client independent of the HTTP library so it
//! can be exercised with a scripted transport. `UreqTransport` is the
//! production implementation.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// HTTP methods used by the WebDriver protocol subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Any HTTP response, error statuses included.
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    pub status: u16,
    /// Parsed JSON body; `Null` when empty, a JSON string when not JSON.
    pub body: Value,
}

/// No HTTP response was received (refused, reset, timed out).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends one JSON request and returns the response.
pub trait HttpTransport {
    /// # Errors
    ///
    /// Returns `TransportError` if no response was received. HTTP error
    /// statuses are returned as `Ok`.
    fn send(&self, method: Method, url: &str, body: Option<&Value>)
    -> Result<WireResponse, TransportError>;
}

/// Blocking transport backed by a `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// `timeout` bounds both connecting and waiting for each response.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .build();
        Self { agent }
    }
}

impl HttpTransport for UreqTransport {
    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<WireResponse, TransportError> {
        let request = self.agent.request(method.as_str(), url);
        let result = match body {
            Some(body) => request
                .set("Content-Type", "application/json; charset=utf-8")
                .send_string(&body.to_string()),
            None => request.call(),
        };

        let response = match result {
            Ok(response) | Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => return Err(TransportError(e.to_string())),
        };

        let status = response.status();
        let text = response
            .into_string()
            .map_err(|e| TransportError(format!("cannot read response body: {e}")))?;
        Ok(WireResponse {
            status,
            body: parse_body(text),
        })
    }
}

fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
