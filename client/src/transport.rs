//! Request execution behind a trait so the controller never names an HTTP
//! library directly.
//!
//! # Design
//! `Transport` is the one seam where I/O happens; everything on either side
//! of it works on plain `HttpRequest` / `HttpResponse` data. Tests drive the
//! controller with a scripted implementation, and [`UreqTransport`] is the
//! real one.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single HTTP round-trip.
///
/// Implementations return `Ok` for any response the server produced,
/// including 4xx/5xx — status interpretation belongs to the parse layer.
/// `Err(ApiError::Network)` is reserved for requests that never completed.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// The agent disables status-code-as-error behavior so 4xx/5xx responses
/// come back as data rather than `Err`, leaving status handling to
/// `TodoApi::parse_*`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => self.agent.get(&request.url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&request.url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&request.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&request.url).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&request.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&request.url).send_empty(),
            (HttpMethod::Patch, Some(body)) => self
                .agent
                .patch(&request.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => self.agent.patch(&request.url).send_empty(),
        };

        let mut response = result.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
