//! HTTP transport types shared between request building and execution.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! builder side (`TodoApi`) produces `HttpRequest` values and the parse side
//! consumes `HttpResponse` values without ever touching the network — a
//! `Transport` implementation sits between the two and is the only place
//! I/O happens. Keeping both halves as data keeps them deterministic and
//! easy to test.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// An HTTP request described as plain data.
///
/// Built by `TodoApi::build_*` methods and executed by a [`Transport`].
///
/// [`Transport`]: crate::transport::Transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by a transport after executing an `HttpRequest`, then passed to
/// `TodoApi::parse_*` methods for status checking and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
