//! Error types for the todo API client.
//!
//! # Design
//! Failures are classified rather than swallowed: transport problems,
//! missing resources, unexpected statuses, and locally rejected input each
//! get their own variant so the controller can turn any of them into a
//! user-visible notice. `NotFound` keeps a dedicated variant because callers
//! frequently distinguish "the todo is gone" from "the server misbehaved."

use std::fmt;

/// Errors produced by request building, transport execution, or response
/// parsing.
#[derive(Debug)]
pub enum ApiError {
    /// The request never completed — DNS, connect, or read failure.
    Network(String),

    /// The server returned 404 — the requested todo does not exist.
    NotFound,

    /// The server returned an unexpected status other than 404.
    Server { status: u16, body: String },

    /// The input was rejected locally before any request was built.
    Validation(&'static str),

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::NotFound => write!(f, "todo not found"),
            ApiError::Server { status, body } => write!(f, "server error {status}: {body}"),
            ApiError::Validation(msg) => write!(f, "invalid input: {msg}"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_status_and_body() {
        let err = ApiError::Server {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "server error 500: boom");
    }

    #[test]
    fn display_network() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
