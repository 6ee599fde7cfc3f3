//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the operation failed" — the edit-route
//! resolver navigates away on a missing id, while the list reconciler rolls
//! back on any failure. Every other variant carries the name of the operation
//! that produced it (`list`, `get`, `create`, `update`, `delete`) so a single
//! normalized error can still be reported meaningfully.

use std::fmt;

/// Errors returned by `TodoClient` parse methods and the app-layer gateway.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the requested todo does not exist.
    NotFound,

    /// The operation failed: the server returned a non-2xx status other than
    /// 404, or the request never completed (`status` is `None` in that case).
    RequestFailed {
        op: &'static str,
        status: Option<u16>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    Deserialization { op: &'static str, message: String },

    /// The request payload could not be serialized to JSON.
    Serialization { op: &'static str, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::RequestFailed {
                op,
                status: Some(status),
                body,
            } => write!(f, "{op} failed: HTTP {status}: {body}"),
            ApiError::RequestFailed {
                op,
                status: None,
                body,
            } => write!(f, "{op} failed: {body}"),
            ApiError::Deserialization { op, message } => {
                write!(f, "{op} response could not be decoded: {message}")
            }
            ApiError::Serialization { op, message } => {
                write!(f, "{op} payload could not be encoded: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display_includes_op_and_status() {
        let err = ApiError::RequestFailed {
            op: "update",
            status: Some(500),
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "update failed: HTTP 500: boom");
    }

    #[test]
    fn request_failed_display_without_status() {
        let err = ApiError::RequestFailed {
            op: "list",
            status: None,
            body: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "list failed: connection refused");
    }
}
