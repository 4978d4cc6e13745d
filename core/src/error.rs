//! Error types for the festival API client.
//!
//! # Design
//! `Unauthorized` gets a dedicated variant because callers branch on it: an
//! admin view that sees it clears the session and redirects to login. Raising
//! it from the status-check layer (401/403) replaces the fragile
//! message-substring detection the call sites would otherwise need. All other
//! non-2xx responses land in `Api` carrying the server's `message` field when
//! the error body has one.

use thiserror::Error;

/// Errors returned by the client's parse methods and the transport executor.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, I/O). Never
    /// retried automatically; the user retries the action.
    #[error("network error: could not reach the API server: {0}")]
    Network(String),

    /// The server returned 401 or 403 for this request.
    #[error("unauthorized")]
    Unauthorized,

    /// The server returned a non-2xx status other than 401/403. `message` is
    /// the error body's `message` field, or a generic status line if the body
    /// has none.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request was cancelled before dispatch, or its response arrived
    /// after cancellation and was dropped.
    #[error("request cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_message_verbatim() {
        let err = ApiError::Api {
            status: 404,
            message: "Event not found".to_string(),
        };
        assert_eq!(err.to_string(), "Event not found");
    }

    #[test]
    fn network_error_names_the_transport_failure() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
