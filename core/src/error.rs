//! Error types for the API client.
//!
//! # Design
//! `TransportError` belongs to the executor and reaches the caller unchanged
//! inside `ApiError::Transport`. Everything else is raised by `ApiProvider`
//! itself. Status and decode errors keep the raw response body as text so a
//! misbehaving API can be diagnosed from the error alone.

use thiserror::Error;

/// Failure raised by a `RequestExecutor` while performing the round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    /// The call was cancelled by the transport layer.
    #[error("request cancelled")]
    Cancelled,

    /// The request could not be put on the wire (invalid header, for example).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("i/o error: {0}")]
    Io(String),

    /// The peer answered with something that is not a valid HTTP response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors returned by `ApiProvider`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request could not be composed (bad path, unusable URL).
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The server returned a status outside `200..300`.
    #[error("received status code {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("error decoding: {message} {body}")]
    Decode { message: String, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("error encoding: {0}")]
    Encode(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Status code of an `HttpStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Raw response body carried by status and decode errors.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::HttpStatus { body, .. } | ApiError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}
