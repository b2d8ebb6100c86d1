//! Error type for remote calls to the todo API.
//!
//! # Design
//! Every failure of a remote call is a `TransportError`. The store does not
//! look past that; the variants exist so logs say what actually went wrong.
//! `NotFound` is split out of `Status` because a 404 is the one status a
//! caller can reasonably act on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one and other than 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("network error: {0}")]
    Network(String),
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound)
    }
}
