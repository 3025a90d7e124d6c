//! Error types for the contacts API client.
//!
//! # Design
//! A 404 on single-contact lookup is not an error: `parse_get_contact` turns it
//! into `Ok(None)`. Every other non-2xx response lands in `RequestFailed` with
//! the raw status code and body for debugging.

use std::time::Duration;

/// Errors returned by `ContactsClient` parse methods and `ContactsService` calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a status outside the 2xx range.
    #[error("request failed with HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// The round trip did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    TimeoutExceeded(Duration),

    /// The response body did not match the shape expected for its content type.
    #[error("decoding failed: {0}")]
    DecodeFailed(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Connection-level failure other than a timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// A configuration value (such as an Accept media range) was malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// HTTP status carried by `RequestFailed`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
