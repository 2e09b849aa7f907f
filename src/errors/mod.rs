//! Error types for the REST client.
//!
//! The taxonomy is deliberately closed: a call can fail because its URL could
//! not be assembled, because its body could not be encoded, because the
//! transport failed, or because a read response could not be decoded.

use thiserror::Error;

use crate::codec::CodecError;
use crate::transport::TransportError;

/// Result type alias for REST client operations.
pub type RestResult<T> = Result<T, RestError>;

/// Error type for REST client operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The URL assembled from configuration and per-call overrides is not valid.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The string that failed to parse.
        url: String,
        /// Parser error message.
        message: String,
    },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {message}")]
    EncodeFailure {
        /// Error message.
        message: String,
    },

    /// The transport failed to complete the exchange.
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The response body does not match the requested type.
    #[error("Failed to decode response body: {message}")]
    DecodeFailure {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, message: impl ToString) -> Self {
        RestError::InvalidUrl {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Creates an encode failure.
    pub fn encode(error: CodecError) -> Self {
        RestError::EncodeFailure {
            message: error.to_string(),
        }
    }

    /// Creates a decode failure.
    pub fn decode(error: CodecError) -> Self {
        RestError::DecodeFailure {
            message: error.to_string(),
        }
    }

    /// Returns true if the URL could not be assembled.
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, RestError::InvalidUrl { .. })
    }

    /// Returns true if the transport layer failed.
    pub fn is_transport(&self) -> bool {
        matches!(self, RestError::TransportFailure(_))
    }

    /// Returns true if the response could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, RestError::DecodeFailure { .. })
    }

    /// Returns true if the request body could not be encoded.
    pub fn is_encode(&self) -> bool {
        matches!(self, RestError::EncodeFailure { .. })
    }
}
