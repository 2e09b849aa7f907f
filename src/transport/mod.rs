//! HTTP transport layer for the REST client.
//!
//! Provides the transport abstraction the client dispatches through and a
//! reqwest-backed implementation of it.

mod http;

pub use self::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl};

use std::time::Duration;

/// Transport error types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// TLS error.
    ///
    /// The built-in transport reports this when a cause of the reqwest error
    /// mentions a certificate, TLS/SSL or the handshake.
    #[error("TLS error: {message}")]
    Tls {
        /// Error message.
        message: String,
    },

    /// The request could not be handed to the network stack.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}
