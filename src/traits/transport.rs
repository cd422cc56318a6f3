//! Streaming HTTP transport abstraction.
//!
//! [`Transport`] is the seam between the gateway client and the network.
//! Production code uses the reqwest adapter; tests substitute a scripted
//! mock so stream behavior can be exercised without sockets.

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::Stream;

/// Request headers as simple key/value pairs.
pub type Headers = HashMap<String, String>;

/// The raw byte stream a transport hands back for a streaming response.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// Errors surfaced by a [`Transport`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not be established.
    ConnectionFailed(String),

    /// The request or a chunk read timed out.
    Timeout(String),

    /// The server answered with a non-success status.
    Status { status: u16, body: String },

    /// The response body could not be read or decoded.
    Decode(String),

    /// Anything else the underlying client reports.
    Other(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::ConnectionFailed(message) => {
                write!(f, "Connection failed: {}", message)
            }
            TransportError::Timeout(message) => write!(f, "Request timed out: {}", message),
            TransportError::Status { status, body } => {
                write!(f, "Server returned status {}: {}", status, body)
            }
            TransportError::Decode(message) => write!(f, "Failed to decode response: {}", message),
            TransportError::Other(message) => write!(f, "Transport error: {}", message),
        }
    }
}

impl std::error::Error for TransportError {}

/// Abstraction over a streaming HTTP client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body and return the response body as a byte stream.
    ///
    /// Non-2xx responses resolve to [`TransportError::Status`] with the
    /// body already read, so callers can classify without touching the
    /// stream.
    async fn post_stream(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError>;
}
