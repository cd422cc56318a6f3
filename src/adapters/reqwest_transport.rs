//! Reqwest-based streaming transport adapter.
//!
//! Production implementation of the [`Transport`] trait, wrapping a
//! `reqwest::Client`.

use async_trait::async_trait;
use futures_util::StreamExt;

use crate::traits::{ByteStream, Headers, Transport, TransportError};

/// Streaming transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with default client settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport around a custom `reqwest::Client`.
    ///
    /// Allows configuration like request timeouts or proxy settings to
    /// be set by the caller.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Convert a reqwest error to a TransportError.
    fn convert_error(err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_stream(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError> {
        let mut builder = self.client.post(url).json(body);
        for (key, value) in headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await.map_err(Self::convert_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(TransportError::Status { status, body });
        }

        let stream = response
            .bytes_stream()
            .map(|result| result.map_err(Self::convert_error));

        Ok(Box::pin(stream))
    }
}
