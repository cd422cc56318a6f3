//! Classified streaming failures.
//!
//! Every failure a stream session can surface is folded into
//! [`StreamFailure`]. Classification is a pure mapping from the transport
//! outcome (an HTTP status plus body, the absence of any response, or an
//! error frame decoded mid-stream), so call sites render consistent
//! messages for the same input.

use std::fmt;

use crate::traits::transport::TransportError;

/// A classified stream failure, delivered through the error callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFailure {
    /// Upstream rejected the request with HTTP 429.
    RateLimited { message: String },

    /// Upstream rejected the request with HTTP 402.
    QuotaExceeded { message: String },

    /// Any other non-2xx response, or an error frame decoded mid-stream.
    /// A status of 0 means no HTTP status was involved.
    Upstream { status: u16, message: String },

    /// No response was received at all.
    Network { message: String },

    /// The response could not be decoded.
    Malformed { message: String },
}

impl StreamFailure {
    /// Check if this failure is likely transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            StreamFailure::RateLimited { .. } => true,
            StreamFailure::QuotaExceeded { .. } => false,
            StreamFailure::Upstream { status, .. } => *status == 0 || *status >= 500,
            StreamFailure::Network { .. } => true,
            StreamFailure::Malformed { .. } => false,
        }
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            StreamFailure::RateLimited { .. } => {
                "Rate limit exceeded. Please try again in a moment.".to_string()
            }
            StreamFailure::QuotaExceeded { .. } => "AI usage limit reached.".to_string(),
            StreamFailure::Upstream { .. }
            | StreamFailure::Network { .. }
            | StreamFailure::Malformed { .. } => {
                "AI temporarily unavailable. Please try again in a moment.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamFailure::RateLimited { .. } => "E_STREAM_RATE",
            StreamFailure::QuotaExceeded { .. } => "E_STREAM_QUOTA",
            StreamFailure::Upstream { .. } => "E_STREAM_UPSTREAM",
            StreamFailure::Network { .. } => "E_STREAM_NET",
            StreamFailure::Malformed { .. } => "E_STREAM_MALFORMED",
        }
    }
}

impl fmt::Display for StreamFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamFailure::RateLimited { message } => {
                write!(f, "Rate limited: {}", message)
            }
            StreamFailure::QuotaExceeded { message } => {
                write!(f, "Quota exceeded: {}", message)
            }
            StreamFailure::Upstream { status: 0, message } => {
                write!(f, "Upstream failure: {}", message)
            }
            StreamFailure::Upstream { status, message } => {
                write!(f, "Upstream failure (status {}): {}", status, message)
            }
            StreamFailure::Network { message } => {
                write!(f, "Network unavailable: {}", message)
            }
            StreamFailure::Malformed { message } => {
                write!(f, "Malformed response: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamFailure {}

impl From<TransportError> for StreamFailure {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::ConnectionFailed(message) => StreamFailure::Network { message },
            TransportError::Timeout(message) => StreamFailure::Network { message },
            TransportError::Status { status, body } => classify_status(status, &body),
            TransportError::Decode(message) => StreamFailure::Malformed { message },
            TransportError::Other(message) => StreamFailure::Network { message },
        }
    }
}

/// Classify a non-2xx response into a [`StreamFailure`].
///
/// Bodies follow the `{"error": ...}` convention where the error member is
/// either a bare string or an object with a `message`; bodies that do not
/// fit are carried verbatim.
pub fn classify_status(status: u16, body: &str) -> StreamFailure {
    let message = extract_error_message(body)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| format!("upstream returned status {}", status));

    match status {
        429 => StreamFailure::RateLimited { message },
        402 => StreamFailure::QuotaExceeded { message },
        _ => StreamFailure::Upstream { status, message },
    }
}

/// Classify an error frame decoded mid-stream.
pub fn classify_error_frame(message: &str) -> StreamFailure {
    StreamFailure::Upstream {
        status: 0,
        message: message.to_string(),
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Object(fields) => fields
            .get("message")
            .and_then(|message| message.as_str())
            .map(|message| message.to_string()),
        _ => None,
    }
}
