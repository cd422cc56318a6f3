//! Common test utilities for integration tests.
//!
//! Builders for event-stream bodies in the gateway's wire shape, plus
//! a client config pointed at a mock server.

use std::time::Duration;

use learnforge::config::GatewayConfig;

/// One event carrying a text delta in the gateway's wire shape.
pub fn sse_delta(text: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({"choices": [{"delta": {"content": text}}]})
    )
}

/// The terminal sentinel event.
pub fn sse_done() -> String {
    "data: [DONE]\n\n".to_string()
}

/// An event carrying an embedded error object.
#[allow(dead_code)]
pub fn sse_error(message: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({"error": {"message": message}})
    )
}

/// A full body: each delta in its own event, then the sentinel.
pub fn sse_body(deltas: &[&str]) -> String {
    let mut body = String::new();
    for delta in deltas {
        body.push_str(&sse_delta(delta));
    }
    body.push_str(&sse_done());
    body
}

/// Client config pointed at `base_url`, with an idle timeout short
/// enough that stalled-stream tests finish quickly.
pub fn test_config(base_url: &str) -> GatewayConfig {
    GatewayConfig::new()
        .with_base_url(base_url)
        .with_idle_timeout(Some(Duration::from_millis(500)))
}
