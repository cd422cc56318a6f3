//! Mock transport for testing.
//!
//! Scripted responses are consumed in order, one per request, so a test
//! can drive several sessions against the same transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::traits::{ByteStream, Headers, Transport, TransportError};

/// A recorded request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: serde_json::Value,
    pub headers: Headers,
}

/// What the mock should do with one request.
#[derive(Debug)]
pub enum ScriptedResponse {
    /// Stream these chunks, then close cleanly.
    Chunks(Vec<Bytes>),
    /// Stream items with explicit results, allowing mid-stream failures.
    Items(Vec<Result<Bytes, TransportError>>),
    /// Fail the request before any stream is handed back.
    Error(TransportError),
    /// Hand back a stream that stays open and never yields.
    Pending,
}

/// Transport that replays scripted responses without touching the network.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the single-request case: stream each
    /// string as one chunk, then close.
    pub fn with_chunks(chunks: &[&str]) -> Self {
        let transport = Self::new();
        transport.enqueue(ScriptedResponse::Chunks(
            chunks.iter().map(|c| Bytes::from(c.to_string())).collect(),
        ));
        transport
    }

    /// Queue the response for the next request.
    pub fn enqueue(&self, response: ScriptedResponse) {
        self.script.lock().unwrap().push_back(response);
    }

    /// All requests made so far, in order.
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_stream(
        &self,
        url: &str,
        body: &serde_json::Value,
        headers: &Headers,
    ) -> Result<ByteStream, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
            headers: headers.clone(),
        });

        match self.script.lock().unwrap().pop_front() {
            Some(ScriptedResponse::Chunks(chunks)) => Ok(Box::pin(futures_util::stream::iter(
                chunks.into_iter().map(Ok),
            ))),
            Some(ScriptedResponse::Items(items)) => {
                Ok(Box::pin(futures_util::stream::iter(items)))
            }
            Some(ScriptedResponse::Error(err)) => Err(err),
            Some(ScriptedResponse::Pending) => Ok(Box::pin(futures_util::stream::pending())),
            None => Err(TransportError::Other(format!(
                "no scripted response for {}",
                url
            ))),
        }
    }
}
