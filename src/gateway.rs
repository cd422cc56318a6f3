//! Client for the lesson gateway.
//!
//! [`GatewayClient`] issues one streaming request per lesson and exposes
//! the response as a stream of decoded [`StreamFrame`]s. Transport and
//! decode failures surface as classified [`StreamFailure`] items; the
//! stream ends after the first failure.

use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use tracing::debug;

use crate::adapters::ReqwestTransport;
use crate::config::GatewayConfig;
use crate::error::StreamFailure;
use crate::models::{LessonKind, StreamRequest};
use crate::sse::{interpret, FrameDecoder, StreamFrame};
use crate::traits::{ByteStream, Headers, Transport};

/// Decoded frames from one lesson stream.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<StreamFrame, StreamFailure>> + Send>>;

/// Client for the lesson gateway.
#[derive(Clone)]
pub struct GatewayClient {
    config: GatewayConfig,
    transport: Arc<dyn Transport>,
}

impl GatewayClient {
    /// Create a client using the reqwest transport.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    /// Create a client over a custom transport.
    pub fn with_transport(config: GatewayConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Full URL for one gateway function.
    pub fn endpoint(&self, kind: LessonKind) -> String {
        format!(
            "{}/functions/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            kind.wire_name()
        )
    }

    /// Open one lesson stream.
    ///
    /// Returns after the response headers resolve; frames then arrive
    /// lazily as the body streams in. A non-success status or connection
    /// failure is classified and returned as the error.
    pub async fn open_stream(&self, request: &StreamRequest) -> Result<FrameStream, StreamFailure> {
        let url = self.endpoint(request.kind);
        let body = serde_json::to_value(request)
            .map_err(|err| StreamFailure::Malformed {
                message: format!("failed to encode request: {}", err),
            })?;

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        if let Some(key) = &self.config.api_key {
            headers.insert("Authorization".to_string(), format!("Bearer {}", key));
        }

        debug!(function = request.kind.wire_name(), topic = %request.topic, "opening lesson stream");

        let bytes = self
            .transport
            .post_stream(&url, &body, &headers)
            .await
            .map_err(StreamFailure::from)?;

        Ok(decode_stream(bytes))
    }
}

struct DecodeState {
    bytes: ByteStream,
    decoder: FrameDecoder,
    pending: VecDeque<StreamFrame>,
    finished: bool,
}

/// Turn a raw byte stream into a stream of decoded frames.
///
/// Frames already completed by an earlier chunk drain before the next
/// read, preserving decode order. The first failure ends the stream.
fn decode_stream(bytes: ByteStream) -> FrameStream {
    let state = DecodeState {
        bytes,
        decoder: FrameDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    let stream = futures_util::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.pending.pop_front() {
                return Some((Ok(frame), state));
            }
            if state.finished {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => match state.decoder.feed(&chunk) {
                    Ok(frames) => {
                        for data in frames {
                            if let Some(frame) = interpret(&data) {
                                state.pending.push_back(frame);
                            }
                        }
                    }
                    Err(overflow) => {
                        state.finished = true;
                        return Some((
                            Err(StreamFailure::Malformed {
                                message: overflow.to_string(),
                            }),
                            state,
                        ));
                    }
                },
                Some(Err(err)) => {
                    state.finished = true;
                    return Some((Err(StreamFailure::from(err)), state));
                }
                None => {
                    state.finished = true;
                    if state.decoder.has_partial() {
                        debug!("discarding partial frame at stream end");
                    }
                    return None;
                }
            }
        }
    });

    Box::pin(stream)
}
