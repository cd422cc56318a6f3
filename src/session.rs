//! Stream session lifecycle.
//!
//! A session owns one in-flight lesson request: it opens the gateway
//! stream on a spawned task, accumulates the text, and delivers the
//! observer callbacks in decode order. Exactly one terminal callback
//! fires per session, and none at all once cancellation is observed.
//!
//! Cancellation is cooperative. [`StreamHandle::cancel`] sets a flag the
//! task consults before each delivery; the task is never aborted, so a
//! callback already in flight may complete, but nothing fires after the
//! flag is seen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{classify_error_frame, StreamFailure};
use crate::gateway::GatewayClient;
use crate::models::{RequestError, StreamRequest};
use crate::sse::StreamFrame;
use crate::traits::StreamObserver;

/// Lifecycle state of one stream session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Pending,
    Streaming,
    Completed,
    Failed,
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Failed | SessionStatus::Cancelled
        )
    }
}

/// Final state of a session after its task has finished.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub status: SessionStatus,
    pub text: String,
}

#[derive(Debug)]
struct SessionState {
    status: SessionStatus,
    text: String,
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Apply a terminal status unless the session already reached one.
///
/// Returns whether the transition happened, which is also the license to
/// fire the matching terminal callback.
fn finish(state: &Mutex<SessionState>, status: SessionStatus) -> bool {
    let mut state = lock(state);
    if state.status.is_terminal() {
        return false;
    }
    state.status = status;
    true
}

/// Handle to one in-flight stream session.
pub struct StreamHandle {
    id: Uuid,
    cancelled: Arc<AtomicBool>,
    state: Arc<Mutex<SessionState>>,
    task: JoinHandle<()>,
}

impl StreamHandle {
    /// Open a session for `request`, delivering events to `observer`.
    ///
    /// Returns immediately after spawning the stream task. Fails only on
    /// request validation; network conditions surface later through the
    /// observer's error callback.
    pub fn open(
        client: Arc<GatewayClient>,
        request: StreamRequest,
        observer: impl StreamObserver + 'static,
    ) -> Result<Self, RequestError> {
        request.validate()?;

        let id = Uuid::new_v4();
        let cancelled = Arc::new(AtomicBool::new(false));
        let state = Arc::new(Mutex::new(SessionState {
            status: SessionStatus::Pending,
            text: String::new(),
        }));

        let task = tokio::spawn(run_session(
            client,
            request,
            observer,
            Arc::clone(&state),
            Arc::clone(&cancelled),
        ));

        Ok(Self {
            id,
            cancelled,
            state,
            task,
        })
    }

    /// Identity of this session, for discarding superseded callbacks.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        lock(&self.state).status
    }

    /// Text accumulated so far.
    pub fn text(&self) -> String {
        lock(&self.state).text.clone()
    }

    /// Request cancellation.
    ///
    /// Best-effort and idempotent: a session that already reached a
    /// terminal state is left as it is.
    pub fn cancel(&self) {
        {
            let mut state = lock(&self.state);
            if state.status.is_terminal() {
                debug!(session = %self.id, "cancel ignored, session already terminal");
                return;
            }
            state.status = SessionStatus::Cancelled;
        }
        self.cancelled.store(true, Ordering::SeqCst);
        info!(session = %self.id, "stream session cancelled");
    }

    /// Wait for the session task to finish and return its final state.
    pub async fn join(self) -> SessionOutcome {
        if let Err(err) = self.task.await {
            warn!(session = %self.id, error = %err, "session task did not finish cleanly");
        }
        let state = lock(&self.state);
        SessionOutcome {
            status: state.status,
            text: state.text.clone(),
        }
    }
}

async fn run_session(
    client: Arc<GatewayClient>,
    request: StreamRequest,
    mut observer: impl StreamObserver,
    state: Arc<Mutex<SessionState>>,
    cancelled: Arc<AtomicBool>,
) {
    let idle_timeout = client.config().idle_timeout;

    let mut stream = match client.open_stream(&request).await {
        Ok(stream) => stream,
        Err(failure) => {
            if finish(&state, SessionStatus::Failed) {
                observer.on_error(&failure);
            }
            return;
        }
    };

    {
        let mut state = lock(&state);
        if state.status == SessionStatus::Pending {
            state.status = SessionStatus::Streaming;
        }
    }

    loop {
        let next = match idle_timeout {
            Some(bound) => match tokio::time::timeout(bound, stream.next()).await {
                Ok(item) => item,
                Err(_) => {
                    let failure = StreamFailure::Upstream {
                        status: 0,
                        message: format!("no data received for {:?}", bound),
                    };
                    if finish(&state, SessionStatus::Failed) {
                        observer.on_error(&failure);
                    }
                    return;
                }
            },
            None => stream.next().await,
        };

        // Cancellation is observed here, before any dispatch; cancel()
        // already recorded the terminal status.
        if cancelled.load(Ordering::SeqCst) {
            return;
        }

        match next {
            Some(Ok(StreamFrame::Delta { text })) => {
                lock(&state).text.push_str(&text);
                observer.on_delta(&text);
            }
            Some(Ok(StreamFrame::Done)) => {
                if finish(&state, SessionStatus::Completed) {
                    observer.on_done();
                }
                return;
            }
            Some(Ok(StreamFrame::Error { message })) => {
                let failure = classify_error_frame(&message);
                if finish(&state, SessionStatus::Failed) {
                    observer.on_error(&failure);
                }
                return;
            }
            Some(Err(failure)) => {
                if finish(&state, SessionStatus::Failed) {
                    observer.on_error(&failure);
                }
                return;
            }
            // A clean close without the terminal sentinel still counts
            // as completion; everything streamed has been delivered.
            None => {
                if finish(&state, SessionStatus::Completed) {
                    observer.on_done();
                }
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        MockTransport, ObservedEvent, RecordingObserver, ScriptedResponse,
    };
    use crate::config::GatewayConfig;
    use crate::models::LessonKind;
    use crate::traits::TransportError;
    use std::time::Duration;

    fn test_client(transport: MockTransport) -> Arc<GatewayClient> {
        let config = GatewayConfig::default()
            .with_base_url("http://gateway.test")
            .with_idle_timeout(Some(Duration::from_millis(200)));
        Arc::new(GatewayClient::with_transport(config, Arc::new(transport)))
    }

    fn delta_chunk(text: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n\n",
            text
        )
    }

    #[tokio::test]
    async fn test_open_rejects_empty_topic() {
        let client = test_client(MockTransport::new());
        let observer = RecordingObserver::new();

        let result = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "  "),
            observer.clone(),
        );

        assert!(matches!(result, Err(RequestError::EmptyTopic)));
        assert!(observer.events().is_empty());
    }

    #[tokio::test]
    async fn test_deltas_then_done_in_order() {
        let body = format!("{}{}data: [DONE]\n\n", delta_chunk("Hello"), delta_chunk(" world"));
        let client = test_client(MockTransport::with_chunks(&[&body]));
        let observer = RecordingObserver::new();

        let handle = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "greetings"),
            observer.clone(),
        )
        .unwrap();
        let outcome = handle.join().await;

        assert_eq!(
            observer.events(),
            vec![
                ObservedEvent::Delta("Hello".to_string()),
                ObservedEvent::Delta(" world".to_string()),
                ObservedEvent::Done,
            ]
        );
        assert_eq!(outcome.status, SessionStatus::Completed);
        assert_eq!(outcome.text, "Hello world");
    }

    #[tokio::test]
    async fn test_clean_close_without_sentinel_completes() {
        let body = delta_chunk("partial lesson");
        let client = test_client(MockTransport::with_chunks(&[&body]));
        let observer = RecordingObserver::new();

        let handle = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "closure"),
            observer.clone(),
        )
        .unwrap();
        let outcome = handle.join().await;

        assert_eq!(outcome.status, SessionStatus::Completed);
        assert_eq!(observer.terminal_count(), 1);
        assert_eq!(
            observer.events().last(),
            Some(&ObservedEvent::Done)
        );
    }

    #[tokio::test]
    async fn test_error_frame_fails_session() {
        let client = test_client(MockTransport::with_chunks(&[
            "data: {\"error\":\"model overloaded\"}\n\n",
        ]));
        let observer = RecordingObserver::new();

        let handle = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "overload"),
            observer.clone(),
        )
        .unwrap();
        let outcome = handle.join().await;

        assert_eq!(outcome.status, SessionStatus::Failed);
        assert_eq!(
            observer.events(),
            vec![ObservedEvent::Error(StreamFailure::Upstream {
                status: 0,
                message: "model overloaded".to_string()
            })]
        );
    }

    #[tokio::test]
    async fn test_status_failure_surfaces_via_callback() {
        let transport = MockTransport::new();
        transport.enqueue(ScriptedResponse::Error(TransportError::Status {
            status: 402,
            body: r#"{"error":"AI usage limit reached."}"#.to_string(),
        }));
        let client = test_client(transport);
        let observer = RecordingObserver::new();

        let handle = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "quota"),
            observer.clone(),
        )
        .unwrap();
        let outcome = handle.join().await;

        assert_eq!(outcome.status, SessionStatus::Failed);
        assert_eq!(
            observer.events(),
            vec![ObservedEvent::Error(StreamFailure::QuotaExceeded {
                message: "AI usage limit reached.".to_string()
            })]
        );
    }

    #[tokio::test]
    async fn test_mid_stream_failure_after_deltas() {
        let transport = MockTransport::new();
        transport.enqueue(ScriptedResponse::Items(vec![
            Ok(bytes::Bytes::from(delta_chunk("begin"))),
            Err(TransportError::ConnectionFailed("reset by peer".to_string())),
        ]));
        let client = test_client(transport);
        let observer = RecordingObserver::new();

        let handle = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "flaky"),
            observer.clone(),
        )
        .unwrap();
        let outcome = handle.join().await;

        assert_eq!(outcome.status, SessionStatus::Failed);
        assert_eq!(outcome.text, "begin");
        let events = observer.events();
        assert_eq!(events[0], ObservedEvent::Delta("begin".to_string()));
        assert!(matches!(
            events[1],
            ObservedEvent::Error(StreamFailure::Network { .. })
        ));
        assert_eq!(observer.terminal_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_suppresses_callbacks() {
        let transport = MockTransport::new();
        transport.enqueue(ScriptedResponse::Pending);
        let client = test_client(transport);
        let observer = RecordingObserver::new();

        let handle = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "patience"),
            observer.clone(),
        )
        .unwrap();
        handle.cancel();
        assert_eq!(handle.status(), SessionStatus::Cancelled);

        let outcome = handle.join().await;
        assert_eq!(outcome.status, SessionStatus::Cancelled);
        assert!(observer.events().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_after_completion_is_noop() {
        let body = format!("{}data: [DONE]\n\n", delta_chunk("done deal"));
        let client = test_client(MockTransport::with_chunks(&[&body]));
        let observer = RecordingObserver::new();

        let handle = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "idempotent"),
            observer.clone(),
        )
        .unwrap();

        // Let the session run to completion before cancelling.
        while !handle.status().is_terminal() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        handle.cancel();

        let outcome = handle.join().await;
        assert_eq!(outcome.status, SessionStatus::Completed);
        assert_eq!(observer.terminal_count(), 1);
    }

    #[tokio::test]
    async fn test_idle_timeout_fails_session() {
        let transport = MockTransport::new();
        transport.enqueue(ScriptedResponse::Pending);
        let config = GatewayConfig::default()
            .with_base_url("http://gateway.test")
            .with_idle_timeout(Some(Duration::from_millis(50)));
        let client = Arc::new(GatewayClient::with_transport(config, Arc::new(transport)));
        let observer = RecordingObserver::new();

        let handle = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "stalled"),
            observer.clone(),
        )
        .unwrap();
        let outcome = handle.join().await;

        assert_eq!(outcome.status, SessionStatus::Failed);
        assert_eq!(
            observer.events(),
            vec![ObservedEvent::Error(StreamFailure::Upstream {
                status: 0,
                message: "no data received for 50ms".to_string()
            })]
        );
    }

    #[tokio::test]
    async fn test_sessions_have_distinct_ids() {
        let transport = MockTransport::new();
        transport.enqueue(ScriptedResponse::Chunks(vec![]));
        transport.enqueue(ScriptedResponse::Chunks(vec![]));
        let client = test_client(transport);

        let first = StreamHandle::open(
            Arc::clone(&client),
            StreamRequest::new(LessonKind::TextLesson, "one"),
            RecordingObserver::new(),
        )
        .unwrap();
        let second = StreamHandle::open(
            client,
            StreamRequest::new(LessonKind::TextLesson, "two"),
            RecordingObserver::new(),
        )
        .unwrap();

        assert_ne!(first.id(), second.id());
        first.join().await;
        second.join().await;
    }
}
