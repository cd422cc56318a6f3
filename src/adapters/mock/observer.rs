//! Recording observer for testing.

use std::sync::{Arc, Mutex};

use crate::error::StreamFailure;
use crate::traits::StreamObserver;

/// One callback delivery, as seen by a [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    Delta(String),
    Done,
    Error(StreamFailure),
}

impl ObservedEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ObservedEvent::Done | ObservedEvent::Error(_))
    }
}

/// Observer that records every callback for later assertions.
///
/// Clones share the same event log, so a test can keep one handle while
/// the session owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObservedEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in order.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// All delta fragments concatenated in delivery order.
    pub fn joined_deltas(&self) -> String {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::Delta(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of terminal callbacks delivered. A correct session
    /// delivers exactly one.
    pub fn terminal_count(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.is_terminal())
            .count()
    }
}

impl StreamObserver for RecordingObserver {
    fn on_delta(&mut self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(ObservedEvent::Delta(text.to_string()));
    }

    fn on_done(&mut self) {
        self.events.lock().unwrap().push(ObservedEvent::Done);
    }

    fn on_error(&mut self, failure: &StreamFailure) {
        self.events
            .lock()
            .unwrap()
            .push(ObservedEvent::Error(failure.clone()));
    }
}
