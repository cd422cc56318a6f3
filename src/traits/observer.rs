//! Callback contract for stream consumers.

use crate::error::StreamFailure;

/// Receives the events of one stream session, in decode order.
///
/// A session delivers zero or more `on_delta` calls followed by exactly
/// one of `on_done` or `on_error`. Nothing is delivered after the
/// terminal call, and nothing at all after cancellation is observed.
pub trait StreamObserver: Send {
    /// One incremental text fragment.
    fn on_delta(&mut self, text: &str);

    /// The stream finished cleanly.
    fn on_done(&mut self);

    /// The stream failed; `failure` is already classified.
    fn on_error(&mut self, failure: &StreamFailure);
}
