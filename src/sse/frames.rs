//! Interpreted frame types for the lesson stream.
//!
//! A [`StreamFrame`] is the output of the SSE pipeline: raw transport bytes
//! are decoded into frames, and each frame resolves to an incremental text
//! delta, the terminal marker, or an upstream error.

/// One interpreted unit of a streaming completion.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    /// An incremental text fragment of the completion.
    Delta { text: String },
    /// The upstream finished the completion cleanly.
    Done,
    /// The upstream embedded an error object mid-stream.
    Error { message: String },
}

impl StreamFrame {
    /// Whether this frame ends the session (no further frames are expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamFrame::Done | StreamFrame::Error { .. })
    }

    /// The delta text carried by this frame, if any.
    pub fn delta_text(&self) -> Option<&str> {
        match self {
            StreamFrame::Delta { text } => Some(text),
            _ => None,
        }
    }
}
