//! Incremental frame decoding for event streams.
//!
//! [`FrameDecoder`] accumulates raw transport bytes and yields complete
//! frames as their blank-line terminators arrive. Chunks may split a frame
//! anywhere, including mid-character, so the carry buffer is kept as bytes
//! and only complete frame blocks are decoded to text. [`interpret`] turns
//! one frame's data payload into a [`StreamFrame`], dropping heartbeats and
//! unparseable payloads on the floor.

use tracing::trace;

use crate::sse::frames::StreamFrame;
use crate::sse::payloads::ChunkPayload;

/// Upper bound on bytes buffered for a single unterminated frame.
const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Sentinel payload marking the end of a completion stream.
const DONE_SENTINEL: &str = "[DONE]";

/// A single frame grew past [`MAX_FRAME_BYTES`] without a terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameOverflow {
    pub buffered: usize,
}

impl std::fmt::Display for FrameOverflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frame exceeded {} bytes without a terminator ({} buffered)",
            MAX_FRAME_BYTES, self.buffered
        )
    }
}

impl std::error::Error for FrameOverflow {}

/// Stateful decoder that reassembles frames from arbitrary byte chunks.
///
/// Frames are delimited by a blank line, either `\n\n` or `\r\n\r\n`.
/// Within a frame block, `data:` lines are collected (multiple lines join
/// with `\n`), while comment lines (`:`) and unknown fields are ignored.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one transport chunk and returns the data payloads of every
    /// frame completed by it, in arrival order.
    ///
    /// Bytes after the last terminator stay buffered for the next call, so
    /// a frame split across any number of chunks decodes identically to the
    /// unsplit body.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<String>, FrameOverflow> {
        let mut frames = Vec::new();
        if chunk.is_empty() && self.buffer.is_empty() {
            return Ok(frames);
        }
        self.buffer.extend_from_slice(chunk);

        while let Some((at, terminator_len)) = find_boundary(&self.buffer) {
            let block: Vec<u8> = self.buffer.drain(..at + terminator_len).collect();
            if let Some(data) = assemble_data(&block[..at]) {
                frames.push(data);
            }
        }

        if self.buffer.len() > MAX_FRAME_BYTES {
            let buffered = self.buffer.len();
            self.buffer.clear();
            return Err(FrameOverflow { buffered });
        }
        Ok(frames)
    }

    /// True when the buffer holds an unterminated frame.
    ///
    /// Consulted at transport close: a non-empty carry at that point is an
    /// interrupted response and is discarded, not emitted.
    pub fn has_partial(&self) -> bool {
        !self.buffer.iter().all(|b| b.is_ascii_whitespace())
    }
}

/// Locates the earliest frame terminator, returning its offset and length.
fn find_boundary(buf: &[u8]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    if let Some(at) = find_subslice(buf, b"\n\n") {
        best = Some((at, 2));
    }
    if let Some(at) = find_subslice(buf, b"\r\n\r\n") {
        if best.map_or(true, |(prev, _)| at < prev) {
            best = Some((at, 4));
        }
    }
    best
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Collects the `data:` lines of one frame block into a single payload.
///
/// Returns `None` for blocks with no data content (comments, unknown
/// fields, whitespace), which therefore produce no frame at all.
fn assemble_data(block: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(block);
    let mut data: Option<String> = None;
    for line in text.split('\n') {
        let line = line.trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix("data:") {
            let fragment = rest.strip_prefix(' ').unwrap_or(rest);
            match data.as_mut() {
                Some(existing) => {
                    existing.push('\n');
                    existing.push_str(fragment);
                }
                None => data = Some(fragment.to_string()),
            }
        }
    }
    data.filter(|payload| !payload.trim().is_empty())
}

/// Interprets one frame's data payload.
///
/// The terminal sentinel maps to [`StreamFrame::Done`]; an embedded error
/// member wins over any delta in the same chunk; a non-empty delta maps to
/// [`StreamFrame::Delta`]. Anything else, including payloads that fail to
/// parse as JSON, yields `None` rather than an error.
pub fn interpret(data: &str) -> Option<StreamFrame> {
    let data = data.trim();
    if data.is_empty() {
        return None;
    }
    if data == DONE_SENTINEL {
        return Some(StreamFrame::Done);
    }
    let payload: ChunkPayload = match serde_json::from_str(data) {
        Ok(payload) => payload,
        Err(err) => {
            trace!(error = %err, "ignoring unparseable frame payload");
            return None;
        }
    };
    if let Some(message) = payload.error_message() {
        return Some(StreamFrame::Error {
            message: message.to_string(),
        });
    }
    match payload.delta_text() {
        Some(text) if !text.is_empty() => Some(StreamFrame::Delta {
            text: text.to_string(),
        }),
        _ => None,
    }
}
