//! Event-stream wire handling: frame decoding and payload interpretation.

pub mod decoder;
pub mod frames;
pub mod payloads;

pub use decoder::{interpret, FrameDecoder, FrameOverflow};
pub use frames::StreamFrame;
