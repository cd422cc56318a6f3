//! Error types for the crate.

pub mod stream;

pub use stream::{classify_error_frame, classify_status, StreamFailure};
