//! Trait seams for dependency injection.
//!
//! Production adapters live in [`crate::adapters`]; tests swap in the
//! mock implementations from [`crate::adapters::mock`].

pub mod observer;
pub mod store;
pub mod transport;

pub use observer::StreamObserver;
pub use store::{ProgressStore, StoreError};
pub use transport::{ByteStream, Headers, Transport, TransportError};
