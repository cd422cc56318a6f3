//! Mock implementations for testing.
//!
//! These implement the trait seams from [`crate::traits`] without any
//! network or file system access, so stream and ledger behavior can be
//! exercised deterministically.
//!
//! - [`MockTransport`] - transport replaying scripted responses
//! - [`RecordingObserver`] - observer capturing every callback
//! - [`InMemoryStore`] - progression store held in memory

pub mod observer;
pub mod store;
pub mod transport;

pub use observer::{ObservedEvent, RecordingObserver};
pub use store::InMemoryStore;
pub use transport::{MockTransport, RecordedRequest, ScriptedResponse};
