//! Adapter implementations of the trait seams.
//!
//! Production adapters wrap real I/O (reqwest, the file system); the
//! [`mock`] module holds the test doubles.

pub mod json_store;
pub mod mock;
pub mod reqwest_transport;

pub use json_store::JsonFileStore;
pub use reqwest_transport::ReqwestTransport;
