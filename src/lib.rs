//! learnforge - streaming AI lesson client
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod prelude;
pub mod progress;
pub mod quiz;
pub mod session;
pub mod sse;
pub mod traits;
