//! Core of a QR-driven worksite tracker: interpretation of scanned QR
//! payloads, worker check-in/check-out with tardiness and overtime pay,
//! Thursday-to-Wednesday weekly reporting, and equipment loan tracking.
//!
//! The crate is pure and storage-agnostic: callers inject a store
//! implementing the repository traits in [`store`] and pass wall-clock
//! times in explicitly. Camera decoding, transport, and durability belong
//! to the surrounding application.

pub mod config;
pub mod error;
pub mod model;
pub mod qr;
pub mod service;
pub mod store;

pub use config::PolicyConfig;
pub use error::{Error, Result};
