//! Common types used across the Sbanken client library.

pub mod envelope;
pub mod serde_helpers;

pub use envelope::{Envelope, ItemResponse, ItemsResponse, decode_json};
