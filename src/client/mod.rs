//! Sbanken REST API request executor.
//!
//! [`SbankenClient`] turns an [`ApiRequest`] into an authenticated HTTP call
//! and decodes the response, either as JSON into a caller-chosen type or as a
//! raw byte stream.

#[allow(clippy::module_inception)]
mod client;
pub mod endpoints;
mod request;
mod strategy;

pub(crate) use client::build_http_client;
pub use client::{SbankenClient, SbankenClientBuilder};
pub use endpoints::Endpoints;
pub use request::{ApiRequest, QueryParams};
pub(crate) use request::join_path;
pub use strategy::{AuthStrategy, CUSTOMER_ID_HEADER};
