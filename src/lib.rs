//! # Sbanken Client
//!
//! An async Rust client library for the Sbanken banking REST API.
//!
//! ## Features
//!
//! - Client-credentials OAuth token cache with expiry-based refresh
//! - Generic request executor with JSON and raw byte responses
//! - Accounts, customers, transactions and transfers
//! - Strong typing for all request/response types
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sbanken_api_client::client::SbankenClient;
//! use sbanken_api_client::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("sbanken.json")?;
//!     let client = SbankenClient::from_config(&config).await?;
//!     let accounts = client.get_accounts().await?;
//!     println!("Accounts: {:?}", accounts);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod bank;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use client::SbankenClient;
pub use config::Config;
pub use error::SbankenError;

/// Result type alias using SbankenError
pub type Result<T> = std::result::Result<T, SbankenError>;
