//! Authentication module for the Sbanken API.
//!
//! This module provides:
//! - Client credential management with secure secret storage
//! - HTTP Basic authorization for the identity server
//! - A cached client-credentials token with expiry-based refresh

mod basic;
mod credentials;
mod provider;
mod token;

pub use basic::basic_authorization;
pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use provider::{DEFAULT_EXPIRY_LEEWAY, StaticToken, TokenProvider, TokenSource};
pub use token::{AccessToken, TokenResponse};
