//! File-based client configuration.
//!
//! ```json
//! {
//!     "clientId": "...",
//!     "clientSecret": "...",
//!     "customerId": "12345678901"
//! }
//! ```
//!
//! Endpoint URLs and the identity server fall back to the public Sbanken
//! addresses when omitted.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::client::endpoints;

/// Errors raised while loading a [`Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The contents are not valid configuration JSON
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field is empty
    #[error("missing config value: {0}")]
    Missing(&'static str),
}

/// Client configuration as stored on disk.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// OAuth client id
    pub client_id: String,
    #[serde(deserialize_with = "deserialize_secret")]
    client_secret: SecretString,
    /// Token endpoint of the identity server
    #[serde(default = "default_identity_server")]
    pub identity_server: String,
    /// Customer id (national identity number) sent as the `customerId` header
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Base URL of the accounts resource
    #[serde(default = "default_accounts_endpoint")]
    pub accounts_endpoint: String,
    /// Base URL of the transactions resource
    #[serde(default = "default_transactions_endpoint")]
    pub transactions_endpoint: String,
    /// Base URL of the transfers resource
    #[serde(default = "default_transfers_endpoint")]
    pub transfers_endpoint: String,
    /// Base URL of the customers resource
    #[serde(default = "default_customers_endpoint")]
    pub customers_endpoint: String,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn default_identity_server() -> String {
    endpoints::IDENTITY_SERVER_URL.to_string()
}

fn default_accounts_endpoint() -> String {
    endpoints::ACCOUNTS_URL.to_string()
}

fn default_transactions_endpoint() -> String {
    endpoints::TRANSACTIONS_URL.to_string()
}

fn default_transfers_endpoint() -> String {
    endpoints::TRANSFERS_URL.to_string()
}

fn default_customers_endpoint() -> String {
    endpoints::CUSTOMERS_URL.to_string()
}

impl Config {
    /// Create a configuration with default endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            identity_server: default_identity_server(),
            customer_id: None,
            accounts_endpoint: default_accounts_endpoint(),
            transactions_endpoint: default_transactions_endpoint(),
            transfers_endpoint: default_transfers_endpoint(),
            customers_endpoint: default_customers_endpoint(),
        }
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the customer id.
    pub fn with_customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Get the client secret.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_client_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::Missing("clientId"));
        }
        if self.client_secret.expose_secret().trim().is_empty() {
            return Err(ConfigError::Missing("clientSecret"));
        }
        if self.identity_server.trim().is_empty() {
            return Err(ConfigError::Missing("identityServer"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("identity_server", &self.identity_server)
            .field("customer_id", &self.customer_id)
            .field("accounts_endpoint", &self.accounts_endpoint)
            .field("transactions_endpoint", &self.transactions_endpoint)
            .field("transfers_endpoint", &self.transfers_endpoint)
            .field("customers_endpoint", &self.customers_endpoint)
            .finish()
    }
}
