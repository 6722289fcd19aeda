//! Sbanken API endpoint constants.

/// Token endpoint of the Sbanken identity server.
pub const IDENTITY_SERVER_URL: &str = "https://auth.sbanken.no/identityserver/connect/token";

/// Accounts resource.
pub const ACCOUNTS_URL: &str = "https://api.sbanken.no/exec.bank/api/v1/Accounts";
/// Transactions resource.
pub const TRANSACTIONS_URL: &str = "https://api.sbanken.no/exec.bank/api/v1/Transactions";
/// Transfers resource.
pub const TRANSFERS_URL: &str = "https://api.sbanken.no/exec.bank/api/v1/Transfers";
/// Customers resource.
pub const CUSTOMERS_URL: &str = "https://api.sbanken.no/exec.customers/api/v1/Customers";

/// Base URLs for each resource family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Accounts resource base URL
    pub accounts: String,
    /// Transactions resource base URL
    pub transactions: String,
    /// Transfers resource base URL
    pub transfers: String,
    /// Customers resource base URL
    pub customers: String,
}

impl Endpoints {
    /// Point every resource at `base_url` using the public path layout.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            accounts: format!("{}/exec.bank/api/v1/Accounts", base),
            transactions: format!("{}/exec.bank/api/v1/Transactions", base),
            transfers: format!("{}/exec.bank/api/v1/Transfers", base),
            customers: format!("{}/exec.customers/api/v1/Customers", base),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            accounts: ACCOUNTS_URL.to_string(),
            transactions: TRANSACTIONS_URL.to_string(),
            transfers: TRANSFERS_URL.to_string(),
            customers: CUSTOMERS_URL.to_string(),
        }
    }
}

impl From<&crate::config::Config> for Endpoints {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            accounts: config.accounts_endpoint.clone(),
            transactions: config.transactions_endpoint.clone(),
            transfers: config.transfers_endpoint.clone(),
            customers: config.customers_endpoint.clone(),
        }
    }
}
