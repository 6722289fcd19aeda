//! Accounts resource.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::client::{SbankenClient, join_path};
use crate::error::SbankenError;
use crate::types::serde_helpers::amount;
use crate::types::{ItemResponse, ItemsResponse};

/// A bank account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Opaque account id used in other API calls
    #[serde(default)]
    pub account_id: String,
    /// The 11-digit account number
    pub account_number: String,
    /// Customer that owns the account
    #[serde(default)]
    pub owner_customer_id: String,
    /// Display name
    pub name: String,
    /// Account type, e.g. `Standard account`
    #[serde(default)]
    pub account_type: String,
    /// Amount available for withdrawal
    #[serde(deserialize_with = "amount::deserialize")]
    pub available: Decimal,
    /// Booked balance
    #[serde(deserialize_with = "amount::deserialize")]
    pub balance: Decimal,
    /// Credit limit
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub credit_limit: Decimal,
    /// Whether this is the customer's default account
    #[serde(default)]
    pub default_account: bool,
}

impl SbankenClient {
    /// List all accounts of the customer.
    pub async fn get_accounts(&self) -> Result<Vec<Account>, SbankenError> {
        let response: ItemsResponse<Account> =
            self.get(&self.endpoints().accounts, None).await?;
        response.into_result()
    }

    /// Get a single account by id.
    pub async fn get_account(&self, account_id: &str) -> Result<Account, SbankenError> {
        let url = join_path(&self.endpoints().accounts, &[account_id])?;
        let response: ItemResponse<Account> = self.get(&url, None).await?;
        response.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_account() {
        let json = r#"{
            "accountId": "ABC123",
            "accountNumber": "97100000000",
            "ownerCustomerId": "12345678901",
            "name": "Brukskonto",
            "accountType": "Standard account",
            "available": 1500.25,
            "balance": 1600,
            "creditLimit": 0.0
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_id, "ABC123");
        assert_eq!(account.available, Decimal::new(150025, 2));
        assert_eq!(account.balance, Decimal::from(1600));
        assert!(!account.default_account);
    }
}
