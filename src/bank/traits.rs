//! Trait definition for the Sbanken banking operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use sbanken_api_client::bank::SbankenApi;
//!
//! async fn total_available<C: SbankenApi>(client: &C) -> Result<rust_decimal::Decimal, sbanken_api_client::SbankenError> {
//!     let accounts = client.get_accounts().await?;
//!     Ok(accounts.iter().map(|a| a.available).sum())
//! }
//! ```

use std::future::Future;

use crate::bank::{Account, Customer, Transactions, TransactionsRequest, TransferRequest};
use crate::client::SbankenClient;
use crate::error::SbankenError;

/// Trait defining all Sbanken banking operations.
///
/// All methods are async and return `Result<T, SbankenError>`.
pub trait SbankenApi: Send + Sync {
    /// List all accounts of the customer.
    fn get_accounts(&self) -> impl Future<Output = Result<Vec<Account>, SbankenError>> + Send;

    /// Get a single account by id.
    fn get_account(
        &self,
        account_id: &str,
    ) -> impl Future<Output = Result<Account, SbankenError>> + Send;

    /// Get the customer profile.
    fn get_customer(&self) -> impl Future<Output = Result<Customer, SbankenError>> + Send;

    /// List transactions on an account.
    fn get_transactions(
        &self,
        account_id: &str,
        request: &TransactionsRequest,
    ) -> impl Future<Output = Result<Transactions, SbankenError>> + Send;

    /// Transfer money between two of the customer's accounts.
    fn transfer(
        &self,
        request: &TransferRequest,
    ) -> impl Future<Output = Result<(), SbankenError>> + Send;
}

impl SbankenApi for SbankenClient {
    async fn get_accounts(&self) -> Result<Vec<Account>, SbankenError> {
        SbankenClient::get_accounts(self).await
    }

    async fn get_account(&self, account_id: &str) -> Result<Account, SbankenError> {
        SbankenClient::get_account(self, account_id).await
    }

    async fn get_customer(&self) -> Result<Customer, SbankenError> {
        SbankenClient::get_customer(self).await
    }

    async fn get_transactions(
        &self,
        account_id: &str,
        request: &TransactionsRequest,
    ) -> Result<Transactions, SbankenError> {
        SbankenClient::get_transactions(self, account_id, request).await
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<(), SbankenError> {
        SbankenClient::transfer(self, request).await
    }
}
