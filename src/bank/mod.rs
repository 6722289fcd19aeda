//! Banking resources: accounts, customers, transactions and transfers.
//!
//! Each operation is an inherent method on [`SbankenClient`](crate::client::SbankenClient)
//! and converts a flagged response envelope into
//! [`SbankenError::Api`](crate::error::SbankenError::Api).
//!
//! # Trait-based API
//!
//! The [`SbankenApi`] trait abstracts the same operations, enabling mock
//! implementations in tests of code that consumes the client.

mod accounts;
mod customers;
mod traits;
mod transactions;
mod transfers;

pub use accounts::Account;
pub use customers::{Address, Customer, PhoneNumber};
pub use traits::SbankenApi;
pub use transactions::{CardDetails, Transaction, Transactions, TransactionsRequest};
pub use transfers::TransferRequest;
