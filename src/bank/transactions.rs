//! Transactions resource.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::{Date, OffsetDateTime};

use crate::client::{QueryParams, SbankenClient, join_path};
use crate::error::SbankenError;
use crate::types::ItemsResponse;
use crate::types::serde_helpers::{amount, bank_datetime, empty_string_as_none};

/// Filter for [`SbankenClient::get_transactions`].
///
/// `index` and `length` select a window of the result set; the client does not
/// follow further pages on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionsRequest {
    /// Earliest accounting date
    pub start_date: Option<Date>,
    /// Latest accounting date
    pub end_date: Option<Date>,
    /// Offset of the first returned transaction
    pub index: Option<u32>,
    /// Maximum number of returned transactions
    pub length: Option<u32>,
}

impl TransactionsRequest {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the date range.
    pub fn between(mut self, start: Date, end: Date) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Set the result window.
    pub fn window(mut self, index: u32, length: u32) -> Self {
        self.index = Some(index);
        self.length = Some(length);
        self
    }

    /// Encode as query parameters. Dates are formatted as `YYYY-MM-DD`.
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(start) = self.start_date {
            query.insert("startDate".to_string(), start.to_string());
        }
        if let Some(end) = self.end_date {
            query.insert("endDate".to_string(), end.to_string());
        }
        if let Some(index) = self.index {
            query.insert("index".to_string(), index.to_string());
        }
        if let Some(length) = self.length {
            query.insert("length".to_string(), length.to_string());
        }
        query
    }
}

/// One page of transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transactions {
    /// Total number of transactions matching the filter
    pub available_items: u64,
    /// Transactions in this window
    pub items: Vec<Transaction>,
}

/// A booked or reserved transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Accounting date
    #[serde(default, deserialize_with = "bank_datetime::deserialize")]
    pub accounting_date: Option<OffsetDateTime>,
    /// Interest date
    #[serde(default, deserialize_with = "bank_datetime::deserialize")]
    pub interest_date: Option<OffsetDateTime>,
    /// Counterparty account number, when known
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub other_account_number: Option<String>,
    /// Signed amount; negative for debits
    #[serde(deserialize_with = "amount::deserialize")]
    pub amount: Decimal,
    /// Free text from the bank statement
    #[serde(default)]
    pub text: String,
    /// Transaction type, e.g. `VISA VARE`
    #[serde(default)]
    pub transaction_type: String,
    /// Numeric transaction type code
    #[serde(default)]
    pub transaction_type_code: i64,
    /// Human-readable transaction type
    #[serde(default)]
    pub transaction_type_text: String,
    /// Whether the amount is reserved but not yet booked
    #[serde(default)]
    pub is_reservation: bool,
    /// Origin of the transaction, e.g. `AccountStatement`
    #[serde(default)]
    pub source: String,
    /// Card details for card transactions
    #[serde(default)]
    pub card_details: Option<CardDetails>,
}

/// Card information attached to a card transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Masked card number
    #[serde(default)]
    pub card_number: String,
    /// Amount in the purchase currency
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub currency_amount: Decimal,
    /// Currency exchange rate
    #[serde(default, deserialize_with = "amount::deserialize")]
    pub currency_rate: Decimal,
    /// Purchase currency
    #[serde(default)]
    pub currency_code: String,
    /// Merchant name
    #[serde(default)]
    pub merchant_name: String,
    /// Merchant city
    #[serde(default)]
    pub merchant_city: String,
    /// Purchase date
    #[serde(default, deserialize_with = "bank_datetime::deserialize")]
    pub purchase_date: Option<OffsetDateTime>,
}

impl SbankenClient {
    /// List transactions on an account.
    pub async fn get_transactions(
        &self,
        account_id: &str,
        request: &TransactionsRequest,
    ) -> Result<Transactions, SbankenError> {
        let url = join_path(&self.endpoints().transactions, &[account_id])?;
        let query = request.to_query();
        let response: ItemsResponse<Transaction> = self.get(&url, Some(&query)).await?;

        let available_items = response.available_items;
        let items = response.into_result()?;
        Ok(Transactions {
            available_items: available_items.unwrap_or(items.len() as u64),
            items,
        })
    }
}
