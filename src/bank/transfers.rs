//! Transfers between the customer's own accounts.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::client::SbankenClient;
use crate::error::SbankenError;
use crate::types::Envelope;

/// Request to move money between two of the customer's accounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Account id to debit
    pub from_account_id: String,
    /// Account id to credit
    pub to_account_id: String,
    /// Amount to move; must be positive
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Message shown on both accounts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TransferRequest {
    /// Create a transfer request without a message.
    pub fn new(
        from_account_id: impl Into<String>,
        to_account_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            from_account_id: from_account_id.into(),
            to_account_id: to_account_id.into(),
            amount,
            message: None,
        }
    }

    /// Set the message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn validate(&self) -> Result<(), SbankenError> {
        if self.amount <= Decimal::ZERO {
            return Err(SbankenError::InvalidRequest(format!(
                "transfer amount must be positive, got {}",
                self.amount
            )));
        }
        if self.from_account_id == self.to_account_id {
            return Err(SbankenError::InvalidRequest(
                "cannot transfer to the same account".to_string(),
            ));
        }
        Ok(())
    }
}

impl SbankenClient {
    /// Transfer money between two of the customer's accounts.
    ///
    /// A rejected transfer (for example for insufficient funds) is returned as
    /// [`SbankenError::Api`] carrying the API's message.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<(), SbankenError> {
        request.validate()?;
        let envelope: Envelope = self
            .post(&self.endpoints().transfers, None, request)
            .await?;
        envelope.check()
    }
}
