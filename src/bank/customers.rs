//! Customers resource.

use serde::Deserialize;
use time::OffsetDateTime;

use crate::client::SbankenClient;
use crate::error::SbankenError;
use crate::types::ItemResponse;
use crate::types::serde_helpers::{bank_datetime, empty_string_as_none};

/// Customer profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer id (national identity number)
    pub customer_id: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Last name
    #[serde(default)]
    pub last_name: String,
    /// E-mail address
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub email_address: Option<String>,
    /// Date of birth
    #[serde(default, deserialize_with = "bank_datetime::deserialize")]
    pub date_of_birth: Option<OffsetDateTime>,
    /// Postal address
    #[serde(default)]
    pub postal_address: Option<Address>,
    /// Street address
    #[serde(default)]
    pub street_address: Option<Address>,
    /// Registered phone numbers
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
}

/// A postal or street address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Address line 1
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub address_line1: Option<String>,
    /// Address line 2
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub address_line2: Option<String>,
    /// Address line 3
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub address_line3: Option<String>,
    /// Address line 4
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub address_line4: Option<String>,
    /// Country
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub country: Option<String>,
    /// Postal code
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub zip_code: Option<String>,
    /// City
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub city: Option<String>,
}

/// A phone number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    /// Country calling code, e.g. `47`
    #[serde(default)]
    pub country_code: String,
    /// Subscriber number
    pub number: String,
}

impl SbankenClient {
    /// Get the profile of the customer identified by the auth strategy.
    pub async fn get_customer(&self) -> Result<Customer, SbankenError> {
        let response: ItemResponse<Customer> =
            self.get(&self.endpoints().customers, None).await?;
        response.into_result()
    }
}
