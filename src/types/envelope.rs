//! The error-carrying envelope shared by every Sbanken response.
//!
//! ```json
//! {
//!     "availableItems": 1,
//!     "items": [ ... ],
//!     "errorType": null,
//!     "isError": false,
//!     "errorMessage": null,
//!     "traceId": null
//! }
//! ```

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, SbankenError};

const UNKNOWN_API_ERROR: &str = "unknown API error";

/// Error fields present on every response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Set when the API rejected the request
    #[serde(default)]
    pub is_error: bool,
    /// Human-readable error message
    #[serde(default)]
    pub error_message: Option<String>,
    /// Error category, when reported
    #[serde(default)]
    pub error_type: Option<String>,
    /// Numeric error code, when reported
    #[serde(default)]
    pub error_code: Option<i64>,
    /// Trace id for support requests
    #[serde(default)]
    pub trace_id: Option<String>,
}

impl Envelope {
    /// Convert a flagged envelope into [`SbankenError::Api`].
    pub fn check(&self) -> Result<(), SbankenError> {
        if !self.is_error {
            return Ok(());
        }

        let message = self
            .error_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(UNKNOWN_API_ERROR);

        Err(SbankenError::Api(ApiError {
            message: message.to_string(),
            error_type: self.error_type.clone(),
            code: self.error_code,
            trace_id: self.trace_id.clone(),
        }))
    }
}

/// Response carrying a single `item`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct ItemResponse<T> {
    /// The payload; ignored when the envelope is flagged
    #[serde(default = "Option::default")]
    pub item: Option<T>,
    /// Error fields
    #[serde(flatten)]
    pub envelope: Envelope,
}

impl<T> Default for ItemResponse<T> {
    fn default() -> Self {
        Self {
            item: None,
            envelope: Envelope::default(),
        }
    }
}

impl<T> ItemResponse<T> {
    /// Return the item, or the envelope's error.
    pub fn into_result(self) -> Result<T, SbankenError> {
        self.envelope.check()?;
        self.item.ok_or_else(|| {
            SbankenError::InvalidResponse("Response missing 'item' field".to_string())
        })
    }
}

/// Response carrying a list of `items`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: DeserializeOwned"))]
pub struct ItemsResponse<T> {
    /// Total number of items available on the server
    #[serde(default)]
    pub available_items: Option<u64>,
    /// The payload; ignored when the envelope is flagged
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Error fields
    #[serde(flatten)]
    pub envelope: Envelope,
}

impl<T> Default for ItemsResponse<T> {
    fn default() -> Self {
        Self {
            available_items: None,
            items: Vec::new(),
            envelope: Envelope::default(),
        }
    }
}

impl<T> ItemsResponse<T> {
    /// Return the items, or the envelope's error.
    pub fn into_result(self) -> Result<Vec<T>, SbankenError> {
        self.envelope.check()?;
        Ok(self.items)
    }
}

/// Decode a JSON body, treating an empty body as `T::default()`.
pub fn decode_json<T>(body: &[u8]) -> Result<T, SbankenError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}
