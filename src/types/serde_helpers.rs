//! Custom serde helpers for the Sbanken wire format.
//!
//! Amounts arrive as JSON numbers and timestamps arrive either with or
//! without a UTC offset, so the payload types use these helpers instead of
//! the default representations.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Deserialize a monetary amount from a JSON number or numeric string.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use serde::Deserialize;
/// use sbanken_api_client::types::serde_helpers::amount;
///
/// #[derive(Deserialize)]
/// struct Balance {
///     #[serde(deserialize_with = "amount::deserialize")]
///     available: Decimal,
/// }
///
/// let balance: Balance = serde_json::from_str(r#"{"available": 1234.5}"#).unwrap();
/// assert_eq!(balance.available, Decimal::new(12345, 1));
/// ```
pub mod amount {
    use super::*;

    /// Deserialize a number or numeric string into a `Decimal`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AmountVisitor;

        impl<'de> de::Visitor<'de> for AmountVisitor {
            type Value = Decimal;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or numeric string")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Decimal::from(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Decimal::from(v))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Decimal::try_from(v).map_err(de::Error::custom)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Deserialize an optional timestamp.
///
/// Accepts RFC 3339 (`2024-01-31T00:00:00+01:00`) and offset-less
/// (`2024-01-31T00:00:00`, read as UTC) forms. `null` and `""` become `None`.
pub mod bank_datetime {
    use super::*;

    /// Deserialize an optional timestamp.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) if !s.is_empty() => parse(&s).map(Some).map_err(de::Error::custom),
            _ => Ok(None),
        }
    }

    /// Parse a timestamp in either accepted form.
    pub fn parse(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(s, &Rfc3339).or_else(|_| {
            let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
            PrimitiveDateTime::parse(s, naive).map(PrimitiveDateTime::assume_utc)
        })
    }
}

/// Helper for empty strings that should be deserialized as None.
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}
