//! Access token types for the client-credentials grant.

use serde::Deserialize;
use time::{Duration, OffsetDateTime};

use crate::error::SbankenError;

/// A bearer token issued by the identity server.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// The opaque token string sent in the `Authorization` header
    pub token: String,
    /// Token type reported by the identity server, usually `Bearer`
    pub token_type: String,
    /// Instant after which the token must not be used
    pub valid_to: OffsetDateTime,
}

impl AccessToken {
    /// Create a token that expires at `valid_to`.
    pub fn new(
        token: impl Into<String>,
        token_type: impl Into<String>,
        valid_to: OffsetDateTime,
    ) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
            valid_to,
        }
    }

    /// Check whether the token expires within `leeway` of `now`.
    pub fn expires_within(&self, now: OffsetDateTime, leeway: Duration) -> bool {
        now + leeway >= self.valid_to
    }

    /// Value for the resource API `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("valid_to", &self.valid_to)
            .finish()
    }
}

/// Identity server response to a client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The issued token
    pub access_token: String,
    /// Token type, e.g. `Bearer`
    pub token_type: String,
    /// Lifetime of the token in seconds
    pub expires_in: i64,
}

impl TokenResponse {
    /// Convert into an [`AccessToken`] valid for `expires_in` seconds after `requested_at`.
    pub fn into_access_token(self, requested_at: OffsetDateTime) -> Result<AccessToken, SbankenError> {
        if self.access_token.is_empty() {
            return Err(SbankenError::Auth(
                "identity server returned an empty access_token".to_string(),
            ));
        }
        if self.expires_in < 0 {
            return Err(SbankenError::Auth(format!(
                "identity server returned a negative expires_in: {}",
                self.expires_in
            )));
        }

        let valid_to = requested_at
            .checked_add(Duration::seconds(self.expires_in))
            .ok_or_else(|| {
                SbankenError::Auth(format!(
                    "identity server returned an out-of-range expires_in: {}",
                    self.expires_in
                ))
            })?;

        Ok(AccessToken {
            token: self.access_token,
            token_type: self.token_type,
            valid_to,
        })
    }
}
