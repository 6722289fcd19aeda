//! Authentication headers for resource API requests.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest_middleware::RequestBuilder;

use crate::auth::TokenSource;
use crate::error::SbankenError;

/// Name of the header identifying the customer on bank and customer resources.
pub const CUSTOMER_ID_HEADER: &str = "customerId";

/// How the executor authenticates requests to the resource API.
#[derive(Clone, Default)]
pub enum AuthStrategy {
    /// No authentication headers.
    #[default]
    Anonymous,
    /// `Authorization: Bearer <token>` from a token source.
    Bearer(Arc<dyn TokenSource>),
    /// A `customerId` header only.
    CustomerId(String),
    /// Both the bearer token and the `customerId` header.
    BearerWithCustomerId {
        /// Token source for the `Authorization` header
        tokens: Arc<dyn TokenSource>,
        /// Value of the `customerId` header
        customer_id: String,
    },
}

impl AuthStrategy {
    /// Combine an optional token source and customer id into a strategy.
    pub fn from_parts(tokens: Option<Arc<dyn TokenSource>>, customer_id: Option<String>) -> Self {
        match (tokens, customer_id) {
            (Some(tokens), Some(customer_id)) => Self::BearerWithCustomerId {
                tokens,
                customer_id,
            },
            (Some(tokens), None) => Self::Bearer(tokens),
            (None, Some(customer_id)) => Self::CustomerId(customer_id),
            (None, None) => Self::Anonymous,
        }
    }

    /// The customer id sent with each request, if any.
    pub fn customer_id(&self) -> Option<&str> {
        match self {
            Self::CustomerId(customer_id) | Self::BearerWithCustomerId { customer_id, .. } => {
                Some(customer_id)
            }
            _ => None,
        }
    }

    /// Whether requests carry a bearer token.
    pub fn uses_bearer(&self) -> bool {
        matches!(self, Self::Bearer(_) | Self::BearerWithCustomerId { .. })
    }

    /// Attach the authentication headers to `builder`.
    pub(crate) async fn apply(&self, builder: RequestBuilder) -> Result<RequestBuilder, SbankenError> {
        let builder = match self {
            Self::Bearer(tokens) | Self::BearerWithCustomerId { tokens, .. } => {
                let token = tokens.bearer_token().await?;
                builder.header(AUTHORIZATION, token.bearer())
            }
            _ => builder,
        };

        Ok(match self.customer_id() {
            Some(customer_id) => builder.header(CUSTOMER_ID_HEADER, customer_id),
            None => builder,
        })
    }
}

impl std::fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Bearer(_) => f.write_str("Bearer"),
            Self::CustomerId(customer_id) => f.debug_tuple("CustomerId").field(customer_id).finish(),
            Self::BearerWithCustomerId { customer_id, .. } => f
                .debug_struct("BearerWithCustomerId")
                .field("customer_id", customer_id)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AccessToken, StaticToken};
    use time::{Duration, OffsetDateTime};

    fn token_source() -> Arc<dyn TokenSource> {
        Arc::new(StaticToken::new(AccessToken::new(
            "abc",
            "Bearer",
            OffsetDateTime::now_utc() + Duration::hours(1),
        )))
    }

    #[test]
    fn test_from_parts() {
        assert!(matches!(AuthStrategy::from_parts(None, None), AuthStrategy::Anonymous));
        assert!(matches!(
            AuthStrategy::from_parts(Some(token_source()), None),
            AuthStrategy::Bearer(_)
        ));

        let strategy = AuthStrategy::from_parts(Some(token_source()), Some("42".to_string()));
        assert!(strategy.uses_bearer());
        assert_eq!(strategy.customer_id(), Some("42"));

        let strategy = AuthStrategy::from_parts(None, Some("42".to_string()));
        assert!(!strategy.uses_bearer());
        assert_eq!(strategy.customer_id(), Some("42"));
    }
}
