//! HTTP Basic authorization for the identity server.
//!
//! The client-credentials grant authenticates the application with:
//! ```text
//! Authorization: Basic base64(client_id + ":" + client_secret)
//! ```

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::auth::Credentials;

/// Build the `Authorization` header value for a client-credentials grant.
///
/// # Example
///
/// ```rust
/// use sbanken_api_client::auth::{Credentials, basic_authorization};
///
/// let credentials = Credentials::new("client", "secret");
/// assert_eq!(basic_authorization(&credentials), "Basic Y2xpZW50OnNlY3JldA==");
/// ```
pub fn basic_authorization(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.expose_secret());
    format!("Basic {}", BASE64.encode(pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_authorization_roundtrips() {
        let credentials = Credentials::new("my-client", "p@ss:word");
        let header = basic_authorization(&credentials);
        let encoded = header.strip_prefix("Basic ").unwrap();
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(decoded, b"my-client:p@ss:word");
    }
}
