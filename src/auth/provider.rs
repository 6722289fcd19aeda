//! Cached client-credentials token with expiry-based refresh.
//!
//! [`TokenProvider`] fetches a token once when it is created and keeps it in
//! memory. Callers can inspect the expiry and call [`TokenProvider::refresh`]
//! themselves, or go through [`TokenSource::bearer_token`], which refreshes
//! transparently once the cached token is about to expire.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest_middleware::ClientWithMiddleware;
use time::{Duration, OffsetDateTime};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::auth::{
    AccessToken, Credentials, CredentialsProvider, StaticCredentials, TokenResponse,
    basic_authorization,
};
use crate::client::build_http_client;
use crate::config::Config;
use crate::error::SbankenError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Default margin before `valid_to` at which a token counts as expired.
///
/// Tokens issued with a short lifetime use at most half of that lifetime as
/// their margin, so a fresh token is never treated as expired on arrival.
pub const DEFAULT_EXPIRY_LEEWAY: Duration = Duration::seconds(30);

/// Capability to hand out a currently valid bearer token.
///
/// The request executor depends on this trait rather than on
/// [`TokenProvider`], so tests and alternative token caches can be plugged in.
pub trait TokenSource: Send + Sync {
    /// Get a token that is valid for the next request.
    fn bearer_token(&self) -> BoxFuture<'_, Result<AccessToken, SbankenError>>;
}

/// Token holder for the client-credentials grant.
///
/// All three token fields are replaced together under one write lock, so a
/// [`snapshot`](Self::snapshot) never mixes an old token with a new expiry.
/// Refreshes are serialized; concurrent callers of
/// [`bearer_token`](TokenSource::bearer_token) share a single identity server
/// round trip.
///
/// # Example
///
/// ```rust,no_run
/// use sbanken_api_client::auth::TokenProvider;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = TokenProvider::obtain(
///         "https://auth.sbanken.no/identityserver/connect/token",
///         "client_id",
///         "client_secret",
///     )
///     .await?;
///
///     if provider.is_expired().await {
///         provider.refresh().await?;
///     }
///     println!("Token valid until {}", provider.expiration_time().await);
///     Ok(())
/// }
/// ```
pub struct TokenProvider {
    http_client: ClientWithMiddleware,
    identity_server: String,
    credentials: Arc<dyn CredentialsProvider>,
    current: RwLock<CachedToken>,
    refresh_lock: Mutex<()>,
    leeway: Duration,
}

impl TokenProvider {
    /// Perform the grant against `identity_server` and cache the result.
    pub async fn obtain(
        identity_server: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, SbankenError> {
        let credentials = Arc::new(StaticCredentials::new(client_id, client_secret));
        Self::obtain_with(build_http_client(None, None), identity_server, credentials).await
    }

    /// Perform the grant using the identity server and credentials from `config`.
    pub async fn from_config(config: &Config) -> Result<Self, SbankenError> {
        let credentials = Arc::new(StaticCredentials::new(
            config.client_id.clone(),
            config.expose_client_secret(),
        ));
        Self::obtain_with(
            build_http_client(None, None),
            config.identity_server.clone(),
            credentials,
        )
        .await
    }

    /// Perform the grant with a caller-supplied HTTP client and credentials provider.
    pub async fn obtain_with(
        http_client: ClientWithMiddleware,
        identity_server: impl Into<String>,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Result<Self, SbankenError> {
        let identity_server = identity_server.into();
        let token =
            request_token(&http_client, &identity_server, credentials.get_credentials()).await?;

        Ok(Self {
            http_client,
            identity_server,
            credentials,
            current: RwLock::new(CachedToken::new(token)),
            refresh_lock: Mutex::new(()),
            leeway: DEFAULT_EXPIRY_LEEWAY,
        })
    }

    /// Set the margin before expiry at which the token is refreshed.
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// The cached token string.
    pub async fn token_string(&self) -> String {
        self.current.read().await.token.token.clone()
    }

    /// The cached token type.
    pub async fn token_type(&self) -> String {
        self.current.read().await.token.token_type.clone()
    }

    /// The instant the cached token expires.
    pub async fn expiration_time(&self) -> OffsetDateTime {
        self.current.read().await.token.valid_to
    }

    /// All cached token fields, read together.
    pub async fn snapshot(&self) -> AccessToken {
        self.current.read().await.token.clone()
    }

    /// Check whether the cached token is expired or inside the refresh leeway.
    pub async fn is_expired(&self) -> bool {
        self.current.read().await.is_stale(self.leeway)
    }

    /// Re-run the grant and overwrite the cached token.
    ///
    /// On failure the previous token stays in place.
    pub async fn refresh(&self) -> Result<AccessToken, SbankenError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Return the cached token, refreshing first if it is about to expire.
    pub async fn valid_token(&self) -> Result<AccessToken, SbankenError> {
        if let Some(token) = self.fresh_token().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = self.fresh_token().await {
            return Ok(token);
        }

        self.refresh_locked().await
    }

    async fn fresh_token(&self) -> Option<AccessToken> {
        let current = self.current.read().await;
        (!current.is_stale(self.leeway)).then(|| current.token.clone())
    }

    async fn refresh_locked(&self) -> Result<AccessToken, SbankenError> {
        let token = request_token(
            &self.http_client,
            &self.identity_server,
            self.credentials.get_credentials(),
        )
        .await?;

        *self.current.write().await = CachedToken::new(token.clone());
        debug!(valid_to = ?token.valid_to, "refreshed access token");
        Ok(token)
    }
}

/// Cached token together with the lifetime it had when it was stored.
struct CachedToken {
    token: AccessToken,
    lifetime: Duration,
}

impl CachedToken {
    fn new(token: AccessToken) -> Self {
        let lifetime = (token.valid_to - OffsetDateTime::now_utc()).max(Duration::ZERO);
        Self { token, lifetime }
    }

    fn is_stale(&self, leeway: Duration) -> bool {
        let leeway = leeway.min(self.lifetime / 2);
        self.token.expires_within(OffsetDateTime::now_utc(), leeway)
    }
}

impl TokenSource for TokenProvider {
    fn bearer_token(&self) -> BoxFuture<'_, Result<AccessToken, SbankenError>> {
        Box::pin(self.valid_token())
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("identity_server", &self.identity_server)
            .field("client_id", &self.credentials.get_credentials().client_id)
            .field("leeway", &self.leeway)
            .finish()
    }
}

/// A fixed, pre-issued token.
///
/// Useful when the token is obtained out of band. Fails once the token has expired.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: AccessToken,
}

impl StaticToken {
    /// Wrap an existing token.
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> BoxFuture<'_, Result<AccessToken, SbankenError>> {
        Box::pin(async move {
            if self.token.expires_within(OffsetDateTime::now_utc(), Duration::ZERO) {
                return Err(SbankenError::Auth("static token has expired".to_string()));
            }
            Ok(self.token.clone())
        })
    }
}

/// Run a client-credentials grant against the identity server.
async fn request_token(
    http_client: &ClientWithMiddleware,
    identity_server: &str,
    credentials: &Credentials,
) -> Result<AccessToken, SbankenError> {
    let form = serde_urlencoded::to_string([("grant_type", "client_credentials")])
        .map_err(|e| SbankenError::InvalidRequest(e.to_string()))?;

    debug!(identity_server, client_id = %credentials.client_id, "requesting access token");
    let requested_at = OffsetDateTime::now_utc();
    let response = http_client
        .post(identity_server)
        .header(ACCEPT, "application/json")
        .header(AUTHORIZATION, basic_authorization(credentials))
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        warn!(%status, "identity server rejected token request");
        return Err(SbankenError::Auth(format!(
            "identity server returned HTTP {}: {}",
            status, body
        )));
    }

    let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
        SbankenError::Auth(format!("failed to parse token response: {}", e))
    })?;

    parsed.into_access_token(requested_at)
}
