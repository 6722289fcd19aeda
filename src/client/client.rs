//! Sbanken REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::auth::{TokenProvider, TokenSource};
use crate::client::endpoints::Endpoints;
use crate::client::request::{ApiRequest, QueryParams};
use crate::client::strategy::AuthStrategy;
use crate::config::Config;
use crate::error::SbankenError;
use crate::types::decode_json;

/// The Sbanken REST API client.
///
/// Executes [`ApiRequest`]s with the configured [`AuthStrategy`] and decodes
/// the JSON responses. The resource operations (accounts, customers,
/// transactions, transfers) live in [`crate::bank`].
///
/// # Example
///
/// ```rust,no_run
/// use sbanken_api_client::client::SbankenClient;
/// use sbanken_api_client::config::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_file("sbanken.json")?;
///     let client = SbankenClient::from_config(&config).await?;
///
///     for account in client.get_accounts().await? {
///         println!("{}: {}", account.name, account.available);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SbankenClient {
    http_client: ClientWithMiddleware,
    auth: AuthStrategy,
    endpoints: Endpoints,
}

impl SbankenClient {
    /// Create a client with default endpoints and no authentication.
    ///
    /// Use [`SbankenClient::builder()`] to configure a token source.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> SbankenClientBuilder {
        SbankenClientBuilder::new()
    }

    /// Obtain a token with the configured credentials and build a client.
    ///
    /// Sends the `customerId` header when the configuration has one.
    pub async fn from_config(config: &Config) -> Result<Self, SbankenError> {
        let provider = TokenProvider::from_config(config).await?;
        let mut builder = Self::builder()
            .endpoints(Endpoints::from(config))
            .token_source(Arc::new(provider));
        if let Some(customer_id) = &config.customer_id {
            builder = builder.customer_id(customer_id.clone());
        }
        Ok(builder.build())
    }

    /// The resource base URLs.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The authentication strategy.
    pub fn auth(&self) -> &AuthStrategy {
        &self.auth
    }

    /// GET `url` and return the raw response body.
    pub async fn get_bytes(
        &self,
        url: &str,
        query: Option<&QueryParams>,
    ) -> Result<Vec<u8>, SbankenError> {
        let request = with_query(ApiRequest::get(url), query);
        let response = self.send(request).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// GET `url` and decode the JSON response.
    pub async fn get<T>(&self, url: &str, query: Option<&QueryParams>) -> Result<T, SbankenError>
    where
        T: DeserializeOwned + Default,
    {
        self.execute(with_query(ApiRequest::get(url), query)).await
    }

    /// POST `body` as JSON to `url` and decode the JSON response.
    pub async fn post<T, B>(
        &self,
        url: &str,
        query: Option<&QueryParams>,
        body: &B,
    ) -> Result<T, SbankenError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let request = with_query(ApiRequest::post(url), query).json_body(body)?;
        self.execute(request).await
    }

    /// Execute a request and decode the JSON response.
    ///
    /// An empty body decodes to `T::default()`. Business-level error flags in
    /// the body are left for the caller to inspect.
    pub async fn execute<T>(&self, request: ApiRequest) -> Result<T, SbankenError>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        decode_json(&body)
    }

    /// Execute a request and stream the response body verbatim into `sink`.
    ///
    /// Returns the number of bytes written.
    pub async fn download<W>(&self, request: ApiRequest, sink: &mut W) -> Result<u64, SbankenError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut response = self.send(request).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;
        Ok(written)
    }

    /// Build and send a request; transport errors return before any body is read.
    async fn send(&self, request: ApiRequest) -> Result<reqwest::Response, SbankenError> {
        let url = request.build_url()?;
        debug!(method = %request.method(), url = %url, "sending request");

        let mut builder = self
            .http_client
            .request(request.method().clone(), url)
            .header(ACCEPT, "application/json");
        builder = self.auth.apply(builder).await?;

        if let Some(body) = request.body() {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        } else if *request.method() == Method::POST {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, method = %request.method(), "non-success response status");
        }
        Ok(response)
    }
}

fn with_query(request: ApiRequest, query: Option<&QueryParams>) -> ApiRequest {
    match query {
        Some(params) => request.query_params(params),
        None => request,
    }
}

impl Default for SbankenClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SbankenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SbankenClient")
            .field("endpoints", &self.endpoints)
            .field("auth", &self.auth)
            .finish()
    }
}

/// Builder for [`SbankenClient`].
pub struct SbankenClientBuilder {
    endpoints: Endpoints,
    token_source: Option<Arc<dyn TokenSource>>,
    customer_id: Option<String>,
    auth: Option<AuthStrategy>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<ClientWithMiddleware>,
}

impl SbankenClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            endpoints: Endpoints::default(),
            token_source: None,
            customer_id: None,
            auth: None,
            user_agent: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Set all resource base URLs.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Point every resource at one base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl AsRef<str>) -> Self {
        self.endpoints = Endpoints::with_base_url(url.as_ref());
        self
    }

    /// Set the token source used for `Authorization: Bearer` headers.
    pub fn token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(tokens);
        self
    }

    /// Set the customer id sent in the `customerId` header.
    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    /// Set the authentication strategy directly.
    ///
    /// Takes precedence over [`token_source`](Self::token_source) and
    /// [`customer_id`](Self::customer_id).
    pub fn auth(mut self, auth: AuthStrategy) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a total request timeout. No timeout is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client; user agent and timeout are then ignored.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> SbankenClient {
        let http_client = self
            .http_client
            .unwrap_or_else(|| build_http_client(self.user_agent, self.timeout));
        let auth = self
            .auth
            .unwrap_or_else(|| AuthStrategy::from_parts(self.token_source, self.customer_id));

        SbankenClient {
            http_client,
            auth,
            endpoints: self.endpoints,
        }
    }
}

impl Default for SbankenClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the HTTP client shared by the executor and the identity server calls.
pub(crate) fn build_http_client(
    user_agent: Option<String>,
    timeout: Option<Duration>,
) -> ClientWithMiddleware {
    // Build default headers.
    let mut headers = HeaderMap::new();
    let user_agent =
        user_agent.unwrap_or_else(|| format!("sbanken-api-client/{}", env!("CARGO_PKG_VERSION")));
    let header_value = HeaderValue::from_str(&user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static("sbanken-api-client"));
    headers.insert(USER_AGENT, header_value);

    let mut builder = reqwest::Client::builder().default_headers(headers);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let reqwest_client = builder.build().unwrap_or_else(|e| {
        warn!(error = %e, ?timeout, "failed to build configured HTTP client, using defaults");
        reqwest::Client::new()
    });

    ClientBuilder::new(reqwest_client)
        .with(TracingMiddleware::default())
        .build()
}
