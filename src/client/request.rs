//! Request descriptors for the executor.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::error::SbankenError;

/// Query parameters appended to a request URL.
pub type QueryParams = BTreeMap<String, String>;

/// Description of a single API call.
///
/// Built once per call and handed to
/// [`SbankenClient::execute`](crate::client::SbankenClient::execute) by value.
///
/// ```rust
/// use sbanken_api_client::client::ApiRequest;
///
/// let request = ApiRequest::get("https://api.example.com/Transactions/1")
///     .query("index", "0")
///     .query("length", "50");
/// let url = request.build_url().unwrap();
/// assert_eq!(url.query(), Some("index=0&length=50"));
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: String,
    query: QueryParams,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request with the given method and URL.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Add a query parameter. A repeated key replaces the previous value.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add every parameter from `params`.
    pub fn query_params(mut self, params: &QueryParams) -> Self {
        self.query
            .extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Attach a JSON body.
    pub fn json_body<B>(mut self, body: &B) -> Result<Self, SbankenError>
    where
        B: Serialize + ?Sized,
    {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URL without the query parameters added by this descriptor.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The query parameters.
    pub fn query_map(&self) -> &QueryParams {
        &self.query
    }

    /// The JSON body, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Parse the URL and append the URL-encoded query parameters.
    pub fn build_url(&self) -> Result<Url, SbankenError> {
        let mut url = Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn join_path(base: &str, segments: &[&str]) -> Result<String, SbankenError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| SbankenError::InvalidRequest(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}
