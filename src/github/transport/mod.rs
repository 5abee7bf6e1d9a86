//! Authenticated HTTP transport for the GitHub REST API.
//!
//! The [`Transport`] trait performs exactly one request and reports what
//! happened; retrying and decoding live in [`ApiClient`](super::ApiClient).
//! [`ReqwestTransport`] is the blocking implementation used at runtime.

mod retry;

use std::time::Duration;

use http::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use http::{Method, StatusCode};
use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use super::error::HeraldError;
use super::locator::PersonalAccessToken;

pub use retry::{LinearBackoff, RetryDecision, RetryPolicy, classify_failure};

/// Identifying user agent attached to every request.
pub const USER_AGENT: &str = concat!("pr-herald/", env!("CARGO_PKG_VERSION"));

/// Media type requested from GitHub.
pub const GITHUB_JSON: &str = "application/vnd.github+json";

/// Default upper bound for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A single request against a path relative to the API base.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,
    /// Path and query, starting with `/`.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

/// Status and undecoded body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status returned by the server.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

/// A request that never produced a complete response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct NetworkFailure {
    /// Transport-level error detail.
    pub message: String,
}

/// Sends one request and returns the raw outcome.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Performs the request.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkFailure`] when no complete response was received,
    /// including timeouts.
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, NetworkFailure>;
}

/// Blocking `reqwest` transport bound to one API base and credential.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    api_base: String,
}

impl ReqwestTransport {
    /// Builds a client that sends the bearer token, GitHub media type, and
    /// [`USER_AGENT`] with every request.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::Configuration`] when the token cannot be encoded
    /// as a header or the HTTP client cannot be constructed.
    pub fn new(
        token: &PersonalAccessToken,
        api_base: &Url,
        timeout: Duration,
    ) -> Result<Self, HeraldError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers(token)?)
            .build()
            .map_err(|error| HeraldError::Configuration {
                message: format!("failed to configure GitHub HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            api_base: api_base.as_str().trim_end_matches('/').to_owned(),
        })
    }
}

fn default_headers(token: &PersonalAccessToken) -> Result<HeaderMap, HeraldError> {
    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.value()))
        .map_err(|_| HeraldError::Configuration {
            message: "GitHub token contains characters not allowed in a header".to_owned(),
        })?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
    Ok(headers)
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, NetworkFailure> {
        let url = format!("{}{}", self.api_base, request.path);
        let builder = self.client.request(request.method.clone(), url);
        let with_body = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = with_body.send().map_err(|error| NetworkFailure {
            message: error.to_string(),
        })?;
        let status = response.status();
        let body = response.text().map_err(|error| NetworkFailure {
            message: format!("failed to read response body: {error}"),
        })?;

        Ok(RawResponse { status, body })
    }
}
