//! Retrying JSON client layered over a [`Transport`].

use std::thread;

use backon::BlockingRetryable;
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HeraldError;
use super::http_utils::describe_payload;
use super::pagination::Pages;
use super::transport::{
    ApiRequest, RawResponse, RetryDecision, RetryPolicy, Transport, classify_failure,
};

/// Status and description of one failed attempt.
#[derive(Debug)]
struct FailedAttempt {
    status: Option<u16>,
    payload: String,
}

/// Calls the GitHub API, retrying server and network failures.
///
/// Client errors (4xx) fail immediately. Server errors (5xx) and network
/// failures are retried with linear backoff until the attempt budget in
/// [`RetryPolicy`] is spent.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    retry: RetryPolicy,
}

impl<T: Transport> ApiClient<T> {
    /// Creates a client over `transport`.
    #[must_use]
    pub const fn new(transport: T, retry: RetryPolicy) -> Self {
        Self { transport, retry }
    }

    /// Performs one logical call.
    ///
    /// Returns `Ok(None)` for `204 No Content`, which is distinct from an
    /// empty JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::Terminal`] for a non-retryable status,
    /// [`HeraldError::RetriesExhausted`] once every attempt failed, and
    /// [`HeraldError::Decode`] when a success body is not JSON.
    pub fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, HeraldError> {
        let request = ApiRequest {
            method,
            path: path.to_owned(),
            body: body.cloned(),
        };

        let mut attempts: u32 = 0;
        let outcome = (|| {
            attempts = attempts.saturating_add(1);
            self.attempt(&request, attempts)
        })
        .retry(self.retry)
        .sleep(thread::sleep)
        .when(|failure: &FailedAttempt| classify_failure(failure.status) == RetryDecision::Retry)
        .call();

        let failure = match outcome {
            Ok(response) => return decode_success(path, &response),
            Err(failure) => failure,
        };

        match (classify_failure(failure.status), failure.status) {
            (RetryDecision::Fail, Some(code)) => Err(HeraldError::Terminal {
                method: request.method.to_string(),
                path: request.path,
                status: code,
                payload: failure.payload,
            }),
            _ => Err(HeraldError::RetriesExhausted {
                method: request.method.to_string(),
                path: request.path,
                attempts,
                status: failure.status,
                payload: failure.payload,
            }),
        }
    }

    fn attempt(&self, request: &ApiRequest, attempt: u32) -> Result<RawResponse, FailedAttempt> {
        let failure = match self.transport.send(request) {
            Ok(response) if response.status.is_success() => return Ok(response),
            Ok(response) => FailedAttempt {
                status: Some(response.status.as_u16()),
                payload: describe_payload(&response.body),
            },
            Err(network) => FailedAttempt {
                status: None,
                payload: network.message,
            },
        };

        let max = self.retry.max_attempts();
        let observed = failure
            .status
            .map_or_else(|| "network error".to_owned(), |code| code.to_string());
        tracing::warn!(
            "[{attempt}/{max}] GitHub API {} {} -> {observed}: {}",
            request.method,
            request.path,
            failure.payload
        );
        Err(failure)
    }

    /// Fetches `path` and decodes the body into `R`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClient::call`] failures and returns
    /// [`HeraldError::Decode`] for an empty or mismatched body.
    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, HeraldError> {
        let value = self.call(Method::GET, path, None)?;
        decode_value(path, value)
    }

    /// Sends `body` to `path` with `method` and decodes the reply into `R`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClient::call`] failures and returns
    /// [`HeraldError::Decode`] for an empty or mismatched body.
    pub fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Result<R, HeraldError> {
        let value = self.call(method, path, Some(body))?;
        decode_value(path, value)
    }

    /// Lazily iterates every item of a paged collection at `path`.
    #[must_use]
    pub fn pages<Item: DeserializeOwned>(&self, path: &str) -> Pages<'_, T, Item> {
        Pages::new(self, path)
    }
}

fn decode_success(path: &str, response: &RawResponse) -> Result<Option<Value>, HeraldError> {
    if response.status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|error| HeraldError::Decode {
            path: path.to_owned(),
            message: error.to_string(),
        })
}

fn decode_value<R: DeserializeOwned>(path: &str, value: Option<Value>) -> Result<R, HeraldError> {
    let present = value.ok_or_else(|| HeraldError::Decode {
        path: path.to_owned(),
        message: "expected a JSON body but the response was empty".to_owned(),
    })?;
    serde_json::from_value(present).map_err(|error| HeraldError::Decode {
        path: path.to_owned(),
        message: error.to_string(),
    })
}
