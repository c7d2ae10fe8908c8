//! Newsletter subscription.
//!
//! Adds an email address to the mailing-list provider with double opt-in
//! disabled. The provider answers a duplicate address with a 4xx and an error
//! payload like:
//!
//! ```json
//! { "error": { "email": ["This email address has already been subscribed"] } }
//! ```
//!
//! which counts as success: the address is on the list either way. Every other
//! failure, including network errors and bodies that are not JSON (even with
//! a 2xx status), collapses into `success: false`.

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// The provider's message for an address that is already on the list.
pub const ALREADY_SUBSCRIBED: &str = "This email address has already been subscribed";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum SubscribeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Response body is not JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("No mailing-list API URL (use --api-url, VORACIOUS_EMAIL_API_URL or [subscribe] api_url)")]
    MissingApiUrl,
}

/// Status and JSON body of a provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// The status was 2xx.
    pub ok: bool,
    /// Parsed JSON body.
    pub body: Value,
}

impl ApiResponse {
    /// Parse a raw response body. A body that is not JSON is an error
    /// regardless of the status.
    pub fn from_body(ok: bool, body: &[u8]) -> Result<Self, SubscribeError> {
        Ok(Self {
            ok,
            body: serde_json::from_slice(body)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct SubscriberRequest<'a> {
    email: &'a str,
    double_opt_in: bool,
}

/// A mailing list that accepts new subscribers.
pub trait MailingList {
    fn add_subscriber(&self, email: &str) -> Result<ApiResponse, SubscribeError>;
}

/// Mailing list reached over HTTP with token authentication.
pub struct HttpMailingList {
    client: reqwest::blocking::Client,
    url: String,
    token: String,
}

impl HttpMailingList {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Result<Self, SubscribeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            token: token.into(),
        })
    }
}

impl MailingList for HttpMailingList {
    fn add_subscriber(&self, email: &str) -> Result<ApiResponse, SubscribeError> {
        let response = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .json(&SubscriberRequest {
                email,
                double_opt_in: false,
            })
            .send()?;
        let ok = response.status().is_success();
        ApiResponse::from_body(ok, &response.bytes()?)
    }
}

/// Result reported back to the caller, serialized as `{"success": bool}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscribeOutcome {
    pub success: bool,
    /// Why the request failed, for display only.
    #[serde(skip)]
    pub error: Option<String>,
}

impl SubscribeOutcome {
    fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// True for 2xx, or for the provider's "already subscribed" rejection.
pub fn is_subscribed(response: &ApiResponse) -> bool {
    response.ok
        || response
            .body
            .pointer("/error/email")
            .and_then(Value::as_array)
            .is_some_and(|messages| {
                messages
                    .iter()
                    .any(|m| m.as_str() == Some(ALREADY_SUBSCRIBED))
            })
}

/// Subscribe `email`. Blank addresses are rejected without a request.
pub fn subscribe(list: &impl MailingList, email: &str) -> SubscribeOutcome {
    let email = email.trim();
    if email.is_empty() {
        return SubscribeOutcome::failure("email is empty");
    }
    match list.add_subscriber(email) {
        Ok(response) if is_subscribed(&response) => SubscribeOutcome::success(),
        Ok(response) => SubscribeOutcome::failure(format!("rejected: {}", response.body)),
        Err(e) => SubscribeOutcome::failure(e.to_string()),
    }
}
