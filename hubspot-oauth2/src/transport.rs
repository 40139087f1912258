//! HTTP transport seam for token endpoint calls.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::OAuthResult;

/// Content type HubSpot expects on token endpoint requests.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// A raw response from the token endpoint.
///
/// Keeps the body text verbatim so provider-reported errors can be
/// surfaced exactly as received.
#[derive(Debug, Clone)]
pub struct FormResponse {
    body: String,
}

impl FormResponse {
    /// Wrap a raw response body.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> OAuthResult<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Transport capable of issuing form-encoded POST requests.
///
/// [`AuthorizationFlow`](crate::AuthorizationFlow) and
/// [`Credentials`](crate::Credentials) are generic over this trait so tests
/// can substitute canned responses; [`HttpTransport`] is the production
/// implementation.
#[async_trait]
pub trait TokenTransport: Send + Sync {
    /// POST `params` form-encoded to `url` and return the raw response.
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> OAuthResult<FormResponse>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport reusing an existing HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenTransport for HttpTransport {
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> OAuthResult<FormResponse> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", FORM_CONTENT_TYPE)
            .form(params)
            .send()
            .await?;

        let body = response.text().await?;
        Ok(FormResponse::new(body))
    }
}
