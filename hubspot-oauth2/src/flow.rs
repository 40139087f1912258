//! Authorization-code-grant flow against HubSpot.

use tracing::debug;

use crate::credentials::Credentials;
use crate::error::OAuthResult;
use crate::response;
use crate::transport::TokenTransport;

/// HubSpot authorization endpoint (where the user grants access).
pub const AUTHORIZE_URL: &str = "https://app.hubspot.com/oauth/authorize";

/// HubSpot token endpoint, used for both code exchange and refresh.
pub const TOKEN_URL: &str = "https://api.hubapi.com/oauth/v1/token";

/// Configuration for one HubSpot OAuth integration.
///
/// Immutable once constructed. Drives step one of the grant (the
/// authorization URL) and step two (the code-for-token exchange); the
/// resulting [`Credentials`] handle refresh on their own.
#[derive(Debug, Clone)]
pub struct AuthorizationFlow {
    client_id: String,
    client_secret: String,
    scopes: Vec<String>,
    redirect_uri: String,
}

impl AuthorizationFlow {
    /// Create a flow.
    ///
    /// Trailing `/` characters are stripped from `redirect_uri` so the URL
    /// built here matches what gets sent on the exchange request.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        scopes: Vec<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        let redirect_uri = redirect_uri.into();
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes,
            redirect_uri: redirect_uri.trim_end_matches('/').to_string(),
        }
    }

    /// OAuth client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Scopes this flow requests, in order.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Normalized redirect URI.
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Build the URL the user must visit to grant access.
    ///
    /// Pure function of the configured state; the query carries exactly
    /// `client_id`, `scope` (space-joined) and `redirect_uri`.
    pub fn build_authorize_url(&self) -> String {
        let scope = self.scopes.join(" ");
        let params = [
            ("client_id", self.client_id.as_str()),
            ("scope", scope.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", AUTHORIZE_URL, query)
    }

    /// Exchange an authorization code for [`Credentials`].
    ///
    /// One form-encoded POST to the token endpoint; the response is read by
    /// the shared validation in [`crate::response`]. The credentials carry
    /// this flow's client id, secret and scopes so they can refresh
    /// themselves later.
    pub async fn exchange_code(
        &self,
        transport: &impl TokenTransport,
        auth_code: &str,
    ) -> OAuthResult<Credentials> {
        debug!(client_id = %self.client_id, "exchanging authorization code for tokens");

        let params = [
            ("grant_type", "authorization_code"),
            ("code", auth_code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = transport.post_form(TOKEN_URL, &params).await?;
        let grant = response::validate(&response)?;

        Ok(Credentials::from_grant(
            self.client_id.clone(),
            self.client_secret.clone(),
            self.scopes.clone(),
            grant,
        ))
    }
}
