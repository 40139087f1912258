//! OAuth credentials: tokens, expiry, refresh and persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OAuthResult;
use crate::flow::TOKEN_URL;
use crate::response::{self, TokenGrant};
use crate::transport::TokenTransport;

/// OAuth2 access and refresh tokens plus the data needed to renew them.
///
/// Created by a successful [`AuthorizationFlow::exchange_code`] or by
/// [`Credentials::from_json`]; mutated only by a successful
/// [`refresh`](Credentials::refresh).
///
/// The serialized form (see [`to_json`](Credentials::to_json)) is the
/// at-rest contract: field names and the timestamp format must stay stable
/// or previously persisted credentials stop loading.
///
/// [`AuthorizationFlow::exchange_code`]: crate::AuthorizationFlow::exchange_code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// OAuth client id, retained so refresh needs no external parameters.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Raw token endpoint response, kept verbatim for diagnostics.
    pub token_response: serde_json::Value,
    /// Current bearer token.
    pub access_token: String,
    /// Token used to mint new access tokens.
    pub refresh_token: String,
    /// Instant after which `access_token` is no longer valid.
    #[serde(with = "expiry_format")]
    pub token_expiry: DateTime<Utc>,
    /// Scopes granted, in request order.
    pub scopes: Vec<String>,
}

impl Credentials {
    pub(crate) fn from_grant(
        client_id: String,
        client_secret: String,
        scopes: Vec<String>,
        grant: TokenGrant,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            token_response: grant.token_response,
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            token_expiry: grant.token_expiry,
            scopes,
        }
    }

    /// Whether the access token has expired.
    ///
    /// Evaluated against the clock on every call, never cached.
    pub fn is_expired(&self) -> bool {
        self.token_expiry <= Utc::now()
    }

    /// Mint a new access token using the stored refresh token.
    ///
    /// One form-encoded POST to the token endpoint, read by the same
    /// validation as the code exchange. On success `access_token`,
    /// `refresh_token`, `token_expiry` and `token_response` are replaced
    /// together; on failure `self` is left exactly as it was.
    pub async fn refresh(&mut self, transport: &impl TokenTransport) -> OAuthResult<()> {
        debug!(client_id = %self.client_id, "refreshing access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.refresh_token.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = transport.post_form(TOKEN_URL, &params).await?;
        let grant = response::validate(&response)?;

        self.access_token = grant.access_token;
        self.refresh_token = grant.refresh_token;
        self.token_expiry = grant.token_expiry;
        self.token_response = grant.token_response;

        Ok(())
    }

    /// Serialize for persistence.
    pub fn to_json(&self) -> OAuthResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reconstruct credentials persisted with [`to_json`](Credentials::to_json).
    ///
    /// Strict: a `token_expiry` that does not match the persisted format is
    /// a parse failure, not a default.
    pub fn from_json(blob: &str) -> OAuthResult<Self> {
        Ok(serde_json::from_str(blob)?)
    }
}

/// Fixed `YYYY-MM-DDTHH:MM:SSZ` representation for `token_expiry`.
///
/// Second precision with a literal `Z` suffix; previously persisted
/// credentials depend on exactly this shape.
mod expiry_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn serialize<S>(expiry: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&expiry.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OAuthError;
    use crate::testutil::RecordingTransport;
    use chrono::{Duration, TimeZone, Timelike};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials {
            client_id: "my-client".to_string(),
            client_secret: "my-secret".to_string(),
            token_response: json!({
                "access_token": "A",
                "refresh_token": "R",
                "expires_in": 3600,
            }),
            access_token: "A".to_string(),
            refresh_token: "R".to_string(),
            token_expiry: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            scopes: vec!["contacts".to_string(), "oauth".to_string()],
        }
    }

    #[test]
    fn test_json_round_trip_preserves_every_field() {
        let creds = credentials();
        let restored = Credentials::from_json(&creds.to_json().unwrap()).unwrap();
        assert_eq!(restored, creds);
    }

    #[test]
    fn test_round_trip_truncates_expiry_to_seconds() {
        let mut creds = credentials();
        creds.token_expiry = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
            + Duration::milliseconds(750);

        let restored = Credentials::from_json(&creds.to_json().unwrap()).unwrap();
        assert_eq!(
            restored.token_expiry,
            creds.token_expiry.with_nanosecond(0).unwrap()
        );
    }

    #[test]
    fn test_serialized_form_matches_at_rest_contract() {
        let blob = credentials().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();

        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "access_token",
                "client_id",
                "client_secret",
                "refresh_token",
                "scopes",
                "token_expiry",
                "token_response",
            ]
        );
        assert_eq!(value["token_expiry"], "2026-01-02T03:04:05Z");
        assert_eq!(value["scopes"], json!(["contacts", "oauth"]));
    }

    #[test]
    fn test_from_json_rejects_nonconforming_expiry() {
        let blob = credentials()
            .to_json()
            .unwrap()
            .replace("2026-01-02T03:04:05Z", "2026-01-02 03:04:05");
        assert!(matches!(
            Credentials::from_json(&blob),
            Err(OAuthError::Json(_))
        ));
    }

    #[test]
    fn test_is_expired_tracks_the_clock() {
        let mut creds = credentials();

        creds.token_expiry = Utc::now() + Duration::seconds(3600);
        assert!(!creds.is_expired());

        creds.token_expiry = Utc::now() - Duration::seconds(1);
        assert!(creds.is_expired());
    }

    #[tokio::test]
    async fn test_refresh_replaces_tokens_and_keeps_identity() {
        let mut creds = credentials();
        let transport = RecordingTransport::replying(
            r#"{"access_token":"A2","refresh_token":"R2","expires_in":1800}"#,
        );

        let before = Utc::now();
        creds.refresh(&transport).await.unwrap();
        let after = Utc::now();

        assert_eq!(creds.access_token, "A2");
        assert_eq!(creds.refresh_token, "R2");
        assert!(creds.token_expiry >= before + Duration::seconds(1800));
        assert!(creds.token_expiry <= after + Duration::seconds(1800));
        assert_eq!(creds.token_response["access_token"], "A2");

        assert_eq!(creds.client_id, "my-client");
        assert_eq!(creds.client_secret, "my-secret");
        assert_eq!(creds.scopes, vec!["contacts", "oauth"]);

        let (url, params) = transport.single_request();
        assert_eq!(url, TOKEN_URL);
        assert_eq!(
            params,
            vec![
                ("grant_type".to_string(), "refresh_token".to_string()),
                ("refresh_token".to_string(), "R".to_string()),
                ("client_id".to_string(), "my-client".to_string()),
                ("client_secret".to_string(), "my-secret".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_credentials_untouched() {
        let mut creds = credentials();
        let pristine = creds.clone();

        for body in [
            r#"{"status":"BAD_REFRESH_TOKEN"}"#,
            r#"{"access_token":"A2","refresh_token":"R2"}"#,
            r#"{"refresh_token":"R2","expires_in":1800}"#,
            "not json",
        ] {
            let transport = RecordingTransport::replying(body);
            assert!(creds.refresh(&transport).await.is_err());
            assert_eq!(creds, pristine);
        }
    }

    #[tokio::test]
    async fn test_refresh_provider_error_carries_raw_body() {
        let mut creds = credentials();
        let transport = RecordingTransport::replying(r#"{"status":"BAD_REFRESH_TOKEN"}"#);

        match creds.refresh(&transport).await.unwrap_err() {
            OAuthError::CodeExchange(text) => {
                assert_eq!(text, r#"{"status":"BAD_REFRESH_TOKEN"}"#)
            }
            other => panic!("expected CodeExchange, got {other:?}"),
        }
    }
}
