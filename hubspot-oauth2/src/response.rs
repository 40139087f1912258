//! Validation of token endpoint responses.
//!
//! Both the code-exchange path and the refresh path read the provider's
//! body through [`validate`]; the two must never drift apart in how they
//! interpret it.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::error::{OAuthError, OAuthResult};
use crate::transport::FormResponse;

/// Token fields extracted from a successful token endpoint response.
#[derive(Debug, Clone)]
pub(crate) struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub token_expiry: DateTime<Utc>,
    /// Full response body, kept verbatim.
    pub token_response: Value,
}

/// Validate a token endpoint response and extract the granted tokens.
///
/// HubSpot reports failures through a `status` field in the body, so that
/// check runs before any field extraction. The expiry instant is fixed
/// here, at the moment the grant is obtained, and never recomputed.
pub(crate) fn validate(response: &FormResponse) -> OAuthResult<TokenGrant> {
    let data = response.json()?;

    if data.get("status").is_some() {
        return Err(OAuthError::CodeExchange(response.text().to_string()));
    }

    let lifetime = data
        .get("expires_in")
        .and_then(Value::as_f64)
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .and_then(|secs| Duration::try_seconds(secs as i64))
        .ok_or_else(|| OAuthError::bad_response("Bad token expiration format"))?;

    let token_expiry = Utc::now()
        .checked_add_signed(lifetime)
        .ok_or_else(|| OAuthError::bad_response("Bad token expiration format"))?;

    let access_token = token_string(&data, "access_token")?;
    let refresh_token = token_string(&data, "refresh_token")?;

    Ok(TokenGrant {
        access_token,
        refresh_token,
        token_expiry,
        token_response: data,
    })
}

fn token_string(data: &Value, key: &str) -> OAuthResult<String> {
    match data.get(key) {
        None => Err(OAuthError::bad_response("Missing access or refresh token")),
        Some(Value::String(token)) => Ok(token.clone()),
        Some(_) => Err(OAuthError::bad_response("Bad access or refresh token format")),
    }
}
