//! Client-secrets file loading.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::OAuthResult;
use crate::flow::AuthorizationFlow;

/// The subset of a client-secrets file this client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl ClientSecrets {
    /// Load secrets from a JSON file.
    ///
    /// IO and parse failures propagate untouched.
    pub fn from_file(path: impl AsRef<Path>) -> OAuthResult<Self> {
        let blob = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&blob)?)
    }
}

impl AuthorizationFlow {
    /// Build a flow from a client-secrets JSON file.
    pub fn from_client_secrets_file(
        path: impl AsRef<Path>,
        scopes: Vec<String>,
        redirect_uri: impl Into<String>,
    ) -> OAuthResult<Self> {
        let secrets = ClientSecrets::from_file(path)?;
        Ok(Self::new(
            secrets.client_id,
            secrets.client_secret,
            scopes,
            redirect_uri,
        ))
    }
}
