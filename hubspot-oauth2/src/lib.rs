//! # hubspot-oauth2
//!
//! OAuth 2.0 authorization-code-grant client for the HubSpot API.
//!
//! Drives the three-step OAuth2 dance against HubSpot's endpoints and
//! models the result as a serializable credential the caller persists
//! between runs:
//!
//! 1. [`AuthorizationFlow::build_authorize_url`] — where to send the user.
//! 2. [`AuthorizationFlow::exchange_code`] — trade the returned code for
//!    [`Credentials`].
//! 3. [`Credentials::refresh`] — mint a new access token once
//!    [`Credentials::is_expired`] says the old one is gone.
//!
//! Token endpoint calls go through the [`TokenTransport`] seam;
//! [`HttpTransport`] is the reqwest-backed production implementation.
//! Storage is deliberately out of scope: persist with
//! [`Credentials::to_json`] and reload with [`Credentials::from_json`]
//! wherever suits the application.
//!
//! ## Example
//!
//! ```ignore
//! use hubspot_oauth2::{AuthorizationFlow, Credentials, HttpTransport};
//!
//! let flow = AuthorizationFlow::from_client_secrets_file(
//!     "client_secrets.json",
//!     vec!["contacts".into(), "oauth".into()],
//!     "https://example.com/oauth/callback",
//! )?;
//!
//! // Send the user here, get `code` back on the redirect.
//! println!("{}", flow.build_authorize_url());
//!
//! let transport = HttpTransport::new();
//! let mut creds = flow.exchange_code(&transport, &code).await?;
//! std::fs::write("credentials.json", creds.to_json()?)?;
//!
//! // Later, in another run:
//! let mut creds = Credentials::from_json(&std::fs::read_to_string("credentials.json")?)?;
//! if creds.is_expired() {
//!     creds.refresh(&transport).await?;
//!     std::fs::write("credentials.json", creds.to_json()?)?;
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod credentials;
pub mod error;
pub mod flow;
mod response;
pub mod secrets;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

pub use credentials::Credentials;
pub use error::{OAuthError, OAuthResult};
pub use flow::{AuthorizationFlow, AUTHORIZE_URL, TOKEN_URL};
pub use secrets::ClientSecrets;
pub use transport::{FormResponse, HttpTransport, TokenTransport, FORM_CONTENT_TYPE};
