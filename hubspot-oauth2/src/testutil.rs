//! Test doubles shared across module tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::OAuthResult;
use crate::transport::{FormResponse, TokenTransport};

/// Transport that replies with a canned body and records every request.
pub(crate) struct RecordingTransport {
    body: String,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl RecordingTransport {
    pub(crate) fn replying(body: &str) -> Self {
        Self {
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The one request made through this transport; panics on any other count.
    pub(crate) fn single_request(&self) -> (String, Vec<(String, String)>) {
        let requests = self.requests.lock().unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

#[async_trait]
impl TokenTransport for RecordingTransport {
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> OAuthResult<FormResponse> {
        self.requests.lock().unwrap().push((
            url.to_string(),
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ));
        Ok(FormResponse::new(self.body.clone()))
    }
}
