//! HTTP client construction shared by the authenticator and the poller.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::auth::Credential;
use crate::config::PollConfig;
use crate::error::{PollerError, Result};

/// Build the client for one polling loop.
///
/// Routes through the configured proxy (if any) and applies the per-request
/// timeout. Every request asks for JSON.
pub fn build_client(config: &PollConfig) -> Result<reqwest::Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut builder = reqwest::Client::builder()
        .timeout(config.timeout())
        .default_headers(default_headers);
    if let Some(proxy) = config.proxy() {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| PollerError::Configuration(format!("invalid proxy {proxy}: {e}")))?;
        builder = builder.proxy(proxy);
    }
    builder
        .build()
        .map_err(|e| PollerError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Headers for an authenticated events request.
pub fn bearer_headers(credential: &Credential) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&credential.bearer_header()).map_err(|_| {
        PollerError::Authentication("credential is not a valid header value".to_string())
    })?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
