use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

use super::error::AuthError;
use super::token::Credential;

/// Scope requested in the client-credentials grant.
pub const API_SCOPE: &str = "api.console";

/// How a credential is obtained.
#[derive(Clone)]
pub enum AuthMode {
    /// Pre-issued token, returned unchanged and never refreshed.
    Static(Credential),
    /// OAuth2 client-credentials grant against `token_url`.
    ClientCredentials {
        token_url: String,
        client_id: String,
        client_secret: String,
    },
}

impl AuthMode {
    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }
}

impl fmt::Debug for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(_) => f.debug_tuple("Static").field(&"..").finish(),
            Self::ClientCredentials {
                token_url,
                client_id,
                ..
            } => f
                .debug_struct("ClientCredentials")
                .field("token_url", token_url)
                .field("client_id", client_id)
                .field("client_secret", &"..")
                .finish(),
        }
    }
}

/// Produces bearer credentials on demand.
///
/// Holds no mutable state: every call in client-credentials mode performs an
/// independent grant exchange.
///
/// # Example
/// ```no_run
/// use hcc_events::auth::{AuthMode, Authenticator, Credential};
///
/// # async fn example() -> Result<(), hcc_events::auth::AuthError> {
/// let auth = Authenticator::new(
///     reqwest::Client::new(),
///     AuthMode::Static(Credential::new("token")),
/// );
/// let credential = auth.obtain_credential().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: reqwest::Client,
    mode: AuthMode,
}

impl Authenticator {
    pub fn new(client: reqwest::Client, mode: AuthMode) -> Self {
        Self { client, mode }
    }

    pub fn mode(&self) -> &AuthMode {
        &self.mode
    }

    /// Return a credential: the static token, or a freshly granted access token.
    ///
    /// Any non-200 answer from the token endpoint is an error; there is no
    /// retry at this layer.
    pub async fn obtain_credential(&self) -> Result<Credential, AuthError> {
        match &self.mode {
            AuthMode::Static(credential) => Ok(credential.clone()),
            AuthMode::ClientCredentials {
                token_url,
                client_id,
                client_secret,
            } => {
                self.client_credentials_grant(token_url, client_id, client_secret)
                    .await
            }
        }
    }

    async fn client_credentials_grant(
        &self,
        token_url: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Credential, AuthError> {
        tracing::debug!(token_url, client_id, "requesting client-credentials grant");
        let resp = self
            .client
            .post(token_url)
            .header("Accept", "application/json")
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("scope", API_SCOPE),
                ("grant_type", "client_credentials"),
            ])
            .send()
            .await?;
        if resp.status() != StatusCode::OK {
            return Err(AuthError::TokenRequest {
                status: resp.status().as_u16(),
            });
        }
        let body = resp.bytes().await?;
        let payload: TokenResponse = serde_json::from_slice(&body)?;
        match payload.access_token {
            Some(token) if !token.is_empty() => Ok(Credential::new(token)),
            _ => Err(AuthError::InvalidResponse(
                "token response missing access_token".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}
