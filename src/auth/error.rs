use thiserror::Error;

use crate::error::PollerError;

/// Errors raised while obtaining a bearer credential.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token request failed with status {status}")]
    TokenRequest { status: u16 },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidResponse(error.to_string())
    }
}

impl From<AuthError> for PollerError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::TokenRequest { status } => PollerError::TokenRequest { status },
            AuthError::InvalidResponse(message) => {
                PollerError::MalformedResponse(format!("token response: {message}"))
            }
            AuthError::Network(e) => PollerError::Network(e),
        }
    }
}
