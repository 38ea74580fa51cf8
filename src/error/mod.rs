//! Error types for the events poller.

use thiserror::Error;

/// Broad error category, used for logging and exit diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    Upstream,
    Network,
    Configuration,
    Serialization,
    Sink,
}

/// Primary error type for all poller operations.
///
/// Every variant that escapes [`crate::poller::Poller::run`] ends the loop.
/// Credential expiry on the events endpoint is never represented here; it is
/// the [`crate::poller::FetchOutcome::AuthExpired`] tag and is recovered locally.
#[derive(Error, Debug)]
pub enum PollerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token request failed with status {status}")]
    TokenRequest { status: u16 },

    #[error("Events request failed with status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Credential rejected after {attempts} consecutive refreshes")]
    AuthRejected { attempts: u32 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event sink closed")]
    SinkClosed,
}

impl PollerError {
    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::TokenRequest { .. } | Self::Authentication(_) | Self::AuthRejected { .. } => {
                ErrorCategory::Authentication
            }
            Self::UnexpectedStatus { .. } => ErrorCategory::Upstream,
            Self::MalformedResponse(_) | Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Network(_) => ErrorCategory::Network,
            Self::SinkClosed => ErrorCategory::Sink,
        }
    }

    /// Whether this error ends the poll loop.
    ///
    /// Always true: recoverable conditions (401 on the events endpoint) are
    /// handled inside the loop and never become a `PollerError`.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Configuration(_)
            | Self::TokenRequest { .. }
            | Self::UnexpectedStatus { .. }
            | Self::MalformedResponse(_)
            | Self::Authentication(_)
            | Self::AuthRejected { .. }
            | Self::Network(_)
            | Self::Serialization(_)
            | Self::SinkClosed => true,
        }
    }

    /// HTTP status attached to this error, if it came from an upstream response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::TokenRequest { status } | Self::UnexpectedStatus { status } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PollerError>;
