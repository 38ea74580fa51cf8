//! Poller configuration, resolved once at startup.
//!
//! Resolution sources:
//! 1. A key-value mapping supplied by the hosting runtime ([`PollConfig::from_args`])
//! 2. `HCC_*` environment variables, for standalone runs ([`PollConfig::from_env`])

use std::time::Duration;

use serde_json::{Map, Value};

use crate::auth::{AuthMode, Credential};
use crate::error::{PollerError, Result};

pub const DEFAULT_INSTANCE: &str = "https://console.redhat.com";
pub const DEFAULT_TOKEN_URL: &str =
    "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable → option key, for [`PollConfig::from_env`].
const ENV_MAPPINGS: [(&str, &str); 8] = [
    ("HCC_HOST", "instance"),
    ("HCC_TOKEN", "token"),
    ("HCC_PROXY", "proxy"),
    ("HCC_TOKEN_URL", "token_url"),
    ("HCC_CLIENT_ID", "client_id"),
    ("HCC_CLIENT_SECRET", "client_secret"),
    ("HCC_QUERY", "query"),
    ("HCC_INTERVAL", "interval"),
];

/// Immutable configuration for one polling loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    instance: String,
    proxy: Option<String>,
    query: Option<String>,
    interval: Duration,
    timeout: Duration,
    max_auth_refreshes: Option<u32>,
    auth: AuthMode,
}

impl PollConfig {
    /// Config with every option at its default and the given auth mode.
    pub fn new(auth: AuthMode) -> Self {
        Self {
            instance: DEFAULT_INSTANCE.to_string(),
            proxy: None,
            query: None,
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            max_auth_refreshes: None,
            auth,
        }
    }

    /// Resolve from the option mapping handed over by the hosting runtime.
    ///
    /// `client_id` + `client_secret` select the client-credentials grant and
    /// win over `token`. Numeric options accept JSON numbers or numeric strings.
    pub fn from_args(args: &Map<String, Value>) -> Result<Self> {
        let auth = match (
            string_arg(args, "client_id"),
            string_arg(args, "client_secret"),
        ) {
            (Some(client_id), Some(client_secret)) => AuthMode::ClientCredentials {
                token_url: string_arg(args, "token_url")
                    .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
                client_id,
                client_secret,
            },
            (Some(_), None) | (None, Some(_)) => {
                return Err(PollerError::Configuration(
                    "client_id and client_secret must be set together".to_string(),
                ));
            }
            (None, None) => match string_arg(args, "token") {
                Some(token) => AuthMode::Static(Credential::new(token)),
                None => {
                    return Err(PollerError::Configuration(
                        "either token or client_id/client_secret is required".to_string(),
                    ));
                }
            },
        };

        let mut config = Self::new(auth);
        if let Some(instance) = string_arg(args, "instance") {
            config = config.with_instance(instance);
        }
        config.proxy = string_arg(args, "proxy").filter(|p| p != "None");
        config.query = string_arg(args, "query");
        if let Some(secs) = number_arg(args, "interval")? {
            if secs == 0 {
                return Err(PollerError::Configuration(
                    "interval must be greater than zero".to_string(),
                ));
            }
            config.interval = Duration::from_secs(secs);
        }
        if let Some(secs) = number_arg(args, "timeout")? {
            if secs == 0 {
                return Err(PollerError::Configuration(
                    "timeout must be greater than zero".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = number_arg(args, "max_auth_refreshes")? {
            let limit = u32::try_from(limit).map_err(|_| {
                PollerError::Configuration(format!("max_auth_refreshes out of range: {limit}"))
            })?;
            config.max_auth_refreshes = Some(limit);
        }
        Ok(config)
    }

    /// Resolve from `HCC_*` environment variables (loading `.env` if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut args = Map::new();
        for (env_var, key) in &ENV_MAPPINGS {
            if let Ok(value) = std::env::var(env_var) {
                args.insert((*key).to_string(), Value::String(value));
            }
        }
        Self::from_args(&args)
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        let proxy = proxy.into();
        self.proxy = (!proxy.is_empty()).then_some(proxy);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_auth_refreshes(mut self, limit: u32) -> Self {
        self.max_auth_refreshes = Some(limit);
        self
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Explicit query string; `None` means the rolling default window.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cap on consecutive 401-triggered refreshes; `None` retries without bound.
    pub fn max_auth_refreshes(&self) -> Option<u32> {
        self.max_auth_refreshes
    }

    pub fn auth(&self) -> &AuthMode {
        &self.auth
    }

    /// Full URL of the events endpoint, without query string.
    pub fn events_url(&self) -> String {
        format!("{}/api/notifications/v1.0/notifications/events", self.instance)
    }
}

/// Non-empty string option. Numbers and booleans are accepted in their JSON form.
fn string_arg(args: &Map<String, Value>, key: &str) -> Option<String> {
    match args.get(key)? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn number_arg(args: &Map<String, Value>, key: &str) -> Result<Option<u64>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
            PollerError::Configuration(format!("{key} must be a non-negative integer, got {n}"))
        }),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<u64>().map(Some).map_err(|_| {
            PollerError::Configuration(format!("{key} must be a non-negative integer, got {s:?}"))
        }),
        Some(other) => Err(PollerError::Configuration(format!(
            "{key} must be a non-negative integer, got {other}"
        ))),
    }
}
