//! Tests for environment-driven configuration.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use hcc_events::auth::AuthMode;
use hcc_events::config::{PollConfig, DEFAULT_INSTANCE, DEFAULT_TOKEN_URL};
use hcc_events::error::PollerError;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 8] = [
    "HCC_HOST",
    "HCC_TOKEN",
    "HCC_PROXY",
    "HCC_TOKEN_URL",
    "HCC_CLIENT_ID",
    "HCC_CLIENT_SECRET",
    "HCC_QUERY",
    "HCC_INTERVAL",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clear_config_env() {
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
}

#[test]
fn from_env_reads_static_token_and_overrides() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();
    std::env::set_var("HCC_HOST", "https://console.example.com");
    std::env::set_var("HCC_TOKEN", "env-token");
    std::env::set_var("HCC_PROXY", "http://proxy.example.com:3128");
    std::env::set_var("HCC_QUERY", "limit=5");
    std::env::set_var("HCC_INTERVAL", "15");

    let config = PollConfig::from_env().expect("config");

    assert_eq!(config.instance(), "https://console.example.com");
    assert_eq!(config.proxy(), Some("http://proxy.example.com:3128"));
    assert_eq!(config.query(), Some("limit=5"));
    assert_eq!(config.interval(), Duration::from_secs(15));
    match config.auth() {
        AuthMode::Static(credential) => assert_eq!(credential.as_str(), "env-token"),
        other => panic!("expected static mode, got {other:?}"),
    }
}

#[test]
fn from_env_selects_client_credentials_with_default_token_url() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();
    std::env::set_var("HCC_CLIENT_ID", "svc-id");
    std::env::set_var("HCC_CLIENT_SECRET", "svc-secret");

    let config = PollConfig::from_env().expect("config");

    assert_eq!(config.instance(), DEFAULT_INSTANCE);
    match config.auth() {
        AuthMode::ClientCredentials { token_url, .. } => {
            assert_eq!(token_url, DEFAULT_TOKEN_URL)
        }
        other => panic!("expected client credentials, got {other:?}"),
    }
}

#[test]
fn from_env_without_credentials_is_a_configuration_error() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();
    std::env::set_var("HCC_HOST", "https://console.example.com");

    let err = PollConfig::from_env().unwrap_err();

    assert!(matches!(err, PollerError::Configuration(_)));
}

#[test]
fn from_env_treats_empty_proxy_as_direct() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();
    std::env::set_var("HCC_TOKEN", "t");
    std::env::set_var("HCC_PROXY", "");

    let config = PollConfig::from_env().expect("config");

    assert_eq!(config.proxy(), None);
}
