//! Provider configuration loaded from `QCLOUD_*` environment variables.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::dns01::{DEFAULT_POLLING_INTERVAL, DEFAULT_PROPAGATION_TIMEOUT};
use crate::error::ProviderError;
use crate::utils::log_sanitizer::mask_secret;

pub const ENV_SECRET_ID: &str = "QCLOUD_SECRET_ID";
pub const ENV_SECRET_KEY: &str = "QCLOUD_SECRET_KEY";
pub const ENV_TTL: &str = "QCLOUD_TTL";
pub const ENV_PROPAGATION_TIMEOUT: &str = "QCLOUD_PROPAGATION_TIMEOUT";
pub const ENV_POLLING_INTERVAL: &str = "QCLOUD_POLLING_INTERVAL";
pub const ENV_HTTP_TIMEOUT: &str = "QCLOUD_HTTP_TIMEOUT";
pub const ENV_MAX_RETRIES: &str = "QCLOUD_MAX_RETRIES";

/// TTL of the challenge record, in seconds.
pub const DEFAULT_TTL: u32 = 600;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 缺少凭证环境变量（或为空）
    #[error("some credentials information are missing: {}", .0.join(","))]
    MissingCredentials(Vec<String>),

    /// 凭证为空
    #[error("credentials missing")]
    EmptySecretKey,
}

impl From<ConfigError> for ProviderError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration {
            provider: crate::PROVIDER_NAME.to_string(),
            detail: err.to_string(),
        }
    }
}

/// Configuration of a [`QcloudDnsProvider`](crate::QcloudDnsProvider).
#[derive(Clone)]
pub struct Config {
    pub secret_id: String,
    pub secret_key: String,
    /// TTL of created TXT records, seconds.
    pub ttl: u32,
    pub propagation_timeout: Duration,
    pub polling_interval: Duration,
    /// Per-request HTTP timeout; `None` keeps the client default (30s).
    pub http_timeout: Option<Duration>,
    /// Retries for transient failures (network errors, timeouts, rate limits
    /// from HTTP 429 or the response envelope); `0` sends each request once.
    pub max_retries: u32,
}

impl Config {
    /// Config with the given credentials and default settings.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            ttl: DEFAULT_TTL,
            propagation_timeout: DEFAULT_PROPAGATION_TIMEOUT,
            polling_interval: DEFAULT_POLLING_INTERVAL,
            http_timeout: None,
            max_retries: 0,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Both credentials are required. Optional settings that fail to parse keep
    /// their default and log a warning.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret_id = required(ENV_SECRET_ID);
        let secret_key = required(ENV_SECRET_KEY);

        let (Some(secret_id), Some(secret_key)) = (secret_id.clone(), secret_key.clone()) else {
            let missing = [(ENV_SECRET_ID, secret_id), (ENV_SECRET_KEY, secret_key)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(key, _)| key.to_string())
                .collect();
            return Err(ConfigError::MissingCredentials(missing));
        };

        let mut config = Self::new(secret_id, secret_key);
        config.ttl = parse_or_default(&lookup, ENV_TTL, DEFAULT_TTL);
        config.propagation_timeout = Duration::from_secs(parse_or_default(
            &lookup,
            ENV_PROPAGATION_TIMEOUT,
            DEFAULT_PROPAGATION_TIMEOUT.as_secs(),
        ));
        config.polling_interval = Duration::from_secs(parse_or_default(
            &lookup,
            ENV_POLLING_INTERVAL,
            DEFAULT_POLLING_INTERVAL.as_secs(),
        ));
        config.http_timeout = match parse_or_default(&lookup, ENV_HTTP_TIMEOUT, 0_u64) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        config.max_retries = parse_or_default(&lookup, ENV_MAX_RETRIES, 0);

        Ok(config)
    }

    /// Checks the invariants a provider needs before talking to the API.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret_key.is_empty() {
            return Err(ConfigError::EmptySecretKey);
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret_id", &mask_secret(&self.secret_id))
            .field("secret_key", &"****")
            .field("ttl", &self.ttl)
            .field("propagation_timeout", &self.propagation_timeout)
            .field("polling_interval", &self.polling_interval)
            .field("http_timeout", &self.http_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy + fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            log::warn!("{key}={raw:?} is not a valid number, using default {default}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_applied_when_only_credentials_set() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_SECRET_ID, "AKIDexample"),
            (ENV_SECRET_KEY, "secret"),
        ]))
        .unwrap_or_else(|e| panic!("config should load: {e}"));

        assert_eq!(config.secret_id, "AKIDexample");
        assert_eq!(config.secret_key, "secret");
        assert_eq!(config.ttl, 600);
        assert_eq!(config.propagation_timeout, Duration::from_secs(60));
        assert_eq!(config.polling_interval, Duration::from_secs(2));
        assert_eq!(config.http_timeout, None);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn optional_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_SECRET_ID, "id"),
            (ENV_SECRET_KEY, "key"),
            (ENV_TTL, "120"),
            (ENV_PROPAGATION_TIMEOUT, "300"),
            (ENV_POLLING_INTERVAL, " 10 "),
            (ENV_HTTP_TIMEOUT, "15"),
            (ENV_MAX_RETRIES, "3"),
        ]))
        .unwrap_or_else(|e| panic!("config should load: {e}"));

        assert_eq!(config.ttl, 120);
        assert_eq!(config.propagation_timeout, Duration::from_secs(300));
        assert_eq!(config.polling_interval, Duration::from_secs(10));
        assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn invalid_optional_value_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_SECRET_ID, "id"),
            (ENV_SECRET_KEY, "key"),
            (ENV_TTL, "ten minutes"),
            (ENV_POLLING_INTERVAL, "-1"),
        ]))
        .unwrap_or_else(|e| panic!("config should load: {e}"));

        assert_eq!(config.ttl, DEFAULT_TTL);
        assert_eq!(config.polling_interval, DEFAULT_POLLING_INTERVAL);
    }

    #[test]
    fn zero_http_timeout_means_client_default() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_SECRET_ID, "id"),
            (ENV_SECRET_KEY, "key"),
            (ENV_HTTP_TIMEOUT, "0"),
        ]))
        .unwrap_or_else(|e| panic!("config should load: {e}"));

        assert_eq!(config.http_timeout, None);
    }

    #[test]
    fn missing_credentials_are_all_reported() {
        let err = Config::from_lookup(lookup_from(&[])).err();
        assert_eq!(
            err,
            Some(ConfigError::MissingCredentials(vec![
                ENV_SECRET_ID.to_string(),
                ENV_SECRET_KEY.to_string(),
            ]))
        );
    }

    #[test]
    fn blank_secret_key_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            (ENV_SECRET_ID, "id"),
            (ENV_SECRET_KEY, "  "),
        ]))
        .err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("some credentials information are missing: QCLOUD_SECRET_KEY".to_string())
        );
    }

    #[test]
    fn validate_rejects_empty_secret_key() {
        let config = Config::new("id", "");
        assert_eq!(config.validate(), Err(ConfigError::EmptySecretKey));
        assert!(Config::new("id", "key").validate().is_ok());
    }

    #[test]
    fn debug_output_hides_secret_key() {
        let config = Config::new("AKIDexample", "super-secret-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("AKID****"));
    }

    #[test]
    fn config_error_converts_to_provider_error() {
        let err: ProviderError = ConfigError::EmptySecretKey.into();
        assert_eq!(err.to_string(), "[qcloud] Configuration error: credentials missing");
    }
}
