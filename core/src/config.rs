use std::env;
use std::time::Duration;

use thiserror::Error;

/// Environment variable holding the base URL that relative sources are joined to.
pub const BUCKET_HOST_VAR: &str = "BUCKET_HOST";
/// Environment variable holding an optional fetch timeout in whole seconds.
pub const FETCH_TIMEOUT_VAR: &str = "FETCH_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid FETCH_TIMEOUT_SECS value: {0:?}")]
    InvalidTimeout(String),
}

/// Process-wide settings, read once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL for `rel` sources. `None` when the variable is unset or empty.
    pub bucket_host: Option<String>,
    /// Upper bound on one upstream fetch. `None` keeps the transport defaults.
    pub fetch_timeout: Option<Duration>,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket_host = lookup(BUCKET_HOST_VAR).filter(|v| !v.is_empty());

        let fetch_timeout = match lookup(FETCH_TIMEOUT_VAR).filter(|v| !v.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            bucket_host,
            fetch_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_reads_bucket_host_and_timeout() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (BUCKET_HOST_VAR, "https://cdn.example.com/"),
            (FETCH_TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(config.bucket_host.as_deref(), Some("https://cdn.example.com/"));
        assert_eq!(config.fetch_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_empty_bucket_host_is_unset() {
        let config = ServiceConfig::from_lookup(lookup(&[(BUCKET_HOST_VAR, "")])).unwrap();
        assert!(config.bucket_host.is_none());
    }

    #[test]
    fn test_rejects_bad_timeout() {
        for bad in ["0", "-3", "soon", "1.5"] {
            let result = ServiceConfig::from_lookup(lookup(&[(FETCH_TIMEOUT_VAR, bad)]));
            assert!(matches!(result, Err(ConfigError::InvalidTimeout(_))), "{bad}");
        }
    }
}
