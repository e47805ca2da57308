//! Configuration management for the Flipopay payout gateway.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use flipopay_forwarder::ClientConfig;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The only value without a usable default is the upstream secret: the
/// gateway refuses to start until `FLIPOPAY_SECRET_KEY` is set, since the
/// forwarder cannot function without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared secret sent to the upstream API as `X-Secret-Key`.
    ///
    /// Environment variable: `FLIPOPAY_SECRET_KEY`
    #[serde(default, alias = "FLIPOPAY_SECRET_KEY")]
    pub flipopay_secret_key: String,

    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,

    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,

    /// Upstream payout initiation endpoint.
    ///
    /// Environment variable: `UPSTREAM_URL`
    #[serde(default = "default_upstream_url", alias = "UPSTREAM_URL")]
    pub upstream_url: String,

    /// Inbound HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    /// Timeout for the upstream round-trip in seconds.
    ///
    /// Environment variable: `UPSTREAM_TIMEOUT_SECONDS`
    #[serde(default = "default_upstream_timeout", alias = "UPSTREAM_TIMEOUT_SECONDS")]
    pub upstream_timeout_seconds: u64,

    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be read or when validation rejects the
    /// merged result (for example, a missing secret key).
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Converts to the forwarder client configuration.
    pub fn to_forwarder_config(&self) -> ClientConfig {
        ClientConfig {
            upstream_url: self.upstream_url.clone(),
            secret_key: self.flipopay_secret_key.clone(),
            timeout: Duration::from_secs(self.upstream_timeout_seconds),
            user_agent: format!("Flipopay-Gateway/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Parse server socket address from host and port configuration.
    ///
    /// # Errors
    ///
    /// Fails when the host/port pair does not form a valid socket address.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Returns the secret key masked for logging.
    pub fn secret_key_masked(&self) -> String {
        if self.flipopay_secret_key.is_empty() {
            "(unset)".to_string()
        } else {
            "***".to_string()
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.flipopay_secret_key.is_empty() {
            anyhow::bail!("FLIPOPAY_SECRET_KEY must be set");
        }

        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://") {
            anyhow::bail!("upstream_url must be an http(s) URL");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.upstream_timeout_seconds == 0 {
            anyhow::bail!("upstream_timeout_seconds must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flipopay_secret_key: String::new(),
            host: default_host(),
            port: default_port(),
            upstream_url: default_upstream_url(),
            request_timeout: default_request_timeout(),
            upstream_timeout_seconds: default_upstream_timeout(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_upstream_url() -> String {
    "https://prod-server.flipopay.com/api/v1/payouts/initiate".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_upstream_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, env, sync::Mutex};

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct TestEnvGuard {
        _lock: std::sync::MutexGuard<'static, ()>,
        vars: Vec<String>,
        originals: HashMap<String, Option<String>>,
    }

    impl TestEnvGuard {
        fn new() -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Self { _lock: lock, vars: Vec::new(), originals: HashMap::new() }
        }

        fn set_var(&mut self, key: &str, value: &str) {
            if !self.vars.contains(&key.to_string()) {
                self.originals.insert(key.to_string(), env::var(key).ok());
                self.vars.push(key.to_string());
            }
            env::set_var(key, value);
        }
    }

    impl Drop for TestEnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                match self.originals.get(var) {
                    Some(Some(value)) => env::set_var(var, value),
                    Some(None) => env::remove_var(var),
                    None => {},
                }
            }
        }
    }

    #[test]
    fn defaults_match_contract() {
        let config = Config::default();

        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(
            config.upstream_url,
            "https://prod-server.flipopay.com/api/v1/payouts/initiate"
        );
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.upstream_timeout_seconds, 30);
    }

    #[test]
    fn missing_secret_key_rejected() {
        let config = Config::default();

        let err = config.validate().expect_err("empty secret must be rejected");
        assert!(err.to_string().contains("FLIPOPAY_SECRET_KEY"));
    }

    #[test]
    fn env_overrides_take_priority() {
        let mut guard = TestEnvGuard::new();
        guard.set_var("FLIPOPAY_SECRET_KEY", "test-secret");
        guard.set_var("PORT", "9090");
        guard.set_var("HOST", "127.0.0.1");
        guard.set_var("UPSTREAM_URL", "http://localhost:4000/api/v1/payouts/initiate");
        guard.set_var("UPSTREAM_TIMEOUT_SECONDS", "5");

        let config = Config::load().expect("config should load with env overrides");

        assert_eq!(config.flipopay_secret_key, "test-secret");
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.upstream_url, "http://localhost:4000/api/v1/payouts/initiate");
        assert_eq!(config.upstream_timeout_seconds, 5);
    }

    #[test]
    fn invalid_values_fail_validation() {
        let mut config = Config::default();
        config.flipopay_secret_key = "secret".to_string();

        config.port = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.flipopay_secret_key = "secret".to_string();
        config.upstream_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.flipopay_secret_key = "secret".to_string();
        config.request_timeout = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn secret_key_masked_in_logs() {
        let mut config = Config::default();
        assert_eq!(config.secret_key_masked(), "(unset)");

        config.flipopay_secret_key = "super-secret-key".to_string();
        let masked = config.secret_key_masked();
        assert!(!masked.contains("super-secret-key"));
    }

    #[test]
    fn socket_address_parsing() {
        let mut config = Config::default();
        config.host = "127.0.0.1".to_string();
        config.port = 9000;

        let addr = config.parse_server_addr().expect("should parse socket address");

        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 9000);
    }

    #[test]
    fn forwarder_config_conversion() {
        let mut config = Config::default();
        config.flipopay_secret_key = "secret".to_string();
        config.upstream_timeout_seconds = 12;

        let client_config = config.to_forwarder_config();

        assert_eq!(client_config.upstream_url, config.upstream_url);
        assert_eq!(client_config.secret_key, "secret");
        assert_eq!(client_config.timeout.as_secs(), 12);
    }
}
