use std::time::Duration;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};

use crate::common::RetryConfig;

/// Default CQL native transport port
pub const DEFAULT_PORT: u16 = 9042;

/// Host used when nothing is configured: the compose service name
pub const DEFAULT_HOST: &str = "cassandra";

/// Cassandra/ScyllaDB connection settings
///
/// Built once at startup and never mutated afterwards; the `with_*` methods
/// consume and return the config.
///
/// # Example
///
/// ```ignore
/// use database::cassandra::ConnectionConfig;
/// use std::time::Duration;
///
/// let config = ConnectionConfig::new("127.0.0.1")
///     .with_retry_attempts(5)
///     .with_retry_delay(Duration::from_secs(2));
///
/// // From environment variables (requires `config` feature)
/// let config = ConnectionConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionConfig {
    host: String,
    port: u16,
    retry_attempts: u32,
    retry_delay: Duration,
    connect_timeout: Duration,
    username: Option<String>,
    password: Option<String>,
}

impl ConnectionConfig {
    /// Create a config for `host` with default port and retry budget
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Total number of connection attempts made at startup
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    /// Pause between two connection attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Username and password, only when both are set
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    /// `host:port` as handed to the driver. IPv6 literals are bracketed.
    pub fn contact_point(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// The startup retry policy described by this config
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .with_max_attempts(self.retry_attempts)
            .with_delay(self.retry_delay)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            retry_attempts: 10,
            retry_delay: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            username: None,
            password: None,
        }
    }
}

/// Load ConnectionConfig from environment variables
///
/// Environment variables:
/// - `CASSANDRA_HOST` (optional, default: `cassandra`)
/// - `CASSANDRA_PORT` (optional, default: 9042)
/// - `CASSANDRA_RETRY_ATTEMPTS` (optional, default: 10, must be at least 1)
/// - `CASSANDRA_RETRY_DELAY_SECS` (optional, default: 10)
/// - `CASSANDRA_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `CASSANDRA_USERNAME` / `CASSANDRA_PASSWORD` (optional)
#[cfg(feature = "config")]
impl FromEnv for ConnectionConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("CASSANDRA_HOST", DEFAULT_HOST).trim().to_string();
        if host.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CASSANDRA_HOST".to_string(),
                details: "host must not be empty".to_string(),
            });
        }

        let retry_attempts: u32 = env_parse("CASSANDRA_RETRY_ATTEMPTS", 10)?;
        if retry_attempts == 0 {
            return Err(ConfigError::ParseError {
                key: "CASSANDRA_RETRY_ATTEMPTS".to_string(),
                details: "at least one attempt is required".to_string(),
            });
        }

        let mut config = ConnectionConfig::new(host)
            .with_port(env_parse("CASSANDRA_PORT", DEFAULT_PORT)?)
            .with_retry_attempts(retry_attempts)
            .with_retry_delay(Duration::from_secs(env_parse(
                "CASSANDRA_RETRY_DELAY_SECS",
                10,
            )?))
            .with_connect_timeout(Duration::from_secs(env_parse(
                "CASSANDRA_CONNECT_TIMEOUT_SECS",
                10,
            )?));

        if let (Ok(username), Ok(password)) = (
            std::env::var("CASSANDRA_USERNAME"),
            std::env::var("CASSANDRA_PASSWORD"),
        ) {
            config = config.with_credentials(username, password);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_config_defaults() {
        let config = ConnectionConfig::default();
        assert_eq!(config.host(), "cassandra");
        assert_eq!(config.port(), 9042);
        assert_eq!(config.retry_attempts(), 10);
        assert_eq!(config.retry_delay(), Duration::from_secs(10));
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_connection_config_builder_pattern() {
        let config = ConnectionConfig::new("bad-host")
            .with_port(19042)
            .with_retry_attempts(2)
            .with_retry_delay(Duration::ZERO)
            .with_credentials("cassandra", "secret");

        assert_eq!(config.contact_point(), "bad-host:19042");
        assert_eq!(config.retry_attempts(), 2);
        assert_eq!(config.retry_delay(), Duration::ZERO);
        assert_eq!(config.credentials(), Some(("cassandra", "secret")));
    }

    #[test]
    fn test_contact_point_brackets_ipv6() {
        let config = ConnectionConfig::new("::1");
        assert_eq!(config.contact_point(), "[::1]:9042");
    }

    #[test]
    fn test_retry_config_mirrors_connection_config() {
        let retry = ConnectionConfig::new("localhost")
            .with_retry_attempts(3)
            .with_retry_delay(Duration::from_millis(250))
            .retry_config();

        assert_eq!(retry.max_attempts, 3);
        assert_eq!(retry.delay, Duration::from_millis(250));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_connection_config_from_env() {
        temp_env::with_vars(
            [
                ("CASSANDRA_HOST", Some("db.internal")),
                ("CASSANDRA_PORT", Some("19042")),
                ("CASSANDRA_RETRY_ATTEMPTS", Some("2")),
                ("CASSANDRA_RETRY_DELAY_SECS", Some("0")),
                ("CASSANDRA_USERNAME", Some("svc")),
                ("CASSANDRA_PASSWORD", Some("pw")),
            ],
            || {
                let config = ConnectionConfig::from_env().unwrap();
                assert_eq!(config.contact_point(), "db.internal:19042");
                assert_eq!(config.retry_attempts(), 2);
                assert_eq!(config.retry_delay(), Duration::ZERO);
                assert_eq!(config.credentials(), Some(("svc", "pw")));
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_connection_config_from_env_defaults() {
        temp_env::with_vars_unset(
            [
                "CASSANDRA_HOST",
                "CASSANDRA_PORT",
                "CASSANDRA_RETRY_ATTEMPTS",
                "CASSANDRA_RETRY_DELAY_SECS",
                "CASSANDRA_CONNECT_TIMEOUT_SECS",
                "CASSANDRA_USERNAME",
                "CASSANDRA_PASSWORD",
            ],
            || {
                let config = ConnectionConfig::from_env().unwrap();
                assert_eq!(config, ConnectionConfig::default());
            },
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_connection_config_rejects_zero_attempts() {
        temp_env::with_var("CASSANDRA_RETRY_ATTEMPTS", Some("0"), || {
            let err = ConnectionConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("CASSANDRA_RETRY_ATTEMPTS"));
        });
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_connection_config_rejects_bad_port() {
        temp_env::with_var("CASSANDRA_PORT", Some("ninety"), || {
            assert!(ConnectionConfig::from_env().is_err());
        });
    }
}
