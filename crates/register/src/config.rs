//! Register configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `REGISTER_HOST` - Bind address (default: 127.0.0.1)
//! - `REGISTER_PORT` - Listen port (default: 3000)
//! - `REGISTER_BASE_URL` - Public URL of the register (default: <http://localhost:3000>)
//! - `REGISTER_LOGIN_ENDPOINT` - Upstream login URL (default: <http://127.0.0.1:8080/api/login>)
//! - `REGISTER_LOGIN_TIMEOUT_SECS` - Upstream login request timeout (default: 30)
//! - `REGISTER_MOCK_PRICE` - Fixed price for scanned products instead of a random one
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use easebarkod_core::Price;
use rust_decimal::Decimal;
use thiserror::Error;
use url::Url;

const DEFAULT_LOGIN_ENDPOINT: &str = "http://127.0.0.1:8080/api/login";
const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Register application configuration.
#[derive(Debug, Clone)]
pub struct RegisterConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the register
    pub base_url: String,
    /// Upstream login endpoint configuration
    pub login: LoginConfig,
    /// Fixed price for mock products (random when unset)
    pub mock_price: Option<Decimal>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Upstream login endpoint configuration.
#[derive(Debug, Clone)]
pub struct LoginConfig {
    /// URL credentials are posted to
    pub endpoint: Url,
    /// Request timeout
    pub timeout: Duration,
}

impl RegisterConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("REGISTER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("REGISTER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("REGISTER_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("REGISTER_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("REGISTER_BASE_URL", "http://localhost:3000");

        let login = LoginConfig::from_env()?;
        let mock_price = get_optional_env("REGISTER_MOCK_PRICE")
            .map(|raw| parse_mock_price(&raw))
            .transpose()?;

        Ok(Self {
            host,
            port,
            base_url,
            login,
            mock_price,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the register is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl LoginConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(&get_env_or_default(
            "REGISTER_LOGIN_ENDPOINT",
            DEFAULT_LOGIN_ENDPOINT,
        ))?;
        let timeout = parse_timeout(&get_env_or_default(
            "REGISTER_LOGIN_TIMEOUT_SECS",
            &DEFAULT_LOGIN_TIMEOUT_SECS.to_string(),
        ))?;
        Ok(Self { endpoint, timeout })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("REGISTER_LOGIN_ENDPOINT".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "REGISTER_LOGIN_ENDPOINT".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            "REGISTER_LOGIN_TIMEOUT_SECS".to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::InvalidEnvVar(
            "REGISTER_LOGIN_TIMEOUT_SECS".to_string(),
            e.to_string(),
        )),
    }
}

fn parse_mock_price(raw: &str) -> Result<Decimal, ConfigError> {
    Price::parse(raw)
        .map(|price| price.amount)
        .map_err(|e| ConfigError::InvalidEnvVar("REGISTER_MOCK_PRICE".to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn default_login() -> LoginConfig {
        LoginConfig {
            endpoint: parse_endpoint(DEFAULT_LOGIN_ENDPOINT).unwrap(),
            timeout: Duration::from_secs(DEFAULT_LOGIN_TIMEOUT_SECS),
        }
    }

    #[test]
    fn test_default_endpoint_parses() {
        assert_eq!(default_login().endpoint.path(), "/api/login");
    }

    #[test]
    fn test_parse_endpoint_rejects_non_http() {
        let err = parse_endpoint("ftp://example.com/api/login").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
        assert!(parse_endpoint("not a url").is_err());
        assert!(parse_endpoint("https://auth.example.com/api/login").is_ok());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("5").unwrap(), Duration::from_secs(5));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_parse_mock_price_accepts_comma() {
        assert_eq!(parse_mock_price("12,5").unwrap(), Decimal::new(125, 1));
        assert!(parse_mock_price("free").is_err());
    }

    #[test]
    fn test_socket_addr_and_secure() {
        let config = RegisterConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://kasa.example.com".to_string(),
            login: default_login(),
            mock_price: None,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(config.is_secure());
    }
}
