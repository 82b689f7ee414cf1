//! Login credentials and the session token issued in exchange.

use secrecy::{ExposeSecret, SecretString};

/// Name of the cookie the session token is written to.
pub const SESSION_TOKEN_COOKIE: &str = "session_token";

/// Lifetime of the session token cookie in seconds (1 hour).
pub const SESSION_TOKEN_MAX_AGE_SECONDS: i64 = 60 * 60;

/// Username and password for a single login attempt.
///
/// Only lives for the duration of the request; never stored.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Opaque token issued by the login endpoint.
#[derive(Debug, Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
