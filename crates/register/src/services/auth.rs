//! Client for the upstream login endpoint.
//!
//! Sends `POST <endpoint>` with `{ "username", "password" }` and expects
//! `{ "token"?: string }` back on success. Any non-2xx status is an
//! authentication failure; the caller does not distinguish it from a
//! transport error.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::LoginConfig;
use crate::models::{Credentials, SessionToken};

/// Errors that can occur when calling the login endpoint.
#[derive(Debug, Error)]
pub enum LoginError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("login rejected with status {status}")]
    Rejected { status: u16 },

    /// Success response body was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Issued token cannot be stored in a cookie as-is.
    #[error("token contains characters not allowed in a cookie value")]
    InvalidToken,
}

/// Outcome of a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    /// Token to persist, if the endpoint issued one.
    pub token: Option<SessionToken>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Client for the upstream login endpoint.
#[derive(Clone)]
pub struct LoginClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl LoginClient {
    /// Create a new login client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &LoginConfig) -> Result<Self, LoginError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Submit credentials once. No retry.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] on transport failure, non-2xx status, or a
    /// malformed success body.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, LoginError> {
        let body = LoginRequest {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LoginError::Rejected {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let parsed = parse_login_response(&bytes)?;

        tracing::debug!(token_issued = parsed.token.is_some(), "Login accepted");
        Ok(parsed)
    }
}

/// `cookie-octet` from RFC 6265: visible ASCII except `"`, `,`, `;` and `\`.
const fn is_cookie_octet(byte: u8) -> bool {
    matches!(byte, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

/// Parse a success body. Empty tokens are treated as absent.
fn parse_login_response(bytes: &[u8]) -> Result<LoginOutcome, LoginError> {
    let response: LoginResponse =
        serde_json::from_slice(bytes).map_err(|e| LoginError::Parse(e.to_string()))?;

    let token = response.token.filter(|token| !token.is_empty());
    if token
        .as_deref()
        .is_some_and(|token| !token.bytes().all(is_cookie_octet))
    {
        return Err(LoginError::InvalidToken);
    }

    Ok(LoginOutcome {
        token: token.map(SessionToken::new),
    })
}
