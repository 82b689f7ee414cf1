//! Session middleware configuration.
//!
//! Sessions use tower-sessions' in-memory store and only identify the
//! visitor; see [`crate::services::visitors`]. Everything vanishes when the
//! process restarts.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::RegisterConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "easebarkod_session";

/// Session expiry time in seconds (1 hour of inactivity).
pub const SESSION_EXPIRY_SECONDS: i64 = 60 * 60;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &RegisterConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
