//! Per-visitor state keyed by session id.
//!
//! The session layer persists its record after the handler returns, so
//! read-modify-write cycles on session data race between concurrent
//! requests. Visitor state is kept here instead, one async mutex per
//! session, and handlers hold the lock for the whole mutation.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use tower_sessions::{Session, session::Id};

use crate::error::{AppError, Result};
use crate::middleware::session::SESSION_EXPIRY_SECONDS;
use crate::models::{Visitor, session_keys};

/// Shared, lockable state of one visitor.
pub type VisitorHandle = Arc<Mutex<Visitor>>;

/// Upper bound on concurrently tracked visitors.
const MAX_VISITORS: u64 = 10_000;

/// In-memory visitor states, evicted after the same inactivity period as
/// the session cookie.
#[derive(Clone)]
pub struct VisitorStore {
    cache: Cache<Id, VisitorHandle>,
}

impl Default for VisitorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VisitorStore {
    #[must_use]
    pub fn new() -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_VISITORS)
            .time_to_idle(Duration::from_secs(SESSION_EXPIRY_SECONDS.unsigned_abs()))
            .build();

        Self { cache }
    }

    /// State for a session id, created empty on first use.
    pub async fn get(&self, id: Id) -> VisitorHandle {
        self.cache.get_with(id, async { VisitorHandle::default() }).await
    }

    /// State for the visitor behind `session`.
    ///
    /// A session without a stored record (new visitor, or an expired cookie)
    /// is saved first so it has an id to key on.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the session store fails.
    pub async fn for_session(&self, session: &Session) -> Result<VisitorHandle> {
        if session
            .get::<bool>(session_keys::ESTABLISHED)
            .await?
            .is_none()
        {
            session.insert(session_keys::ESTABLISHED, true).await?;
            session.save().await?;
        }

        let id = session
            .id()
            .ok_or_else(|| AppError::Internal("session has no id after save".to_string()))?;
        Ok(self.get(id).await)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use easebarkod_core::{LineItem, Quantity};
    use rust_decimal::Decimal;
    use tower_sessions::MemoryStore;

    use super::*;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_same_id_shares_state() {
        let store = VisitorStore::new();
        let id = Id::default();

        store.get(id).await.lock().await.cart.add_product(LineItem::new(
            "Elma",
            "111",
            Decimal::from(10),
            Quantity::ONE,
        ));

        assert_eq!(store.get(id).await.lock().await.cart.len(), 1);
        assert!(store.get(Id::default()).await.lock().await.cart.is_empty());
    }

    #[tokio::test]
    async fn test_for_session_establishes_new_session() {
        let store = VisitorStore::new();
        let session = new_session();
        assert!(session.id().is_none());

        let first = store.for_session(&session).await.unwrap();
        assert!(session.id().is_some());

        let second = store.for_session(&session).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
