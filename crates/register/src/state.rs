//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::RegisterConfig;
use crate::services::{LoginClient, LoginError, MockCatalog, VisitorStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RegisterConfig,
    login_client: LoginClient,
    catalog: MockCatalog,
    visitors: VisitorStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the login HTTP client cannot be built.
    pub fn new(config: RegisterConfig) -> Result<Self, LoginError> {
        let login_client = LoginClient::new(&config.login)?;
        let catalog = config
            .mock_price
            .map_or_else(MockCatalog::new, MockCatalog::with_fixed_price);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                login_client,
                catalog,
                visitors: VisitorStore::new(),
            }),
        })
    }

    /// Get a reference to the register configuration.
    #[must_use]
    pub fn config(&self) -> &RegisterConfig {
        &self.inner.config
    }

    /// Get a reference to the upstream login client.
    #[must_use]
    pub fn login_client(&self) -> &LoginClient {
        &self.inner.login_client
    }

    /// Get a reference to the mock product catalog.
    #[must_use]
    pub fn catalog(&self) -> &MockCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the per-visitor state store.
    #[must_use]
    pub fn visitors(&self) -> &VisitorStore {
        &self.inner.visitors
    }
}
