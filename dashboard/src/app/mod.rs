//! Composition root.
//!
//! [`AppState`] owns the three slices and the toast queue. It is built once
//! by the binary (or a test) and passed by reference to the inbound adapter;
//! there is no global store.

pub mod config;

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::info;

pub use config::{DashboardSettings, IdStrategy, InvalidSetting, LogFormat};

use crate::domain::ports::{
    AuthGateway, CollectionGateway, IdProvider, LatencySleeper, TokenStore, TokenStoreError,
};
use crate::domain::slices::{AuthSlice, CollectionSlice, ProductsSlice, UsersSlice};
use crate::domain::{Product, User};
use crate::outbound::simulated::fixtures::LAST_REFERENCE_ID;
use crate::outbound::{
    FileTokenStore, SequentialIdProvider, SimulatedBackend, ToastQueue, UuidIdProvider,
};

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A setting could not be interpreted.
    #[error(transparent)]
    Setting(#[from] InvalidSetting),
    /// The token store could not be opened.
    #[error("failed to open token store: {0}")]
    TokenStore(#[from] TokenStoreError),
}

/// Adapters the slices are wired to.
pub struct AppPorts {
    /// Authentication backend.
    pub auth: Arc<dyn AuthGateway>,
    /// Users backend.
    pub users: Arc<dyn CollectionGateway<User>>,
    /// Products backend.
    pub products: Arc<dyn CollectionGateway<Product>>,
    /// Session token storage.
    pub token_store: Arc<dyn TokenStore>,
    /// Clock driving toast expiry.
    pub clock: Arc<dyn Clock>,
}

impl AppPorts {
    /// Wire every gateway to one simulated backend.
    pub fn simulated(
        backend: SimulatedBackend,
        token_store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let backend = Arc::new(backend);
        Self {
            auth: backend.clone(),
            users: backend.clone(),
            products: backend,
            token_store,
            clock,
        }
    }
}

/// Application state shared by the inbound adapters.
pub struct AppState {
    auth: AuthSlice,
    users: UsersSlice,
    products: ProductsSlice,
    toasts: Arc<ToastQueue>,
}

impl AppState {
    /// Assemble the slices over `ports`.
    pub fn new(ports: AppPorts) -> Self {
        let toasts = Arc::new(ToastQueue::new(ports.clock));
        Self {
            auth: AuthSlice::new(ports.auth, ports.token_store, toasts.clone()),
            users: CollectionSlice::new(ports.users, toasts.clone()),
            products: CollectionSlice::new(ports.products, toasts.clone()),
            toasts,
        }
    }

    /// Assemble the application described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] when a setting is invalid or the token
    /// directory cannot be opened.
    pub fn from_settings(
        settings: &DashboardSettings,
        sleeper: Arc<dyn LatencySleeper>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StartupError> {
        let ids: Arc<dyn IdProvider> = match settings.id_strategy()? {
            IdStrategy::Sequential => {
                Arc::new(SequentialIdProvider::starting_after(LAST_REFERENCE_ID))
            }
            IdStrategy::Uuid => Arc::new(UuidIdProvider),
        };
        let token_dir = settings.token_dir();
        let token_store = FileTokenStore::open(&token_dir, settings.token_key())?;
        let backend = SimulatedBackend::new(settings.latency(), sleeper, clock.clone(), ids);
        info!(
            latency_ms = settings.latency_ms,
            token_dir = %token_dir.display(),
            token_key = token_store.key(),
            "dashboard assembled"
        );
        Ok(Self::new(AppPorts::simulated(
            backend,
            Arc::new(token_store),
            clock,
        )))
    }

    /// Authentication slice.
    pub fn auth(&self) -> &AuthSlice {
        &self.auth
    }

    /// Users slice.
    pub fn users(&self) -> &UsersSlice {
        &self.users
    }

    /// Products slice.
    pub fn products(&self) -> &ProductsSlice {
        &self.products
    }

    /// Toasts emitted by every slice.
    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }
}
