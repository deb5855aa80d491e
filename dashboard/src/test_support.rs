//! Test utilities for the dashboard crate.
//!
//! Shared doubles for unit tests (in `src/`) and integration tests (in
//! `tests/`). Only compiled for tests or with the `test-support` feature.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use tempfile::TempDir;

use crate::app::{AppPorts, AppState};
use crate::domain::ports::{LatencySleeper, Notifier, TokenStore, TokenStoreError};
use crate::domain::{AccessToken, Notification, Product, ResourceId, Role, User};
use crate::outbound::simulated::fixtures::LAST_REFERENCE_ID;
use crate::outbound::{FileTokenStore, SequentialIdProvider, SimulatedBackend};

/// Fixed instant used by [`FixtureClock`].
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).single() {
        Some(timestamp) => timestamp,
        None => panic!("valid fixture timestamp"),
    }
}

/// Clock frozen at a settable instant.
#[derive(Debug)]
pub struct FixtureClock(Mutex<DateTime<Utc>>);

impl FixtureClock {
    /// Clock frozen at [`fixture_timestamp`].
    pub fn new() -> Self {
        Self::at(fixture_timestamp())
    }

    /// Clock frozen at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Shared handle, ready to inject.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: Duration) {
        let delta = match chrono::TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => panic!("failed to convert Duration to TimeDelta: {error}"),
        };
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) += delta;
    }
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Sleeper that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait]
impl LatencySleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Sleeper that records requested durations and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper(Mutex<Vec<Duration>>);

impl RecordingSleeper {
    /// Durations requested so far.
    pub fn calls(&self) -> Vec<Duration> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl LatencySleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}

/// Notifier that keeps every notification for later assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier(Mutex<Vec<Notification>>);

impl RecordingNotifier {
    /// Shared handle, ready to inject.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every notification received, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Messages of every notification received, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|notification| notification.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// User with the given identity, stamped at [`fixture_timestamp`].
pub fn sample_user(id: &str, username: &str, role: Role) -> User {
    User::new(
        ResourceId::new(id),
        username,
        format!("{username}@example.com"),
        role,
        fixture_timestamp(),
    )
}

/// Product with the given identity, stamped at [`fixture_timestamp`].
pub fn sample_product(id: &str, name: &str, price: f64) -> Product {
    Product::new(
        ResourceId::new(id),
        name,
        format!("Description for {name}"),
        price,
        fixture_timestamp(),
    )
}

/// Application over a zero-latency simulated backend with sequential ids.
pub fn simulated_app(clock: Arc<FixtureClock>, store: Arc<dyn TokenStore>) -> AppState {
    let backend = SimulatedBackend::new(
        Duration::ZERO,
        Arc::new(ImmediateSleeper),
        clock.clone(),
        Arc::new(SequentialIdProvider::starting_after(LAST_REFERENCE_ID)),
    );
    AppState::new(AppPorts::simulated(backend, store, clock))
}

/// File token store over a fresh temporary directory. Keep the directory
/// alive for as long as the store is used.
pub fn temp_token_store(key: &str) -> (TempDir, FileTokenStore) {
    let dir = match TempDir::new() {
        Ok(dir) => dir,
        Err(error) => panic!("failed to create temporary directory: {error}"),
    };
    match FileTokenStore::open(dir.path(), key) {
        Ok(store) => (dir, store),
        Err(error) => panic!("failed to open token store: {error}"),
    }
}

/// Token store kept in memory, for wiring that must not touch disk.
#[derive(Debug, Default)]
pub struct MemoryTokenStore(Mutex<Option<AccessToken>>);

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, TokenStoreError> {
        Ok(self.0.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
