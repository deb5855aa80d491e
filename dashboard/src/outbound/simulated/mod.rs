//! In-memory backend that stands in for the dashboard's REST API.
//!
//! Every call first suspends for the configured latency, then answers from
//! the reference datasets in [`fixtures`]. The backend keeps no state of its
//! own: a list call always returns the reference data, and mutations only
//! acknowledge what was submitted. The slices are the source of truth.

pub mod fixtures;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    AuthGateway, CollectionGateway, GatewayError, IdProvider, LatencySleeper,
};
use crate::domain::{
    AccessToken, LoginCredentials, Patch, Product, ProductDraft, Resource, ResourceId, Role,
    Session, User, UserDraft,
};

/// Token issued to every successful login.
pub const SESSION_TOKEN: &str = "fake-jwt-token";
/// Identifier of the session user.
pub const SESSION_USER_ID: &str = "1";
/// Email of the session user.
pub const SESSION_USER_EMAIL: &str = "user@example.com";
/// Confirmation returned by a reset request.
pub const RESET_EMAIL_SENT: &str = "Reset password email sent";
/// Confirmation returned by a password update.
pub const PASSWORD_UPDATED: &str = "Password updated successfully";

/// Backend double with fixed latency and reference data.
pub struct SimulatedBackend {
    latency: Duration,
    sleeper: Arc<dyn LatencySleeper>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdProvider>,
}

impl SimulatedBackend {
    /// Build a backend answering after `latency`.
    pub fn new(
        latency: Duration,
        sleeper: Arc<dyn LatencySleeper>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            latency,
            sleeper,
            clock,
            ids,
        }
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            self.sleeper.sleep(self.latency).await;
        }
    }

    async fn create_entity<E: Resource>(&self, draft: &E::Draft) -> E {
        // Identity and timestamp are fixed before the delay.
        let id = self.ids.next_id();
        let created_at = self.clock.utc();
        self.round_trip().await;
        debug!(resource = E::KIND.plural(), id = %id, "simulated create");
        E::from_draft(id, draft.clone(), created_at)
    }

    async fn acknowledge_update<D>(&self, id: &ResourceId, draft: &D) -> Patch<D>
    where
        D: Clone + Send + Sync,
    {
        self.round_trip().await;
        Patch::new(id.clone(), draft.clone())
    }

    async fn acknowledge_delete(&self, id: &ResourceId) -> ResourceId {
        self.round_trip().await;
        id.clone()
    }
}

#[async_trait]
impl AuthGateway for SimulatedBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, GatewayError> {
        self.round_trip().await;
        let username = credentials.username();
        debug!(username, "simulated login");
        let user = User::new(
            ResourceId::new(SESSION_USER_ID),
            username,
            SESSION_USER_EMAIL,
            Role::for_username(username),
            self.clock.utc(),
        );
        Ok(Session {
            user,
            token: AccessToken::new(SESSION_TOKEN),
        })
    }

    async fn reset_password(&self, _email: &str) -> Result<String, GatewayError> {
        self.round_trip().await;
        Ok(RESET_EMAIL_SENT.to_owned())
    }

    async fn update_password(
        &self,
        _token: &AccessToken,
        _password: &str,
    ) -> Result<String, GatewayError> {
        self.round_trip().await;
        Ok(PASSWORD_UPDATED.to_owned())
    }
}

#[async_trait]
impl CollectionGateway<User> for SimulatedBackend {
    async fn list(&self) -> Result<Vec<User>, GatewayError> {
        self.round_trip().await;
        Ok(fixtures::reference_users(self.clock.utc()))
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, GatewayError> {
        Ok(self.create_entity::<User>(draft).await)
    }

    async fn update(
        &self,
        id: &ResourceId,
        draft: &UserDraft,
    ) -> Result<Patch<UserDraft>, GatewayError> {
        Ok(self.acknowledge_update(id, draft).await)
    }

    async fn delete(&self, id: &ResourceId) -> Result<ResourceId, GatewayError> {
        Ok(self.acknowledge_delete(id).await)
    }
}

#[async_trait]
impl CollectionGateway<Product> for SimulatedBackend {
    async fn list(&self) -> Result<Vec<Product>, GatewayError> {
        self.round_trip().await;
        Ok(fixtures::reference_products(self.clock.utc()))
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, GatewayError> {
        Ok(self.create_entity::<Product>(draft).await)
    }

    async fn update(
        &self,
        id: &ResourceId,
        draft: &ProductDraft,
    ) -> Result<Patch<ProductDraft>, GatewayError> {
        Ok(self.acknowledge_update(id, draft).await)
    }

    async fn delete(&self, id: &ResourceId) -> Result<ResourceId, GatewayError> {
        Ok(self.acknowledge_delete(id).await)
    }
}
