//! Driven port for the per-resource backend contract.
//!
//! Each managed resource exposes four request/response pairs. A real backend
//! maps them onto `GET /{plural}`, `POST /{plural}`, `PATCH /{plural}/{id}`
//! and `DELETE /{plural}/{id}`; the simulated adapter answers them from
//! memory after a fixed latency. The slices only see this trait, so either
//! can be substituted without touching state-transition logic.

use async_trait::async_trait;

use crate::domain::{Patch, Resource, ResourceId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by backend gateway adapters.
    pub enum GatewayError {
        /// The backend could not be reached.
        Unavailable { message: String } => "{message}",
        /// The backend refused the request.
        Rejected { message: String } => "{message}",
    }
}

impl GatewayError {
    /// Human-readable message, possibly empty.
    pub fn message(&self) -> &str {
        match self {
            Self::Unavailable { message } | Self::Rejected { message } => message.as_str(),
        }
    }
}

/// List/create/update/delete contract for one resource type.
#[async_trait]
pub trait CollectionGateway<E: Resource>: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<E>, GatewayError>;

    /// Create an entity; the backend assigns identity and timestamp.
    async fn create(&self, draft: &E::Draft) -> Result<E, GatewayError>;

    /// Apply new field values to the entity with `id`.
    ///
    /// The acknowledgement echoes the id and changes; it does not prove the
    /// id exists.
    async fn update(&self, id: &ResourceId, draft: &E::Draft)
    -> Result<Patch<E::Draft>, GatewayError>;

    /// Remove the entity with `id`, echoing the id back.
    async fn delete(&self, id: &ResourceId) -> Result<ResourceId, GatewayError>;
}
