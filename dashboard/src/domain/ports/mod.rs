//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod collection_gateway;
mod id_provider;
mod latency;
mod notifier;
mod token_store;

pub use auth_gateway::AuthGateway;
pub use collection_gateway::{CollectionGateway, GatewayError};
pub use id_provider::IdProvider;
pub use latency::LatencySleeper;
pub use notifier::Notifier;
pub use token_store::{TokenStore, TokenStoreError};
