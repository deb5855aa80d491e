//! Outbound adapters implementing domain ports.
//!
//! - **simulated**: in-memory backend answering the auth and collection
//!   gateways after a fixed latency
//! - **token_store**: capability-scoped file storage for the session token
//! - **ids**: sequential and UUID identifier providers
//! - **toast**: expiring notification queue read by the console
//! - **sleeper**: Tokio-backed latency sleeper
//!
//! Adapters translate between domain types and their backing mechanism. They
//! contain no state-transition logic.

pub mod ids;
pub mod simulated;
pub mod sleeper;
pub mod toast;
pub mod token_store;

pub use ids::{SequentialIdProvider, UuidIdProvider};
pub use simulated::SimulatedBackend;
pub use sleeper::TokioSleeper;
pub use toast::{TOAST_TTL, ToastQueue};
pub use token_store::FileTokenStore;
