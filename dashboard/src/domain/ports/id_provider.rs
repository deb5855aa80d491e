//! Port for issuing entity identifiers.

use crate::domain::ResourceId;

/// Source of identifiers for newly created entities.
///
/// Implementations must never return the same identifier twice for the
/// lifetime of the provider.
pub trait IdProvider: Send + Sync {
    /// Issue the next identifier.
    fn next_id(&self) -> ResourceId;
}
