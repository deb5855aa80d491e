//! Port abstraction for the durable session-token entry and its errors.
//!
//! The store holds exactly one value under one key. It is read once when the
//! auth slice is built, written after a successful login and removed on
//! logout.

use crate::domain::AccessToken;

use super::define_port_error;

define_port_error! {
    /// Storage errors raised by token store adapters.
    pub enum TokenStoreError {
        /// The backing storage could not be opened.
        Unavailable { message: String } => "token storage unavailable: {message}",
        /// Reading or writing the entry failed.
        Io { message: String } => "token storage failed: {message}",
    }
}

/// Durable single-key storage for the session token.
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any.
    fn load(&self) -> Result<Option<AccessToken>, TokenStoreError>;

    /// Replace the stored token.
    fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError>;

    /// Remove the stored token. Removing a missing entry succeeds.
    fn clear(&self) -> Result<(), TokenStoreError>;
}
