//! Application state slices.
//!
//! A slice owns one piece of state behind a mutex plus the asynchronous
//! operations that transition it. Every operation follows the same
//! lifecycle: a synchronous *pending* transition, a suspension while the
//! gateway answers, then a synchronous *fulfilled* or *rejected* transition.
//! The lock is only held for those synchronous steps, never across an
//! `.await`, so overlapping operations interleave and whichever resolves
//! last wins.

mod auth;
mod collection;

use std::sync::{Mutex, PoisonError};

pub use auth::{AuthSlice, AuthState};
pub use collection::{CollectionSlice, CollectionState, ProductsSlice, UsersSlice};

use crate::domain::ports::GatewayError;

/// Human-readable reason an asynchronous operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Rejection {
    message: String,
}

impl Rejection {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Resolve a gateway failure to a message, using `fallback` when the
    /// failure carries none.
    pub fn from_gateway(error: &GatewayError, fallback: impl Into<String>) -> Self {
        let message = error.message().trim();
        if message.is_empty() {
            Self::new(fallback)
        } else {
            Self::new(message)
        }
    }

    /// The message as stored in slice state.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Run `f` against the guarded state, recovering the data from a poisoned
/// lock since every transition leaves the state consistent.
fn with_lock<T, R>(state: &Mutex<T>, f: impl FnOnce(&mut T) -> R) -> R {
    let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(GatewayError::rejected("backend said no"), "backend said no")]
    #[case(GatewayError::rejected(""), "Login failed")]
    #[case(GatewayError::unavailable("   "), "Login failed")]
    fn rejection_falls_back_when_message_is_blank(
        #[case] error: GatewayError,
        #[case] expected: &str,
    ) {
        assert_eq!(
            Rejection::from_gateway(&error, "Login failed").message(),
            expected
        );
    }
}
