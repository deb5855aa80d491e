//! Driven port for authentication calls.
//!
//! In hexagonal terms the auth slice drives this port to sign in and to run
//! the password-reset flow without knowing whether a network client or the
//! in-memory simulation answers.

use async_trait::async_trait;

use crate::domain::{AccessToken, LoginCredentials, Session};

use super::GatewayError;

/// Authentication backend contract.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, GatewayError>;

    /// Request a reset email; returns the confirmation text.
    async fn reset_password(&self, email: &str) -> Result<String, GatewayError>;

    /// Set a new password using a reset token; returns the confirmation text.
    async fn update_password(
        &self,
        token: &AccessToken,
        password: &str,
    ) -> Result<String, GatewayError>;
}
