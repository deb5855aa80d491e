//! Authentication slice: session state plus the login and password flows.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use super::{Rejection, with_lock};
use crate::domain::forms::PasswordUpdate;
use crate::domain::ports::{AuthGateway, GatewayError, Notifier, TokenStore};
use crate::domain::{
    AccessToken, LoginCredentials, Notification, Resource, Role, Session, User,
};

const LOGIN_FAILED: &str = "Login failed";
const RESET_FAILED: &str = "Failed to send reset email";
const UPDATE_FAILED: &str = "Failed to update password";

/// Session state.
///
/// `token` may be present without `user`: a token restored from storage at
/// start-up is not resolved to a user until the next login.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    user: Option<User>,
    token: Option<AccessToken>,
    loading: bool,
    error: Option<String>,
}

impl AuthState {
    /// State seeded with a previously persisted token.
    pub fn with_token(token: Option<AccessToken>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    /// Signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Current session token, if any.
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Whether a login is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message of the last rejected login.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Role of the signed-in user.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(User::role)
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// A login was dispatched.
    pub fn login_pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A login resolved.
    pub fn login_fulfilled(&mut self, session: Session) {
        self.loading = false;
        self.user = Some(session.user);
        self.token = Some(session.token);
    }

    /// A login was rejected.
    pub fn login_rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// The session was torn down.
    pub fn logged_out(&mut self) {
        self.user = None;
        self.token = None;
    }
}

/// Slice owning the session and its persisted token.
pub struct AuthSlice {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    restored: Option<AccessToken>,
    state: Mutex<AuthState>,
}

impl AuthSlice {
    /// Build the slice, seeding the token from `store`.
    ///
    /// A store that cannot be read is logged and treated as empty.
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        store: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let restored = match store.load() {
            Ok(token) => token,
            Err(error) => {
                warn!(
                    error.kind = error.variant_name(),
                    error.message = %error,
                    "failed to restore session token"
                );
                None
            }
        };
        debug!(restored = restored.is_some(), "auth slice initialised");
        Self {
            gateway,
            store,
            notifier,
            state: Mutex::new(AuthState::with_token(restored.clone())),
            restored,
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> AuthState {
        with_lock(&self.state, |state| state.clone())
    }

    /// Token read from the store when the slice was built.
    pub fn restore(&self) -> Option<&AccessToken> {
        self.restored.as_ref()
    }

    /// Exchange credentials for a session and persist its token.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Rejection> {
        with_lock(&self.state, AuthState::login_pending);
        debug!(username = credentials.username(), "login dispatched");

        match self.gateway.login(credentials).await {
            Ok(session) => {
                if let Err(error) = self.store.save(&session.token) {
                    warn!(
                        error.kind = error.variant_name(),
                        error.message = %error,
                        "failed to persist session token"
                    );
                }
                let user = session.user.clone();
                with_lock(&self.state, |state| state.login_fulfilled(session));
                info!(user.id = %user.id(), role = %user.role(), "login fulfilled");
                Ok(user)
            }
            Err(error) => {
                let rejection = Rejection::from_gateway(&error, LOGIN_FAILED);
                with_lock(&self.state, |state| {
                    state.login_rejected(rejection.message());
                });
                warn!(
                    error.kind = error.variant_name(),
                    error.message = rejection.message(),
                    "login rejected"
                );
                Err(rejection)
            }
        }
    }

    /// Tear the session down and forget the persisted token.
    pub fn logout(&self) {
        with_lock(&self.state, AuthState::logged_out);
        if let Err(error) = self.store.clear() {
            warn!(
                error.kind = error.variant_name(),
                error.message = %error,
                "failed to remove session token"
            );
        }
        info!("logged out");
    }

    /// Ask the backend to email a reset link to `email`.
    pub async fn reset_password(&self, email: &str) -> Result<String, Rejection> {
        debug!("password reset dispatched");
        let outcome = self.gateway.reset_password(email).await;
        self.confirm(outcome, RESET_FAILED)
    }

    /// Set a new password using the token from a reset link.
    pub async fn update_password(&self, update: &PasswordUpdate) -> Result<String, Rejection> {
        debug!("password update dispatched");
        let outcome = self
            .gateway
            .update_password(&update.token, &update.password)
            .await;
        self.confirm(outcome, UPDATE_FAILED)
    }

    fn confirm(
        &self,
        outcome: Result<String, GatewayError>,
        fallback: &str,
    ) -> Result<String, Rejection> {
        match outcome {
            Ok(message) => {
                info!(message = message.as_str(), "password flow fulfilled");
                self.notifier.notify(Notification::info(message.as_str()));
                Ok(message)
            }
            Err(error) => {
                let rejection = Rejection::from_gateway(&error, fallback);
                warn!(
                    error.kind = error.variant_name(),
                    error.message = rejection.message(),
                    "password flow rejected"
                );
                self.notifier
                    .notify(Notification::error(rejection.message()));
                Err(rejection)
            }
        }
    }
}
