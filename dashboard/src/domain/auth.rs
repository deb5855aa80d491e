//! Login credentials, access tokens and the signed-in session.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use super::user::User;

/// Why a login payload was refused before reaching the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Username was empty or only whitespace.
    #[error("username must not be empty")]
    BlankUsername,
    /// Password was empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Credentials handed to the auth gateway.
///
/// The username is kept exactly as typed: the role check compares it
/// literally, so `" admin "` is not the admin account. Only a username that
/// is blank after trimming is refused.
///
/// # Examples
/// ```
/// use dashboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").unwrap();
/// assert_eq!(creds.username(), " admin ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Accept a raw username and password.
    ///
    /// # Errors
    ///
    /// Returns [`LoginValidationError`] when the username is blank or the
    /// password is empty.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        if username.trim().is_empty() {
            return Err(LoginValidationError::BlankUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username as submitted.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as submitted.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Opaque bearer token identifying a session.
///
/// The value is zeroed on drop and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a raw token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Raw token value, for storage and transport.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Result of a successful login: the signed-in user and their token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Authenticated user.
    pub user: User,
    /// Token to persist and present on later calls.
    pub token: AccessToken,
}
