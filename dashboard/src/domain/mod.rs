//! Domain primitives, ports and state slices.
//!
//! Purpose: define the strongly typed entities the dashboard manages, the
//! form schemas that guard them, the ports adapters implement, and the
//! slices that own application state. Nothing in here performs I/O
//! directly; adapters in `outbound` and `inbound` do.
//!
//! Public surface:
//! - Error: category, message and optional details reported by the console.
//! - ErrorCode: failure category.
//! - User, Product and their drafts: managed entities.
//! - Session, AccessToken, LoginCredentials: authentication values.
//! - Notification: toast payload emitted by the slices.

pub mod auth;
pub mod error;
pub mod forms;
pub mod notification;
pub mod ports;
pub mod product;
pub mod resource;
pub mod slices;
pub mod user;

pub use self::auth::{AccessToken, LoginCredentials, LoginValidationError, Session};
pub use self::error::{Error, ErrorCode};
pub use self::notification::{Notification, NotificationLevel};
pub use self::product::{Product, ProductDraft};
pub use self::resource::{MutationAction, Patch, Resource, ResourceId, ResourceKind};
pub use self::user::{Role, UnknownRole, User, UserDraft};

/// Convenient result alias for console and composition-root operations.
///
/// # Examples
/// ```
/// use dashboard::domain::{DashboardResult, Error};
///
/// fn lookup() -> DashboardResult<()> {
///     Err(Error::not_found("no such product"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DashboardResult<T> = Result<T, Error>;
