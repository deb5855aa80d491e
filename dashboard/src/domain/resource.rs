//! Shared vocabulary for the managed resource collections.
//!
//! Users and products follow the same list/create/update/delete protocol and
//! differ only in payload shape. [`Resource`] captures the per-entity parts so
//! the collection slice and gateway port can be written once.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of an entity within its collection.
///
/// Identifiers are issued by an `IdProvider`; the domain never inspects their
/// contents beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Wrap a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The two managed collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Dashboard accounts, managed by admins.
    User,
    /// Catalogue products, managed by everyone else.
    Product,
}

impl ResourceKind {
    /// Singular label used in notifications, e.g. `User`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Product => "Product",
        }
    }

    /// Plural collection name, e.g. `users`.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Product => "products",
        }
    }

    /// Fallback message for a rejected fetch.
    pub fn fetch_failed(self) -> String {
        format!("Failed to fetch {}", self.plural())
    }

    /// Fallback message for a rejected mutation.
    pub fn mutation_failed(self, action: MutationAction) -> String {
        format!(
            "Failed to {} {}",
            action.verb(),
            self.label().to_ascii_lowercase()
        )
    }

    /// Success toast for a completed mutation.
    pub fn mutation_succeeded(self, action: MutationAction) -> String {
        format!("{} {} successfully", self.label(), action.past_tense())
    }
}

/// Mutating operations on a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationAction {
    /// Append a new entity.
    Create,
    /// Merge new field values into an existing entity.
    Update,
    /// Remove an entity.
    Delete,
}

impl MutationAction {
    const fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    const fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// An entity stored in a [`CollectionState`](crate::domain::slices::CollectionState).
pub trait Resource: Clone + fmt::Debug + Send + Sync + 'static {
    /// Validated form payload: every user-editable field.
    type Draft: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Which collection this entity belongs to.
    const KIND: ResourceKind;

    /// Immutable identity.
    fn id(&self) -> &ResourceId;

    /// Assemble a freshly created entity.
    fn from_draft(id: ResourceId, draft: Self::Draft, created_at: DateTime<Utc>) -> Self;

    /// Shallow-merge the draft's fields into this entity. Identity and
    /// creation time are untouched.
    fn merge(&mut self, draft: Self::Draft);

    /// The user-editable fields as they currently stand.
    fn to_draft(&self) -> Self::Draft;
}

/// Update acknowledgement: the target id plus the submitted field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch<D> {
    /// Entity the changes apply to.
    pub id: ResourceId,
    /// New field values.
    pub changes: D,
}

impl<D> Patch<D> {
    /// Pair an id with its changes.
    pub fn new(id: ResourceId, changes: D) -> Self {
        Self { id, changes }
    }
}
