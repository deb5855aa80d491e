//! User data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::resource::{Resource, ResourceId, ResourceKind};

/// Dashboard role. Selects which management view renders; it is not an
/// authorization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Sees the user-management view.
    Admin,
    /// Sees the product-management view.
    User,
}

impl Role {
    /// Wire/form spelling of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Role granted to a signed-in username: `admin` only for the literal
    /// username `admin`.
    pub fn for_username(username: &str) -> Self {
        if username == "admin" {
            Self::Admin
        } else {
            Self::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is neither `admin` nor `user`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Validated user form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    /// Login name, 3 to 20 characters.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Dashboard role.
    pub role: Role,
}

/// Application user.
///
/// ## Invariants
/// - `id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: ResourceId,
    username: String,
    email: String,
    role: Role,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build a user from its parts.
    pub fn new(
        id: ResourceId,
        username: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            role,
            created_at,
        }
    }

    /// Login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Dashboard role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Resource for User {
    type Draft = UserDraft;

    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn from_draft(id: ResourceId, draft: UserDraft, created_at: DateTime<Utc>) -> Self {
        let UserDraft {
            username,
            email,
            role,
        } = draft;
        Self::new(id, username, email, role, created_at)
    }

    fn merge(&mut self, draft: UserDraft) {
        self.username = draft.username;
        self.email = draft.email;
        self.role = draft.role;
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn sample() -> User {
        User::new(
            ResourceId::new("7"),
            "ada",
            "ada@example.com",
            Role::User,
            DateTime::<Utc>::UNIX_EPOCH,
        )
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("Admin", Role::User)]
    #[case("administrator", Role::User)]
    #[case("alice", Role::User)]
    fn role_is_admin_only_for_literal_admin(#[case] username: &str, #[case] expected: Role) {
        assert_eq!(Role::for_username(username), expected);
    }

    #[rstest]
    fn role_parsing_is_exact() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert!("ADMIN".parse::<Role>().is_err());
    }

    #[rstest]
    fn merge_replaces_fields_but_keeps_identity() {
        let mut user = sample();
        user.merge(UserDraft {
            username: "grace".to_owned(),
            email: "grace@example.com".to_owned(),
            role: Role::Admin,
        });
        assert_eq!(user.id().as_ref(), "7");
        assert_eq!(user.username(), "grace");
        assert_eq!(user.email(), "grace@example.com");
        assert_eq!(user.role(), Role::Admin);
        assert_eq!(user.created_at(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[rstest]
    fn serialises_with_camel_case_timestamp() {
        let value = serde_json::to_value(sample()).expect("user serialises");
        assert_eq!(
            value,
            json!({
                "id": "7",
                "username": "ada",
                "email": "ada@example.com",
                "role": "user",
                "createdAt": "1970-01-01T00:00:00Z",
            })
        );
    }
}
