//! Reference datasets served by the simulated backend.

use chrono::{DateTime, Utc};

use crate::domain::{Product, ResourceId, Role, User};

/// Highest numeric identifier used by the reference datasets.
///
/// Sequential identifier providers start after it.
pub const LAST_REFERENCE_ID: u64 = 2;

/// The reference users, stamped at `now`.
pub fn reference_users(now: DateTime<Utc>) -> Vec<User> {
    vec![
        User::new(
            ResourceId::new("1"),
            "admin",
            "admin@example.com",
            Role::Admin,
            now,
        ),
        User::new(
            ResourceId::new("2"),
            "user1",
            "user1@example.com",
            Role::User,
            now,
        ),
    ]
}

/// The reference products, stamped at `now`.
pub fn reference_products(now: DateTime<Utc>) -> Vec<Product> {
    vec![
        Product::new(
            ResourceId::new("1"),
            "Product 1",
            "Description for product 1",
            99.99,
            now,
        ),
        Product::new(
            ResourceId::new("2"),
            "Product 2",
            "Description for product 2",
            149.99,
            now,
        ),
    ]
}
