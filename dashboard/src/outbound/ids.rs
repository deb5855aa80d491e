//! Identifier providers.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::ResourceId;
use crate::domain::ports::IdProvider;

/// Monotonic decimal counter.
///
/// Seeded past the highest identifier already in use so new entities never
/// collide with existing ones.
#[derive(Debug)]
pub struct SequentialIdProvider {
    next: AtomicU64,
}

impl SequentialIdProvider {
    /// Provider whose first identifier is `last + 1`.
    pub fn starting_after(last: u64) -> Self {
        Self {
            next: AtomicU64::new(last.saturating_add(1)),
        }
    }
}

impl Default for SequentialIdProvider {
    fn default() -> Self {
        Self::starting_after(0)
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_id(&self) -> ResourceId {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        ResourceId::new(id.to_string())
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&self) -> ResourceId {
        ResourceId::new(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn sequential_ids_follow_seed() {
        let ids = SequentialIdProvider::starting_after(2);
        assert_eq!(ids.next_id().as_ref(), "3");
        assert_eq!(ids.next_id().as_ref(), "4");
    }

    #[rstest]
    fn default_sequence_starts_at_one() {
        assert_eq!(SequentialIdProvider::default().next_id().as_ref(), "1");
    }

    #[rstest]
    fn uuid_ids_are_distinct() {
        let ids = UuidIdProvider;
        let issued: HashSet<_> = (0..32).map(|_| ids.next_id()).collect();
        assert_eq!(issued.len(), 32);
    }
}
