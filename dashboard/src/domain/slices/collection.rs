//! Resource collection slice shared by users and products.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use super::{Rejection, with_lock};
use crate::domain::ports::{CollectionGateway, GatewayError, Notifier};
use crate::domain::{MutationAction, Notification, Patch, Product, Resource, ResourceId, User};

/// Collection state: entities in fetch/create order plus the lifecycle
/// flags of the fetch operation.
///
/// ## Invariants
/// - `error` is cleared whenever a new operation starts.
/// - Only `fetch_all` toggles `loading`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<E> {
    items: Vec<E>,
    loading: bool,
    error: Option<String>,
}

impl<E> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<E: Resource> CollectionState<E> {
    /// Entities in insertion order.
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Whether a fetch is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message of the last rejected operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entity with `id`, if present.
    pub fn find(&self, id: &ResourceId) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// A fetch was dispatched.
    pub fn fetch_pending(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// A fetch resolved; its result replaces the collection wholesale.
    pub fn fetch_fulfilled(&mut self, items: Vec<E>) {
        self.loading = false;
        self.items = items;
    }

    /// A fetch was rejected.
    pub fn fetch_rejected(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// A create, update or delete was dispatched. `loading` is untouched.
    pub fn mutation_pending(&mut self) {
        self.error = None;
    }

    /// A create resolved; the entity goes to the end.
    pub fn created(&mut self, entity: E) {
        self.items.push(entity);
    }

    /// An update resolved. Returns `false` when no entity matched, leaving
    /// the collection unchanged.
    pub fn updated(&mut self, patch: Patch<E::Draft>) -> bool {
        let Patch { id, changes } = patch;
        match self.items.iter_mut().find(|item| item.id() == &id) {
            Some(entity) => {
                entity.merge(changes);
                true
            }
            None => false,
        }
    }

    /// A delete resolved. Returns `false` when no entity matched.
    pub fn deleted(&mut self, id: &ResourceId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() != before
    }

    /// A create, update or delete was rejected. The collection is unchanged.
    pub fn mutation_rejected(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

/// Slice managing one resource collection through a [`CollectionGateway`].
pub struct CollectionSlice<E: Resource> {
    gateway: Arc<dyn CollectionGateway<E>>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<CollectionState<E>>,
}

/// Slice holding the managed users.
pub type UsersSlice = CollectionSlice<User>;
/// Slice holding the catalogue products.
pub type ProductsSlice = CollectionSlice<Product>;

impl<E: Resource> CollectionSlice<E> {
    /// Create an empty slice over `gateway`.
    pub fn new(gateway: Arc<dyn CollectionGateway<E>>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            state: Mutex::new(CollectionState::default()),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> CollectionState<E> {
        with_lock(&self.state, |state| state.clone())
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&CollectionState<E>) -> R) -> R {
        with_lock(&self.state, |state| f(state))
    }

    /// Replace the collection with the backend's current list.
    ///
    /// Returns the number of entities now held.
    pub async fn fetch_all(&self) -> Result<usize, Rejection> {
        let resource = E::KIND.plural();
        with_lock(&self.state, CollectionState::fetch_pending);
        debug!(resource, "fetch dispatched");

        match self.gateway.list().await {
            Ok(items) => {
                let count = items.len();
                with_lock(&self.state, |state| state.fetch_fulfilled(items));
                info!(resource, count, "fetch fulfilled");
                Ok(count)
            }
            Err(error) => {
                let rejection = Rejection::from_gateway(&error, E::KIND.fetch_failed());
                with_lock(&self.state, |state| {
                    state.fetch_rejected(rejection.message());
                });
                warn!(
                    resource,
                    error.kind = error.variant_name(),
                    error.message = rejection.message(),
                    "fetch rejected"
                );
                Err(rejection)
            }
        }
    }

    /// Create an entity from a validated draft and append it.
    pub async fn create(&self, draft: E::Draft) -> Result<E, Rejection> {
        self.begin_mutation(MutationAction::Create);
        match self.gateway.create(&draft).await {
            Ok(entity) => {
                with_lock(&self.state, |state| state.created(entity.clone()));
                self.mutation_succeeded(MutationAction::Create, entity.id());
                Ok(entity)
            }
            Err(error) => Err(self.mutation_failed(MutationAction::Create, &error)),
        }
    }

    /// Merge new field values into the entity with `id`.
    ///
    /// An unknown id leaves the collection untouched and is not an error;
    /// the returned flag reports whether anything matched.
    pub async fn update(&self, id: &ResourceId, draft: E::Draft) -> Result<bool, Rejection> {
        self.begin_mutation(MutationAction::Update);
        match self.gateway.update(id, &draft).await {
            Ok(patch) => {
                let matched = with_lock(&self.state, |state| state.updated(patch));
                if !matched {
                    debug!(resource = E::KIND.plural(), id = %id, "update matched no entity");
                }
                self.mutation_succeeded(MutationAction::Update, id);
                Ok(matched)
            }
            Err(error) => Err(self.mutation_failed(MutationAction::Update, &error)),
        }
    }

    /// Remove the entity with `id`. An unknown id is a no-op.
    pub async fn delete(&self, id: &ResourceId) -> Result<bool, Rejection> {
        self.begin_mutation(MutationAction::Delete);
        match self.gateway.delete(id).await {
            Ok(deleted_id) => {
                let removed = with_lock(&self.state, |state| state.deleted(&deleted_id));
                if !removed {
                    debug!(resource = E::KIND.plural(), id = %id, "delete matched no entity");
                }
                self.mutation_succeeded(MutationAction::Delete, id);
                Ok(removed)
            }
            Err(error) => Err(self.mutation_failed(MutationAction::Delete, &error)),
        }
    }

    fn begin_mutation(&self, action: MutationAction) {
        with_lock(&self.state, CollectionState::mutation_pending);
        debug!(resource = E::KIND.plural(), ?action, "mutation dispatched");
    }

    fn mutation_succeeded(&self, action: MutationAction, id: &ResourceId) {
        info!(resource = E::KIND.plural(), ?action, id = %id, "mutation fulfilled");
        self.notifier
            .notify(Notification::success(E::KIND.mutation_succeeded(action)));
    }

    fn mutation_failed(&self, action: MutationAction, error: &GatewayError) -> Rejection {
        let rejection = Rejection::from_gateway(error, E::KIND.mutation_failed(action));
        with_lock(&self.state, |state| {
            state.mutation_rejected(rejection.message());
        });
        warn!(
            resource = E::KIND.plural(),
            ?action,
            error.kind = error.variant_name(),
            error.message = rejection.message(),
            "mutation rejected"
        );
        self.notifier
            .notify(Notification::error(rejection.message()));
        rejection
    }
}
