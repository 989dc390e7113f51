//! Create/edit/delete orchestration on top of a list store
//!
//! After a successful create or delete the list is reloaded from the first
//! page, since the new or removed entity shifts every offset. A successful
//! edit only replaces the loaded copy in place.

use futures::future::BoxFuture;
use serde_json::Value;

use crate::{
    core::error::CrudError,
    domain::{entity::Entity, filters::FilterSet},
    infrastructure::{config::ListConfig, loader::PageLoader},
    model::list::ListSnapshot,
};

use super::store::IncrementalListStore;

/// Mutating half of an entity API
///
/// Every method defaults to [`CrudError::Unsupported`], so read-mostly APIs
/// only implement what they have.
pub trait CrudApi<E: Entity>: Send + Sync + 'static {
    type Create: Send + 'static;
    type Edit: Send + 'static;

    fn create(&self, params: Self::Create) -> BoxFuture<'static, Result<E, CrudError>> {
        let _ = params;
        Box::pin(async { Err(CrudError::Unsupported("create")) })
    }

    fn edit(&self, id: E::Id, params: Self::Edit) -> BoxFuture<'static, Result<E, CrudError>> {
        let _ = (id, params);
        Box::pin(async { Err(CrudError::Unsupported("edit")) })
    }

    fn delete(&self, id: E::Id) -> BoxFuture<'static, Result<(), CrudError>> {
        let _ = id;
        Box::pin(async { Err(CrudError::Unsupported("delete")) })
    }
}

pub struct EntityCrudService<E: Entity, F, L, A> {
    store: IncrementalListStore<E, F, L>,
    api: A,
}

impl<E, F, L, A> EntityCrudService<E, F, L, A>
where
    E: Entity + Clone + Send + Sync + 'static,
    F: Clone + Default + Send + Sync + 'static,
    L: PageLoader<E, F>,
    A: CrudApi<E>,
{
    /// Build the store and request the first page
    pub fn new(loader: L, api: A, config: ListConfig) -> Self {
        let init = !config.init_immediately;
        let mut store = IncrementalListStore::new(loader, config);
        if init {
            store.init(None);
        }
        Self { store, api }
    }

    pub fn list_data(&self) -> ListSnapshot<E> {
        self.store.snapshot()
    }

    pub fn store(&self) -> &IncrementalListStore<E, F, L> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut IncrementalListStore<E, F, L> {
        &mut self.store
    }

    pub fn filters(&self) -> &F {
        self.store.requested_filters()
    }

    pub fn paginate(&mut self) {
        self.store.paginate();
    }

    /// Debounced filter replacement, for search-as-you-type inputs
    pub fn set_filters(&mut self, filters: F) {
        self.store.set_filters_debounced(filters);
    }

    pub fn clear_filters(&mut self) {
        self.store.clear_filters();
    }

    pub async fn create(&mut self, params: A::Create) -> Result<E, CrudError> {
        let created = self.api.create(params).await.inspect_err(|error| {
            tracing::warn!(%error, "create failed");
        })?;
        tracing::debug!(id = ?created.id(), "created, reloading list");
        self.store.reset();
        Ok(created)
    }

    pub async fn edit(&mut self, id: E::Id, params: A::Edit) -> Result<E, CrudError> {
        let edited = self.api.edit(id, params).await.inspect_err(|error| {
            tracing::warn!(%error, "edit failed");
        })?;
        self.store.edit_entity(edited.clone());
        Ok(edited)
    }

    pub async fn delete(&mut self, id: E::Id) -> Result<(), CrudError> {
        self.api.delete(id.clone()).await.inspect_err(|error| {
            tracing::warn!(?id, %error, "delete failed");
        })?;
        tracing::debug!(?id, "deleted, reloading list");
        self.store.reset();
        Ok(())
    }
}

impl<E, L, A> EntityCrudService<E, FilterSet, L, A>
where
    E: Entity + Clone + Send + Sync + 'static,
    L: PageLoader<E, FilterSet>,
    A: CrudApi<E>,
{
    /// Change a single filter on top of the latest requested ones (debounced)
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let filters = self.store.requested_filters().clone().with(key, value);
        self.store.set_filters_debounced(filters);
    }
}
