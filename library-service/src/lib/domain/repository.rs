use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::query::FilterSpec;

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Count of all records matching the filter, ignoring paging.
    pub total: i64,
}

/// Persistence contract shared by every entity store.
///
/// Thin boundary: no business validation. Implementations are per entity and
/// monomorphic; services are generic over them.
#[async_trait]
pub trait CrudRepository: Send + Sync + 'static {
    type Entity: Send + Sync + 'static;
    type Id: Send + Sync + 'static;
    /// Partial field replacement.
    type Patch: Send + 'static;

    /// Persist an entity whose identifier is already assigned.
    ///
    /// # Errors
    /// * `Duplicate` - A store-level unique index rejected the record
    /// * `Database` - Transport or query failure
    async fn create(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError>;

    /// # Errors
    /// * `NotFound` - No record with this id
    /// * `Database` - Transport or query failure
    async fn get_by_id(&self, id: &Self::Id) -> Result<Self::Entity, StoreError>;

    async fn list(&self) -> Result<Vec<Self::Entity>, StoreError>;

    /// Fetch one page and the total match count.
    ///
    /// Count and fetch run concurrently; either failing fails the call.
    async fn list_with_query(&self, spec: &FilterSpec) -> Result<Page<Self::Entity>, StoreError>;

    /// Apply a partial update.
    ///
    /// # Returns
    /// `false` when no record matches `id`
    async fn update_fields(&self, id: &Self::Id, patch: Self::Patch) -> Result<bool, StoreError>;

    /// # Returns
    /// `false` when no record matches `id`
    async fn delete_by_id(&self, id: &Self::Id) -> Result<bool, StoreError>;
}
