//! Store traits for entity and facet persistence
//!
//! The crate is agnostic to the underlying storage mechanism. Entity rows and
//! facet rows live behind these async traits; the in-memory backend in
//! `storage::in_memory` is the reference implementation.

use crate::core::entity::{ContentEntity, EntityRef};
use crate::core::reconcile::FacetRow;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Store trait for content entity rows
///
/// Operations are tenant-scoped and keyed by the entity's opaque string key.
/// Stores return rows regardless of soft-delete state; visibility rules live
/// in the content layer so every backend shares them.
#[async_trait]
pub trait EntityStore<E: ContentEntity>: Send + Sync {
    /// Insert a new entity. Fails if the key is already taken for the tenant.
    async fn insert(&self, entity: E) -> Result<E>;

    /// Fetch an entity by key
    async fn get(&self, tenant_id: Uuid, key: &str) -> Result<Option<E>>;

    /// List the tenant's entities ordered by key
    async fn list(&self, tenant_id: Uuid) -> Result<Vec<E>>;

    /// Replace a stored entity, matched by (tenant, key). Fails if absent.
    async fn update(&self, entity: E) -> Result<E>;

    /// Remove an entity row entirely
    async fn remove(&self, tenant_id: Uuid, key: &str) -> Result<()>;
}

/// Write plan produced by a reconciliation
///
/// Kept rows never appear in the plan; the store leaves them untouched, which
/// is what preserves their internal row ids.
#[derive(Debug, Clone)]
pub struct FacetWrite<R: FacetRow> {
    /// Materialized rows to insert
    pub insert: Vec<R>,

    /// Internal ids of rows to delete
    pub delete: Vec<Uuid>,
}

impl<R: FacetRow> FacetWrite<R> {
    pub fn is_empty(&self) -> bool {
        self.insert.is_empty() && self.delete.is_empty()
    }
}

/// Store trait for facet rows of one family
#[async_trait]
pub trait FacetStore<R: FacetRow>: Send + Sync {
    /// Load the owner's rows for this tenant
    async fn load(&self, tenant_id: Uuid, owner: &EntityRef) -> Result<Vec<R>>;

    /// Apply a write plan in one atomic step and return the owner's refreshed
    /// rows sorted by composite key
    async fn apply(
        &self,
        tenant_id: Uuid,
        owner: &EntityRef,
        write: FacetWrite<R>,
    ) -> Result<Vec<R>>;

    /// Delete every row attached to the owner. Used by hard entity deletion.
    async fn purge_owner(&self, tenant_id: Uuid, owner: &EntityRef) -> Result<()>;
}
