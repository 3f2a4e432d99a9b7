//! Bundle of the seven facet store handles

use crate::core::attribute::{
    CounterValue, DescriptionValue, FileValue, PointValue, StringValue,
};
use crate::core::flag::StatusFlag;
use crate::core::permission::Permission;
use crate::core::service::FacetStore;
use crate::storage::InMemoryFacetStore;
use std::sync::Arc;

/// The store handles behind the seven facet families.
///
/// Facet rows are shared across every entity type, so one bundle backs all
/// the per-entity content services of a deployment. Cloning shares the
/// underlying stores.
#[derive(Clone)]
pub struct FacetStores {
    pub strings: Arc<dyn FacetStore<StringValue>>,
    pub points: Arc<dyn FacetStore<PointValue>>,
    pub descriptions: Arc<dyn FacetStore<DescriptionValue>>,
    pub counters: Arc<dyn FacetStore<CounterValue>>,
    pub files: Arc<dyn FacetStore<FileValue>>,
    pub permissions: Arc<dyn FacetStore<Permission>>,
    pub flags: Arc<dyn FacetStore<StatusFlag>>,
}

impl FacetStores {
    /// Bundle backed by the in-memory reference stores
    pub fn in_memory() -> Self {
        Self {
            strings: Arc::new(InMemoryFacetStore::new()),
            points: Arc::new(InMemoryFacetStore::new()),
            descriptions: Arc::new(InMemoryFacetStore::new()),
            counters: Arc::new(InMemoryFacetStore::new()),
            files: Arc::new(InMemoryFacetStore::new()),
            permissions: Arc::new(InMemoryFacetStore::new()),
            flags: Arc::new(InMemoryFacetStore::new()),
        }
    }
}
