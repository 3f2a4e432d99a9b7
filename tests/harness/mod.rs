//! Shared test backend for integration tests

use mosaic::prelude::*;
use std::sync::Arc;

/// One deployment's worth of shared infrastructure: a facet store bundle, an
/// event bus and a config, from which per-entity-type services are built the
/// way a real deployment builds them.
pub struct TestBackend {
    pub config: ContentConfig,
    pub stores: FacetStores,
    pub events: EventBus,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::with_config(ContentConfig::default())
    }

    pub fn with_config(config: ContentConfig) -> Self {
        Self {
            stores: FacetStores::in_memory(),
            events: EventBus::new(config.event_capacity),
            config,
        }
    }

    /// Content service for one entity type, sharing this backend's facet
    /// stores and event bus
    pub fn service<E: ContentEntity>(&self) -> ContentService<E> {
        ContentService::new(
            Arc::new(InMemoryEntityStore::new()),
            self.stores.clone(),
            self.events.clone(),
            &self.config,
        )
    }

    /// Direct handle on the string facet, for asserting row-level state the
    /// views do not expose (internal ids)
    pub fn strings(&self) -> StringAttributeService {
        FacetService::new(self.stores.strings.clone(), self.events.clone())
    }

    /// Direct handle on the permission facet
    pub fn permissions(&self) -> PermissionService {
        PermissionService::new(
            self.stores.permissions.clone(),
            self.events.clone(),
            self.config.admin_group.clone(),
        )
    }
}
