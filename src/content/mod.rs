//! Per-entity-type content orchestration
//!
//! [`ContentService`] is the write and read surface over one entity type: it
//! owns the entity store plus the seven facet services, keeps entity
//! mutations and facet reconciliations in order, publishes events, and
//! assembles the outward-facing [`EntityView`].

pub mod patch;
pub mod service;
pub mod view;

pub use patch::FacetPatch;
pub use service::ContentService;
pub use view::{AttributeView, CounterView, EntityView, PermissionView, ViewOptions};
