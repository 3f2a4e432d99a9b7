//! Facet reconciliation services
//!
//! A facet is one family of rows attached to owning entities: the five typed
//! attribute families, permission grants and status flags. Every facet shares
//! the same write model, implemented once by [`FacetService`]: the caller
//! hands over the complete desired set for one owner and the service
//! reconciles the stored rows against it.
//!
//! Permissions get a thin wrapper, [`PermissionService`], which injects the
//! implicit administrative grant before every reconciliation and evaluates
//! grants for access checks.

pub mod permission;
pub mod service;
pub mod stores;

pub use permission::PermissionService;
pub use service::{
    CounterAttributeService, DescriptionAttributeService, FacetService, FileAttributeService,
    PointAttributeService, ReconcileOutcome, StatusService, StringAttributeService,
};
pub use stores::FacetStores;
