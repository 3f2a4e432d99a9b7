//! Core module containing the fundamental traits and types of the crate

pub mod attribute;
pub mod entity;
pub mod error;
pub mod events;
pub mod flag;
pub mod permission;
pub mod query;
pub mod reconcile;
pub mod service;

pub use attribute::{
    AttributeKind, CounterInput, CounterValue, DescriptionInput, DescriptionValue, FileInput,
    FileValue, PointInput, PointValue, StringInput, StringValue,
};
pub use entity::{ContentEntity, EntityRef, is_valid_key};
pub use error::{
    ConfigError, EntityError, FacetError, MosaicError, MosaicResult, StorageError, ValidationError,
};
pub use events::{ContentEvent, EntityEvent, EventBus, EventEnvelope, FacetEvent};
pub use flag::{FlagInput, StatusFlag};
pub use permission::{AccessMethod, Permission, PermissionInput};
pub use query::{Page, PageInfo, Paginated};
pub use reconcile::{CompositeKey, FacetInput, FacetRow, Reconciliation, diff};
pub use service::{EntityStore, FacetStore, FacetWrite};
