//! # Mosaic
//!
//! The backend core of a multi-tenant content-management system: a family of
//! content entity types sharing one common shape, with typed attribute
//! values, permission grants and status flags attached generically through
//! diff-based reconciliation services.
//!
//! ## Features
//!
//! - **One Entity Shape**: every type carries an opaque string key, a tenant
//!   id and lifecycle timestamps, generated by a macro
//! - **Typed Attribute Facets**: localized strings, point references,
//!   descriptions, counters and file references attach to any entity
//! - **Set Reconciliation**: the caller hands over the complete desired set;
//!   the engine inserts, deletes and keeps rows by composite key, preserving
//!   the internal ids of unchanged rows
//! - **Implicit Admin Grant**: the permission facet always retains a wildcard
//!   grant for the administrative group
//! - **Soft Delete Support**: archive and restore alongside hard deletion
//!   with facet cleanup
//! - **Storage-Agnostic**: async store traits with an in-memory reference
//!   backend
//! - **Event Bus**: every mutation publishes a broadcast event
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mosaic::prelude::*;
//!
//! let config = ContentConfig::default();
//! let directories: ContentService<Directory> = ContentService::in_memory(&config);
//!
//! let tenant_id = Uuid::new_v4();
//! let view = directories
//!     .create(
//!         Directory::new(tenant_id, "CITIES"),
//!         FacetPatch::new()
//!             .with_strings(vec![
//!                 StringInput::new("NAME", "Cities").with_lang("EN"),
//!                 StringInput::new("NAME", "Villes").with_lang("FR"),
//!             ])
//!             .with_flags(vec![FlagInput::new("PUBLISHED")]),
//!     )
//!     .await?;
//!
//! // The admin group's wildcard grant was injected automatically
//! assert_eq!(view.permissions[0].group, "admin");
//! ```

pub mod config;
pub mod content;
pub mod core;
pub mod entities;
pub mod facets;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        attribute::{
            AttributeKind, CounterInput, CounterValue, DescriptionInput, DescriptionValue,
            FileInput, FileValue, PointInput, PointValue, StringInput, StringValue,
        },
        entity::{ContentEntity, EntityRef, is_valid_key},
        error::{EntityError, FacetError, MosaicError, MosaicResult, ValidationError},
        events::{ContentEvent, EntityEvent, EventBus, EventEnvelope, FacetEvent},
        flag::{FlagInput, StatusFlag},
        permission::{AccessMethod, Permission, PermissionInput},
        query::{Page, PageInfo, Paginated},
        reconcile::{CompositeKey, FacetInput, FacetRow, Reconciliation, diff},
        service::{EntityStore, FacetStore, FacetWrite},
    };

    // === Macros ===
    pub use crate::impl_content_entity;

    // === Entities ===
    pub use crate::entities::{
        Attribute, Block, Collection, Directory, Element, File, Form, FormResult, Group, Language,
        Measure, Point, Section, Status, User,
    };

    // === Facet Services ===
    pub use crate::facets::{
        CounterAttributeService, DescriptionAttributeService, FacetService, FacetStores,
        FileAttributeService, PermissionService, PointAttributeService, ReconcileOutcome,
        StatusService, StringAttributeService,
    };

    // === Content ===
    pub use crate::content::{
        AttributeView, ContentService, CounterView, EntityView, FacetPatch, PermissionView,
        ViewOptions,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryEntityStore, InMemoryFacetStore};

    // === Config ===
    pub use crate::config::ContentConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
