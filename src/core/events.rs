//! Internal event system for content mutations
//!
//! The EventBus uses `tokio::sync::broadcast` to decouple mutations from
//! whatever observes them (cache invalidation, search indexing, audit
//! trails). Publishing is fire-and-forget and never blocks a mutation.
//!
//! # Usage
//!
//! ```rust,ignore
//! let event_bus = EventBus::new(1024);
//!
//! // Subscribe to events
//! let mut rx = event_bus.subscribe();
//!
//! // Publish an event (non-blocking, fire-and-forget)
//! event_bus.publish(ContentEvent::Entity(EntityEvent::Created {
//!     tenant_id,
//!     entity_type: "directory".to_string(),
//!     key: "CITIES".to_string(),
//! }));
//!
//! // Receive events
//! if let Ok(envelope) = rx.recv().await {
//!     println!("Received: {:?}", envelope.event);
//! }
//! ```

use crate::core::entity::EntityRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events related to entity mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EntityEvent {
    /// An entity was created
    Created {
        tenant_id: Uuid,
        entity_type: String,
        key: String,
    },
    /// An entity's intrinsic fields were replaced
    Updated {
        tenant_id: Uuid,
        entity_type: String,
        key: String,
    },
    /// An entity was soft-deleted
    Archived {
        tenant_id: Uuid,
        entity_type: String,
        key: String,
    },
    /// A soft-deleted entity was restored
    Restored {
        tenant_id: Uuid,
        entity_type: String,
        key: String,
    },
    /// An entity was hard-deleted along with its facet rows
    Deleted {
        tenant_id: Uuid,
        entity_type: String,
        key: String,
    },
}

/// Events related to facet reconciliations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FacetEvent {
    /// One facet family of one owner was reconciled
    Reconciled {
        tenant_id: Uuid,
        owner: EntityRef,
        family: String,
        inserted: usize,
        deleted: usize,
        kept: usize,
    },
}

/// Top-level content event that wraps entity and facet events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentEvent {
    /// An entity event
    Entity(EntityEvent),
    /// A facet event
    Facet(FacetEvent),
}

impl ContentEvent {
    pub fn event_kind(&self) -> &str {
        match self {
            ContentEvent::Entity(_) => "entity",
            ContentEvent::Facet(_) => "facet",
        }
    }

    /// Get the tenant this event belongs to
    pub fn tenant_id(&self) -> Uuid {
        match self {
            ContentEvent::Entity(e) => match e {
                EntityEvent::Created { tenant_id, .. }
                | EntityEvent::Updated { tenant_id, .. }
                | EntityEvent::Archived { tenant_id, .. }
                | EntityEvent::Restored { tenant_id, .. }
                | EntityEvent::Deleted { tenant_id, .. } => *tenant_id,
            },
            ContentEvent::Facet(FacetEvent::Reconciled { tenant_id, .. }) => *tenant_id,
        }
    }

    /// Get the action name (created, updated, archived, restored, deleted,
    /// reconciled)
    pub fn action(&self) -> &str {
        match self {
            ContentEvent::Entity(e) => match e {
                EntityEvent::Created { .. } => "created",
                EntityEvent::Updated { .. } => "updated",
                EntityEvent::Archived { .. } => "archived",
                EntityEvent::Restored { .. } => "restored",
                EntityEvent::Deleted { .. } => "deleted",
            },
            ContentEvent::Facet(FacetEvent::Reconciled { .. }) => "reconciled",
        }
    }

    /// Get the entity key this event relates to
    pub fn key(&self) -> &str {
        match self {
            ContentEvent::Entity(e) => match e {
                EntityEvent::Created { key, .. }
                | EntityEvent::Updated { key, .. }
                | EntityEvent::Archived { key, .. }
                | EntityEvent::Restored { key, .. }
                | EntityEvent::Deleted { key, .. } => key,
            },
            ContentEvent::Facet(FacetEvent::Reconciled { owner, .. }) => &owner.key,
        }
    }
}

/// Envelope wrapping a content event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: ContentEvent,
}

impl EventEnvelope {
    pub fn new(event: ContentEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Uses `tokio::sync::broadcast` which allows multiple receivers and is
/// designed for exactly this kind of pub/sub pattern.
///
/// The bus is cheap to clone and can be shared across threads.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow receivers start losing events (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// This is non-blocking and will never fail. If there are no subscribers,
    /// the event is simply dropped. If subscribers are lagging, they will
    /// receive a `Lagged` error on their next recv().
    ///
    /// Returns the number of receivers that will receive the event.
    pub fn publish(&self, event: ContentEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers, which is fine
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events
    ///
    /// Returns a receiver that will get all future events published to the
    /// bus. Events published before this call are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
