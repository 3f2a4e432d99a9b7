//! Generic reconciliation service over one facet family

use crate::core::attribute::{
    CounterValue, DescriptionValue, FileValue, PointValue, StringValue,
};
use crate::core::entity::EntityRef;
use crate::core::error::MosaicResult;
use crate::core::events::{ContentEvent, EventBus, FacetEvent};
use crate::core::flag::StatusFlag;
use crate::core::permission::Permission;
use crate::core::reconcile::{diff, CompositeKey, FacetInput, FacetRow};
use crate::core::service::{FacetStore, FacetWrite};
use std::sync::Arc;
use uuid::Uuid;

/// Result of reconciling one owner's facet against a desired set
///
/// `rows` is the owner's refreshed set, sorted by composite key. The counts
/// describe what the reconciliation did; `kept` rows retained their internal
/// id.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome<R: FacetRow> {
    pub rows: Vec<R>,
    pub inserted: usize,
    pub deleted: usize,
    pub kept: usize,
}

impl<R: FacetRow> ReconcileOutcome<R> {
    /// True when the stored set already matched the desired set
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.deleted == 0
    }
}

/// The generic facet pipeline: validate → load → diff → materialize → apply →
/// refresh.
///
/// One instance serves one row family across every owner and entity type.
/// The service is cheap to clone; typed aliases name the seven families.
#[derive(Clone)]
pub struct FacetService<R: FacetRow> {
    store: Arc<dyn FacetStore<R>>,
    events: EventBus,
}

impl<R: FacetRow> FacetService<R> {
    pub fn new(store: Arc<dyn FacetStore<R>>, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Reconcile the owner's stored rows against the complete desired set.
    ///
    /// Inputs are validated before any store work. Rows whose composite key
    /// appears in both sets are left untouched and keep their internal id;
    /// the rest of the plan is applied in one atomic store step. An empty
    /// desired set clears the facet.
    pub async fn reconcile(
        &self,
        tenant_id: Uuid,
        owner: &EntityRef,
        desired: Vec<R::Input>,
    ) -> MosaicResult<ReconcileOutcome<R>> {
        for input in &desired {
            input.validate()?;
        }

        let existing = self.store.load(tenant_id, owner).await?;
        let plan = diff(existing, desired);

        let inserted = plan.insert.len();
        let deleted = plan.delete.len();
        let kept = plan.keep.len();

        let rows = if plan.is_noop() {
            // Nothing to write; the kept rows are already the refreshed set.
            let mut rows = plan.keep;
            rows.sort_by_cached_key(|row| row.composite_key());
            rows
        } else {
            let write = FacetWrite {
                insert: plan
                    .insert
                    .into_iter()
                    .map(|input| R::from_input(tenant_id, owner, input))
                    .collect(),
                delete: plan.delete.iter().map(|row| row.id()).collect(),
            };
            self.store.apply(tenant_id, owner, write).await?
        };

        tracing::debug!(
            family = R::family(),
            owner = %owner,
            inserted,
            deleted,
            kept,
            "Facet reconciled"
        );

        if inserted + deleted > 0 {
            self.events.publish(ContentEvent::Facet(FacetEvent::Reconciled {
                tenant_id,
                owner: owner.clone(),
                family: R::family().to_string(),
                inserted,
                deleted,
                kept,
            }));
        }

        Ok(ReconcileOutcome {
            rows,
            inserted,
            deleted,
            kept,
        })
    }

    /// The owner's current rows, sorted by composite key
    pub async fn list(&self, tenant_id: Uuid, owner: &EntityRef) -> MosaicResult<Vec<R>> {
        Ok(self.store.load(tenant_id, owner).await?)
    }

    /// Delete every row attached to the owner (hard entity deletion)
    pub async fn purge(&self, tenant_id: Uuid, owner: &EntityRef) -> MosaicResult<()> {
        self.store.purge_owner(tenant_id, owner).await?;
        tracing::debug!(family = R::family(), owner = %owner, "Facet purged");
        Ok(())
    }
}

// One alias per facet family. Statuses share the generic pipeline unchanged;
// permissions add admin-grant injection in `PermissionService`.
pub type StringAttributeService = FacetService<StringValue>;
pub type PointAttributeService = FacetService<PointValue>;
pub type DescriptionAttributeService = FacetService<DescriptionValue>;
pub type CounterAttributeService = FacetService<CounterValue>;
pub type FileAttributeService = FacetService<FileValue>;
pub type StatusService = FacetService<StatusFlag>;

/// The generic service is reused for permissions through this alias; the
/// public entry point is [`PermissionService`](super::PermissionService).
pub(crate) type RawPermissionService = FacetService<Permission>;
