//! Permission reconciliation with the implicit administrative grant

use crate::core::entity::EntityRef;
use crate::core::error::MosaicResult;
use crate::core::events::EventBus;
use crate::core::permission::{AccessMethod, Permission, PermissionInput};
use crate::core::service::FacetStore;
use crate::facets::service::{RawPermissionService, ReconcileOutcome};
use std::sync::Arc;
use uuid::Uuid;

/// Facet service for permission grants
///
/// Wraps the generic pipeline with one extra rule: the administrative group's
/// wildcard grant is unconditionally appended to every desired set before
/// reconciliation, so at least one administrative permission always exists
/// per owner. A caller can therefore never lock the admin group out, not even
/// with an empty desired set.
#[derive(Clone)]
pub struct PermissionService {
    inner: RawPermissionService,
    admin_group: String,
}

impl PermissionService {
    pub fn new(
        store: Arc<dyn FacetStore<Permission>>,
        events: EventBus,
        admin_group: impl Into<String>,
    ) -> Self {
        Self {
            inner: RawPermissionService::new(store, events),
            admin_group: admin_group.into(),
        }
    }

    /// The group receiving the implicit wildcard grant
    pub fn admin_group(&self) -> &str {
        &self.admin_group
    }

    /// Reconcile the owner's grants against the desired set plus the implicit
    /// (admin group, ALL) grant
    pub async fn reconcile(
        &self,
        tenant_id: Uuid,
        owner: &EntityRef,
        mut desired: Vec<PermissionInput>,
    ) -> MosaicResult<ReconcileOutcome<Permission>> {
        desired.push(PermissionInput::new(
            self.admin_group.clone(),
            AccessMethod::All,
        ));
        self.inner.reconcile(tenant_id, owner, desired).await
    }

    /// The owner's current grants, sorted by composite key
    pub async fn list(&self, tenant_id: Uuid, owner: &EntityRef) -> MosaicResult<Vec<Permission>> {
        self.inner.list(tenant_id, owner).await
    }

    /// Whether the group holds a grant for the method on the owner
    ///
    /// A stored `ALL` grant matches any method. The domain half of the
    /// original access checks; transport-level enforcement is the caller's
    /// concern.
    pub async fn allows(
        &self,
        tenant_id: Uuid,
        owner: &EntityRef,
        group: &str,
        method: AccessMethod,
    ) -> MosaicResult<bool> {
        let grants = self.inner.list(tenant_id, owner).await?;
        Ok(grants
            .iter()
            .any(|grant| grant.group == group && grant.grants(method)))
    }

    /// Delete every grant attached to the owner (hard entity deletion)
    pub async fn purge(&self, tenant_id: Uuid, owner: &EntityRef) -> MosaicResult<()> {
        self.inner.purge(tenant_id, owner).await
    }
}
