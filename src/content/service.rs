//! Generic CRUD and facet orchestration over one entity type

use crate::config::ContentConfig;
use crate::content::patch::FacetPatch;
use crate::content::view::{EntityView, ViewOptions};
use crate::core::entity::{is_valid_key, ContentEntity, EntityRef};
use crate::core::error::{EntityError, MosaicResult, ValidationError};
use crate::core::events::{ContentEvent, EntityEvent, EventBus};
use crate::core::query::{Page, Paginated};
use crate::core::service::EntityStore;
use crate::facets::{
    CounterAttributeService, DescriptionAttributeService, FacetService, FacetStores,
    FileAttributeService, PermissionService, PointAttributeService, StatusService,
    StringAttributeService,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// The service layer over one entity type.
///
/// Owns the entity store and the seven facet services, and keeps every
/// mutation in one place: entity write first, facet reconciliations after,
/// event last. Several instances (one per entity type) share the same
/// [`FacetStores`] bundle and [`EventBus`] in a deployment.
#[derive(Clone)]
pub struct ContentService<E: ContentEntity> {
    entities: Arc<dyn EntityStore<E>>,
    strings: StringAttributeService,
    points: PointAttributeService,
    descriptions: DescriptionAttributeService,
    counters: CounterAttributeService,
    files: FileAttributeService,
    permissions: PermissionService,
    statuses: StatusService,
    events: EventBus,
    default_language: String,
}

impl<E: ContentEntity> ContentService<E> {
    pub fn new(
        entities: Arc<dyn EntityStore<E>>,
        stores: FacetStores,
        events: EventBus,
        config: &ContentConfig,
    ) -> Self {
        Self {
            entities,
            strings: FacetService::new(stores.strings, events.clone()),
            points: FacetService::new(stores.points, events.clone()),
            descriptions: FacetService::new(stores.descriptions, events.clone()),
            counters: FacetService::new(stores.counters, events.clone()),
            files: FacetService::new(stores.files, events.clone()),
            permissions: PermissionService::new(
                stores.permissions,
                events.clone(),
                config.admin_group.clone(),
            ),
            statuses: FacetService::new(stores.flags, events.clone()),
            events,
            default_language: config.default_language.clone(),
        }
    }

    /// Service backed by fresh in-memory stores.
    ///
    /// Intended for tests and single-type experiments; real deployments share
    /// one [`FacetStores`] bundle across their services.
    pub fn in_memory(config: &ContentConfig) -> Self {
        Self::new(
            Arc::new(crate::storage::InMemoryEntityStore::new()),
            FacetStores::in_memory(),
            EventBus::new(config.event_capacity),
            config,
        )
    }

    /// The permission service, for access checks on this entity family
    pub fn permissions(&self) -> &PermissionService {
        &self.permissions
    }

    /// The event bus mutations publish to
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Create an entity and reconcile its facets from the patch.
    ///
    /// The key and the whole patch are validated before any store write, so
    /// a rejected create leaves no entity row behind. The permission facet
    /// always ends up with at least the implicit administrative grant, even
    /// from an empty patch.
    pub async fn create(&self, entity: E, patch: FacetPatch) -> MosaicResult<EntityView<E>> {
        if !is_valid_key(entity.key()) {
            return Err(ValidationError::InvalidKey {
                field: "key".to_string(),
                value: entity.key().to_string(),
            }
            .into());
        }
        patch.validate()?;

        let entity = self.entities.insert(entity).await?;
        let tenant_id = entity.tenant_id();
        let owner = entity.entity_ref();

        self.apply_patch(tenant_id, &owner, patch).await?;

        tracing::debug!(
            entity_type = E::entity_type(),
            key = entity.key(),
            "Entity created"
        );
        self.events.publish(ContentEvent::Entity(EntityEvent::Created {
            tenant_id,
            entity_type: E::entity_type().to_string(),
            key: entity.key().to_string(),
        }));

        self.assemble(entity, &ViewOptions::default()).await
    }

    /// Fetch one entity as a view. Archived entities read as absent.
    pub async fn get(
        &self,
        tenant_id: Uuid,
        key: &str,
        options: &ViewOptions,
    ) -> MosaicResult<EntityView<E>> {
        let entity = self.fetch_live(tenant_id, key).await?;
        self.assemble(entity, options).await
    }

    /// List the tenant's live entities as key-ordered, paginated views
    pub async fn list(
        &self,
        tenant_id: Uuid,
        page: &Page,
        options: &ViewOptions,
    ) -> MosaicResult<Paginated<EntityView<E>>> {
        let live: Vec<E> = self
            .entities
            .list(tenant_id)
            .await?
            .into_iter()
            .filter(|entity| !entity.is_deleted())
            .collect();
        let total = live.len();

        let mut views = Vec::new();
        for entity in live.into_iter().skip(page.offset()).take(page.limit()) {
            views.push(self.assemble(entity, options).await?);
        }

        Ok(Paginated::new(views, page, total))
    }

    /// Replace the entity's intrinsic fields and reconcile its facets.
    ///
    /// The replacement keeps the stored creation time and gets a fresh
    /// `updated_at`. The key is immutable: `replacement` must carry the same
    /// key and tenant the update addresses.
    pub async fn update(
        &self,
        tenant_id: Uuid,
        key: &str,
        mut replacement: E,
        patch: FacetPatch,
    ) -> MosaicResult<EntityView<E>> {
        if replacement.key() != key {
            return Err(ValidationError::FieldError {
                field: "key".to_string(),
                message: format!(
                    "replacement key '{}' does not match '{}'",
                    replacement.key(),
                    key
                ),
            }
            .into());
        }
        if replacement.tenant_id() != tenant_id {
            return Err(ValidationError::FieldError {
                field: "tenant_id".to_string(),
                message: "replacement tenant does not match".to_string(),
            }
            .into());
        }
        patch.validate()?;

        let current = self.fetch_live(tenant_id, key).await?;
        replacement.set_created_at(current.created_at());
        replacement.set_deleted_at(None);
        replacement.touch();

        let entity = self.entities.update(replacement).await?;
        let owner = entity.entity_ref();
        self.apply_patch(tenant_id, &owner, patch).await?;

        tracing::debug!(
            entity_type = E::entity_type(),
            key = entity.key(),
            "Entity updated"
        );
        self.events.publish(ContentEvent::Entity(EntityEvent::Updated {
            tenant_id,
            entity_type: E::entity_type().to_string(),
            key: entity.key().to_string(),
        }));

        self.assemble(entity, &ViewOptions::default()).await
    }

    /// Soft-delete an entity. Its facet rows stay in place for a restore.
    pub async fn archive(&self, tenant_id: Uuid, key: &str) -> MosaicResult<()> {
        let mut entity = self.fetch_any(tenant_id, key).await?;
        if entity.is_deleted() {
            return Err(EntityError::Archived {
                entity_type: E::entity_type().to_string(),
                key: key.to_string(),
            }
            .into());
        }

        entity.set_deleted_at(Some(Utc::now()));
        self.entities.update(entity).await?;

        tracing::debug!(entity_type = E::entity_type(), key, "Entity archived");
        self.events.publish(ContentEvent::Entity(EntityEvent::Archived {
            tenant_id,
            entity_type: E::entity_type().to_string(),
            key: key.to_string(),
        }));

        Ok(())
    }

    /// Restore a soft-deleted entity
    pub async fn restore(&self, tenant_id: Uuid, key: &str) -> MosaicResult<()> {
        let mut entity = self.fetch_any(tenant_id, key).await?;
        if !entity.is_deleted() {
            return Err(EntityError::NotArchived {
                entity_type: E::entity_type().to_string(),
                key: key.to_string(),
            }
            .into());
        }

        entity.set_deleted_at(None);
        self.entities.update(entity).await?;

        tracing::debug!(entity_type = E::entity_type(), key, "Entity restored");
        self.events.publish(ContentEvent::Entity(EntityEvent::Restored {
            tenant_id,
            entity_type: E::entity_type().to_string(),
            key: key.to_string(),
        }));

        Ok(())
    }

    /// Hard-delete an entity and purge every facet row attached to it.
    ///
    /// Works on archived entities too; this is the terminal operation.
    pub async fn delete(&self, tenant_id: Uuid, key: &str) -> MosaicResult<()> {
        let entity = self.fetch_any(tenant_id, key).await?;
        let owner = entity.entity_ref();

        self.strings.purge(tenant_id, &owner).await?;
        self.points.purge(tenant_id, &owner).await?;
        self.descriptions.purge(tenant_id, &owner).await?;
        self.counters.purge(tenant_id, &owner).await?;
        self.files.purge(tenant_id, &owner).await?;
        self.permissions.purge(tenant_id, &owner).await?;
        self.statuses.purge(tenant_id, &owner).await?;
        self.entities.remove(tenant_id, key).await?;

        tracing::debug!(entity_type = E::entity_type(), key, "Entity deleted");
        self.events.publish(ContentEvent::Entity(EntityEvent::Deleted {
            tenant_id,
            entity_type: E::entity_type().to_string(),
            key: key.to_string(),
        }));

        Ok(())
    }

    async fn fetch_any(&self, tenant_id: Uuid, key: &str) -> MosaicResult<E> {
        self.entities
            .get(tenant_id, key)
            .await?
            .ok_or_else(|| {
                EntityError::NotFound {
                    entity_type: E::entity_type().to_string(),
                    key: key.to_string(),
                }
                .into()
            })
    }

    async fn fetch_live(&self, tenant_id: Uuid, key: &str) -> MosaicResult<E> {
        let entity = self.fetch_any(tenant_id, key).await?;
        if entity.is_deleted() {
            return Err(EntityError::NotFound {
                entity_type: E::entity_type().to_string(),
                key: key.to_string(),
            }
            .into());
        }
        Ok(entity)
    }

    // Facet reconciliations run in a fixed order after the entity write;
    // each family's apply is atomic in its store.
    async fn apply_patch(
        &self,
        tenant_id: Uuid,
        owner: &EntityRef,
        patch: FacetPatch,
    ) -> MosaicResult<()> {
        self.strings.reconcile(tenant_id, owner, patch.strings).await?;
        self.points.reconcile(tenant_id, owner, patch.points).await?;
        self.descriptions
            .reconcile(tenant_id, owner, patch.descriptions)
            .await?;
        self.counters
            .reconcile(tenant_id, owner, patch.counters)
            .await?;
        self.files.reconcile(tenant_id, owner, patch.files).await?;
        self.permissions
            .reconcile(tenant_id, owner, patch.permissions)
            .await?;
        self.statuses.reconcile(tenant_id, owner, patch.flags).await?;
        Ok(())
    }

    async fn assemble(&self, entity: E, options: &ViewOptions) -> MosaicResult<EntityView<E>> {
        let tenant_id = entity.tenant_id();
        let owner = entity.entity_ref();

        let strings = self.strings.list(tenant_id, &owner).await?;
        let points = self.points.list(tenant_id, &owner).await?;
        let descriptions = self.descriptions.list(tenant_id, &owner).await?;
        let counters = self.counters.list(tenant_id, &owner).await?;
        let files = self.files.list(tenant_id, &owner).await?;
        let permissions = self.permissions.list(tenant_id, &owner).await?;
        let flags = self.statuses.list(tenant_id, &owner).await?;

        Ok(EntityView::assemble(
            entity,
            strings,
            points,
            descriptions,
            counters,
            files,
            permissions,
            flags,
            options,
            &self.default_language,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attribute::StringInput;
    use crate::entities::Directory;

    fn service() -> ContentService<Directory> {
        ContentService::in_memory(&ContentConfig::default())
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_key() {
        let service = service();
        let err = service
            .create(Directory::new(Uuid::new_v4(), "not a key"), FacetPatch::new())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_key() {
        let service = service();
        let tenant_id = Uuid::new_v4();

        service
            .create(Directory::new(tenant_id, "CITIES"), FacetPatch::new())
            .await
            .unwrap();
        let err = service
            .create(Directory::new(tenant_id, "CITIES"), FacetPatch::new())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_update_requires_matching_key() {
        let service = service();
        let tenant_id = Uuid::new_v4();

        service
            .create(Directory::new(tenant_id, "CITIES"), FacetPatch::new())
            .await
            .unwrap();
        let err = service
            .update(
                tenant_id,
                "CITIES",
                Directory::new(tenant_id, "TOWNS"),
                FacetPatch::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_facet_input_fails_before_entity_insert() {
        let service = service();
        let tenant_id = Uuid::new_v4();

        let err = service
            .create(
                Directory::new(tenant_id, "CITIES"),
                FacetPatch::new()
                    .with_strings(vec![StringInput::new("NAME", "x").with_lang("E N")]),
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        // The whole create was rejected up front: no entity row was written
        let err = service
            .get(tenant_id, "CITIES", &ViewOptions::new())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_patch_leaves_update_untouched() {
        let service = service();
        let tenant_id = Uuid::new_v4();

        service
            .create(
                Directory::new(tenant_id, "CITIES"),
                FacetPatch::new().with_strings(vec![StringInput::new("NAME", "Cities")]),
            )
            .await
            .unwrap();

        let err = service
            .update(
                tenant_id,
                "CITIES",
                Directory::new(tenant_id, "CITIES"),
                FacetPatch::new()
                    .with_strings(vec![StringInput::new("9bad", "x")]),
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        // Existing facet state survives the rejected update
        let view = service
            .get(tenant_id, "CITIES", &ViewOptions::new())
            .await
            .unwrap();
        assert_eq!(view.attributes["NAME"].strings, vec!["Cities"]);
        assert_eq!(view.permissions[0].group, "admin");
    }
}
