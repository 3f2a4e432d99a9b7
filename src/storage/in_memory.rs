//! In-memory implementations of the store traits for testing and development

use crate::core::entity::{ContentEntity, EntityRef};
use crate::core::error::EntityError;
use crate::core::reconcile::{CompositeKey, FacetRow};
use crate::core::service::{EntityStore, FacetStore, FacetWrite};
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory entity store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Rows are keyed by (tenant, key).
#[derive(Clone)]
pub struct InMemoryEntityStore<E: ContentEntity> {
    entities: Arc<RwLock<HashMap<(Uuid, String), E>>>,
}

impl<E: ContentEntity> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<E: ContentEntity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<E: ContentEntity> EntityStore<E> for InMemoryEntityStore<E> {
    async fn insert(&self, entity: E) -> Result<E> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = (entity.tenant_id(), entity.key().to_string());
        if entities.contains_key(&slot) {
            return Err(EntityError::AlreadyExists {
                entity_type: E::entity_type().to_string(),
                key: entity.key().to_string(),
            }
            .into());
        }

        entities.insert(slot, entity.clone());

        Ok(entity)
    }

    async fn get(&self, tenant_id: Uuid, key: &str) -> Result<Option<E>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.get(&(tenant_id, key.to_string())).cloned())
    }

    async fn list(&self, tenant_id: Uuid) -> Result<Vec<E>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut rows: Vec<E> = entities
            .values()
            .filter(|entity| entity.tenant_id() == tenant_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.key().cmp(b.key()));

        Ok(rows)
    }

    async fn update(&self, entity: E) -> Result<E> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = (entity.tenant_id(), entity.key().to_string());
        if !entities.contains_key(&slot) {
            return Err(EntityError::NotFound {
                entity_type: E::entity_type().to_string(),
                key: entity.key().to_string(),
            }
            .into());
        }

        entities.insert(slot, entity.clone());

        Ok(entity)
    }

    async fn remove(&self, tenant_id: Uuid, key: &str) -> Result<()> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities.remove(&(tenant_id, key.to_string()));

        Ok(())
    }
}

/// In-memory facet store for one row family
///
/// Rows are keyed by their internal id. `apply` holds one write lock for the
/// whole plan, which is this backend's transaction analog.
#[derive(Clone)]
pub struct InMemoryFacetStore<R: FacetRow> {
    rows: Arc<RwLock<HashMap<Uuid, R>>>,
}

impl<R: FacetRow> InMemoryFacetStore<R> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<R: FacetRow> Default for InMemoryFacetStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn owned_sorted<R: FacetRow>(
    rows: &HashMap<Uuid, R>,
    tenant_id: Uuid,
    owner: &EntityRef,
) -> Vec<R> {
    let mut out: Vec<R> = rows
        .values()
        .filter(|row| row.tenant_id() == tenant_id && row.owner() == owner)
        .cloned()
        .collect();
    out.sort_by_cached_key(|row| row.composite_key());
    out
}

#[async_trait::async_trait]
impl<R: FacetRow> FacetStore<R> for InMemoryFacetStore<R> {
    async fn load(&self, tenant_id: Uuid, owner: &EntityRef) -> Result<Vec<R>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(owned_sorted(&rows, tenant_id, owner))
    }

    async fn apply(
        &self,
        tenant_id: Uuid,
        owner: &EntityRef,
        write: FacetWrite<R>,
    ) -> Result<Vec<R>> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        for id in &write.delete {
            rows.remove(id);
        }
        for row in write.insert {
            rows.insert(row.id(), row);
        }

        Ok(owned_sorted(&rows, tenant_id, owner))
    }

    async fn purge_owner(&self, tenant_id: Uuid, owner: &EntityRef) -> Result<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        rows.retain(|_, row| row.tenant_id() != tenant_id || row.owner() != owner);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attribute::{StringInput, StringValue};
    use crate::entities::Directory;

    #[tokio::test]
    async fn test_insert_and_get_entity() {
        let store = InMemoryEntityStore::<Directory>::new();
        let tenant_id = Uuid::new_v4();

        let directory = store
            .insert(Directory::new(tenant_id, "CITIES"))
            .await
            .unwrap();
        assert_eq!(directory.key, "CITIES");

        let fetched = store.get(tenant_id, "CITIES").await.unwrap();
        assert!(fetched.is_some());
        assert_eq!(fetched.unwrap().key, "CITIES");
    }

    #[tokio::test]
    async fn test_insert_conflict() {
        let store = InMemoryEntityStore::<Directory>::new();
        let tenant_id = Uuid::new_v4();

        store
            .insert(Directory::new(tenant_id, "CITIES"))
            .await
            .unwrap();

        let err = store
            .insert(Directory::new(tenant_id, "CITIES"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_list_is_key_ordered() {
        let store = InMemoryEntityStore::<Directory>::new();
        let tenant_id = Uuid::new_v4();

        for key in ["COUNTRIES", "AIRPORTS", "CITIES"] {
            store.insert(Directory::new(tenant_id, key)).await.unwrap();
        }

        let keys: Vec<String> = store
            .list(tenant_id)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.key)
            .collect();
        assert_eq!(keys, vec!["AIRPORTS", "CITIES", "COUNTRIES"]);
    }

    #[tokio::test]
    async fn test_update_requires_existing_row() {
        let store = InMemoryEntityStore::<Directory>::new();
        let tenant_id = Uuid::new_v4();

        let err = store
            .update(Directory::new(tenant_id, "CITIES"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_remove_entity() {
        let store = InMemoryEntityStore::<Directory>::new();
        let tenant_id = Uuid::new_v4();

        store
            .insert(Directory::new(tenant_id, "CITIES"))
            .await
            .unwrap();
        store.remove(tenant_id, "CITIES").await.unwrap();

        assert!(store.get(tenant_id, "CITIES").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entity_tenant_isolation() {
        let store = InMemoryEntityStore::<Directory>::new();
        let tenant1 = Uuid::new_v4();
        let tenant2 = Uuid::new_v4();

        store.insert(Directory::new(tenant1, "CITIES")).await.unwrap();

        assert!(store.get(tenant2, "CITIES").await.unwrap().is_none());
        assert!(store.list(tenant2).await.unwrap().is_empty());
    }

    fn string_row(tenant_id: Uuid, owner: &EntityRef, attribute: &str, value: &str) -> StringValue {
        StringValue::from_input(tenant_id, owner, StringInput::new(attribute, value))
    }

    #[tokio::test]
    async fn test_facet_apply_and_load() {
        let store = InMemoryFacetStore::<StringValue>::new();
        let tenant_id = Uuid::new_v4();
        let owner = EntityRef::new("directory", "CITIES");

        assert!(store.load(tenant_id, &owner).await.unwrap().is_empty());

        let rows = store
            .apply(
                tenant_id,
                &owner,
                FacetWrite {
                    insert: vec![
                        string_row(tenant_id, &owner, "NAME", "London"),
                        string_row(tenant_id, &owner, "CODE", "LDN"),
                    ],
                    delete: vec![],
                },
            )
            .await
            .unwrap();

        // Refreshed set comes back sorted by composite key
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].attribute, "CODE");
        assert_eq!(rows[1].attribute, "NAME");
    }

    #[tokio::test]
    async fn test_facet_apply_deletes() {
        let store = InMemoryFacetStore::<StringValue>::new();
        let tenant_id = Uuid::new_v4();
        let owner = EntityRef::new("directory", "CITIES");

        let rows = store
            .apply(
                tenant_id,
                &owner,
                FacetWrite {
                    insert: vec![string_row(tenant_id, &owner, "NAME", "London")],
                    delete: vec![],
                },
            )
            .await
            .unwrap();

        let refreshed = store
            .apply(
                tenant_id,
                &owner,
                FacetWrite {
                    insert: vec![],
                    delete: vec![rows[0].id],
                },
            )
            .await
            .unwrap();
        assert!(refreshed.is_empty());
    }

    #[tokio::test]
    async fn test_facet_purge_owner() {
        let store = InMemoryFacetStore::<StringValue>::new();
        let tenant_id = Uuid::new_v4();
        let cities = EntityRef::new("directory", "CITIES");
        let forms = EntityRef::new("form", "CONTACT");

        store
            .apply(
                tenant_id,
                &cities,
                FacetWrite {
                    insert: vec![string_row(tenant_id, &cities, "NAME", "London")],
                    delete: vec![],
                },
            )
            .await
            .unwrap();
        store
            .apply(
                tenant_id,
                &forms,
                FacetWrite {
                    insert: vec![string_row(tenant_id, &forms, "TITLE", "Contact")],
                    delete: vec![],
                },
            )
            .await
            .unwrap();

        store.purge_owner(tenant_id, &cities).await.unwrap();

        assert!(store.load(tenant_id, &cities).await.unwrap().is_empty());
        assert_eq!(store.load(tenant_id, &forms).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_facet_tenant_isolation() {
        let store = InMemoryFacetStore::<StringValue>::new();
        let tenant1 = Uuid::new_v4();
        let tenant2 = Uuid::new_v4();
        let owner = EntityRef::new("directory", "CITIES");

        store
            .apply(
                tenant1,
                &owner,
                FacetWrite {
                    insert: vec![string_row(tenant1, &owner, "NAME", "London")],
                    delete: vec![],
                },
            )
            .await
            .unwrap();

        assert!(store.load(tenant2, &owner).await.unwrap().is_empty());
    }
}
