//! Entity traits defining the common shape of all content types

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// Maximum length of an entity key, in bytes.
pub const MAX_KEY_LENGTH: usize = 64;

/// Base trait for all content entities in the system.
///
/// This trait provides the fundamental shape shared by every entity type.
/// All entities have:
/// - key: Opaque string identity, unique per (tenant, entity type)
/// - tenant_id: Tenant the entity belongs to
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
/// - deleted_at: Soft deletion timestamp (optional)
///
/// Typed attribute values, permissions and status flags are NOT fields of the
/// entity itself; they attach through the facet services and are addressed by
/// the entity's [`EntityRef`].
pub trait ContentEntity: Clone + Send + Sync + 'static {
    /// The entity type name (e.g. "directory", "form")
    fn entity_type() -> &'static str;

    /// Get the opaque string key identifying this entity within its tenant
    fn key(&self) -> &str;

    /// Get the tenant ID for multi-tenant isolation
    fn tenant_id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the deletion timestamp (soft delete)
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Update the updated_at timestamp to now
    fn touch(&mut self);

    /// Overwrite the creation timestamp.
    ///
    /// Used when replacing an entity's intrinsic fields so the replacement
    /// keeps the original creation time.
    fn set_created_at(&mut self, at: DateTime<Utc>);

    /// Set or clear the soft-deletion timestamp
    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>);

    // === Utility Methods ===

    /// Check if the entity has been soft-deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Type-erased reference to this entity, used when attaching facet rows
    fn entity_ref(&self) -> EntityRef {
        EntityRef::new(Self::entity_type(), self.key())
    }
}

/// Reference to an owning entity instance
///
/// CRITICAL: `entity_type` is a String, not an enum, to keep facet rows
/// completely decoupled from concrete entity types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntityRef {
    /// The type of entity (e.g. "directory", "form")
    pub entity_type: String,

    /// The opaque string key of the entity
    pub key: String,
}

impl EntityRef {
    /// Create a new entity reference
    pub fn new(entity_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_type, self.key)
    }
}

/// Check whether a string is a valid entity key.
///
/// Keys are opaque slugs: they start with a letter and contain only letters,
/// digits, `_` and `-`, up to [`MAX_KEY_LENGTH`] bytes. `:` is excluded so
/// composite keys can join key segments with `:` unambiguously.
pub fn is_valid_key(key: &str) -> bool {
    static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = KEY_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap());
    key.len() <= MAX_KEY_LENGTH && regex.is_match(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Example entity for testing trait definitions
    #[derive(Clone, Debug, Serialize, Deserialize)]
    struct TestEntity {
        key: String,
        tenant_id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl ContentEntity for TestEntity {
        fn entity_type() -> &'static str {
            "test_entity"
        }

        fn key(&self) -> &str {
            &self.key
        }

        fn tenant_id(&self) -> Uuid {
            self.tenant_id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }

        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }

        fn touch(&mut self) {
            self.updated_at = Utc::now();
        }

        fn set_created_at(&mut self, at: DateTime<Utc>) {
            self.created_at = at;
        }

        fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>) {
            self.deleted_at = at;
        }
    }

    fn sample() -> TestEntity {
        let now = Utc::now();
        TestEntity {
            key: "SAMPLE".to_string(),
            tenant_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_entity_is_deleted() {
        let mut entity = sample();

        assert!(!entity.is_deleted());

        entity.set_deleted_at(Some(Utc::now()));
        assert!(entity.is_deleted());

        entity.set_deleted_at(None);
        assert!(!entity.is_deleted());
    }

    #[test]
    fn test_entity_ref() {
        let entity = sample();
        let reference = entity.entity_ref();

        assert_eq!(reference.entity_type, "test_entity");
        assert_eq!(reference.key, "SAMPLE");
        assert_eq!(reference.to_string(), "test_entity/SAMPLE");
    }

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("NAME"));
        assert!(is_valid_key("default"));
        assert!(is_valid_key("CITY_LIST"));
        assert!(is_valid_key("page-2"));
        assert!(is_valid_key("a"));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("2PAC"));
        assert!(!is_valid_key("_lead"));
        assert!(!is_valid_key("has space"));
        assert!(!is_valid_key("colon:key"));
        assert!(!is_valid_key("émoji"));
        assert!(!is_valid_key(&"x".repeat(MAX_KEY_LENGTH + 1)));
    }

    #[test]
    fn test_key_length_boundary() {
        assert!(is_valid_key(&"x".repeat(MAX_KEY_LENGTH)));
    }
}
