//! Permission grant rows
//!
//! A permission is a (group, method) grant attached to an owning entity. The
//! `All` method is a wildcard: a row carrying it grants every method. The
//! permission facet guarantees that at least one administrative grant exists
//! per owner; the service layer appends it to every desired set before
//! reconciliation.

use crate::core::entity::{is_valid_key, EntityRef};
use crate::core::error::ValidationError;
use crate::core::reconcile::{CompositeKey, FacetInput, FacetRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Access method a permission grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessMethod {
    Read,
    Write,
    Delete,
    /// Wildcard: grants every method
    All,
}

impl AccessMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMethod::Read => "READ",
            AccessMethod::Write => "WRITE",
            AccessMethod::Delete => "DELETE",
            AccessMethod::All => "ALL",
        }
    }
}

impl fmt::Display for AccessMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (group, method) grant on an owning entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner: EntityRef,
    /// Key of the `Group` entity this grant applies to
    pub group: String,
    pub method: AccessMethod,
    pub created_at: DateTime<Utc>,
}

impl Permission {
    /// Whether this row grants the given method (`All` matches any)
    pub fn grants(&self, method: AccessMethod) -> bool {
        self.method == AccessMethod::All || self.method == method
    }
}

/// Desired permission grant for a reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionInput {
    pub group: String,
    pub method: AccessMethod,
}

impl PermissionInput {
    pub fn new(group: impl Into<String>, method: AccessMethod) -> Self {
        Self {
            group: group.into(),
            method,
        }
    }
}

impl FacetInput for PermissionInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_valid_key(&self.group) {
            Ok(())
        } else {
            Err(ValidationError::InvalidKey {
                field: "group".to_string(),
                value: self.group.clone(),
            })
        }
    }
}

impl CompositeKey for PermissionInput {
    fn composite_key(&self) -> String {
        format!("{}:{}", self.group, self.method.as_str())
    }
}

impl CompositeKey for Permission {
    fn composite_key(&self) -> String {
        format!("{}:{}", self.group, self.method.as_str())
    }
}

impl FacetRow for Permission {
    type Input = PermissionInput;

    fn family() -> &'static str {
        "permission"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    fn owner(&self) -> &EntityRef {
        &self.owner
    }

    fn from_input(tenant_id: Uuid, owner: &EntityRef, input: PermissionInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            owner: owner.clone(),
            group: input.group,
            method: input.method,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> EntityRef {
        EntityRef::new("form", "CONTACT")
    }

    #[test]
    fn test_composite_key() {
        let input = PermissionInput::new("editors", AccessMethod::Write);
        assert_eq!(input.composite_key(), "editors:WRITE");
    }

    #[test]
    fn test_grants_exact_method() {
        let row = Permission::from_input(
            Uuid::new_v4(),
            &owner(),
            PermissionInput::new("editors", AccessMethod::Write),
        );
        assert!(row.grants(AccessMethod::Write));
        assert!(!row.grants(AccessMethod::Delete));
    }

    #[test]
    fn test_all_grants_every_method() {
        let row = Permission::from_input(
            Uuid::new_v4(),
            &owner(),
            PermissionInput::new("admin", AccessMethod::All),
        );
        assert!(row.grants(AccessMethod::Read));
        assert!(row.grants(AccessMethod::Write));
        assert!(row.grants(AccessMethod::Delete));
        assert!(row.grants(AccessMethod::All));
    }

    #[test]
    fn test_method_serde_uppercase() {
        let json = serde_json::to_string(&AccessMethod::Read).unwrap();
        assert_eq!(json, "\"READ\"");

        let method: AccessMethod = serde_json::from_str("\"ALL\"").unwrap();
        assert_eq!(method, AccessMethod::All);
    }

    #[test]
    fn test_validation_rejects_invalid_group() {
        assert!(PermissionInput::new("not a group", AccessMethod::Read)
            .validate()
            .is_err());
        assert!(PermissionInput::new("editors", AccessMethod::Read)
            .validate()
            .is_ok());
    }
}
