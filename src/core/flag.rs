//! Status flag rows
//!
//! A status flag tags an owning entity with an entry from the `Status`
//! register. Flags are a plain key set per owner, so their composite key is
//! the status key itself.

use crate::core::entity::{is_valid_key, EntityRef};
use crate::core::error::ValidationError;
use crate::core::reconcile::{CompositeKey, FacetInput, FacetRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A status tag on an owning entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusFlag {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner: EntityRef,
    /// Key of the `Status` entity this flag references
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Desired status flag for a reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlagInput {
    pub status: String,
}

impl FlagInput {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

impl FacetInput for FlagInput {
    fn validate(&self) -> Result<(), ValidationError> {
        if is_valid_key(&self.status) {
            Ok(())
        } else {
            Err(ValidationError::InvalidKey {
                field: "status".to_string(),
                value: self.status.clone(),
            })
        }
    }
}

impl CompositeKey for FlagInput {
    fn composite_key(&self) -> String {
        self.status.clone()
    }
}

impl CompositeKey for StatusFlag {
    fn composite_key(&self) -> String {
        self.status.clone()
    }
}

impl FacetRow for StatusFlag {
    type Input = FlagInput;

    fn family() -> &'static str {
        "status"
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

    fn from_input(tenant_id: Uuid, owner: &EntityRef, input: FlagInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            owner: owner.clone(),
            status: input.status,
            created_at: Utc::now(),
        }
    }
}
