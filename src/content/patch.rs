//! Facet input DTO for create and update operations

use crate::core::attribute::{
    CounterInput, DescriptionInput, FileInput, PointInput, StringInput,
};
use crate::core::error::ValidationError;
use crate::core::flag::FlagInput;
use crate::core::permission::PermissionInput;
use crate::core::reconcile::FacetInput;
use serde::Deserialize;

/// The complete desired facet state of one entity.
///
/// Every list is the full desired set for its family: an omitted or empty
/// list clears that facet. Permissions are the one exception in effect, not
/// in shape — the implicit administrative grant survives even an empty
/// `permissions` list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FacetPatch {
    pub strings: Vec<StringInput>,
    pub points: Vec<PointInput>,
    pub descriptions: Vec<DescriptionInput>,
    pub counters: Vec<CounterInput>,
    pub files: Vec<FileInput>,
    pub permissions: Vec<PermissionInput>,
    pub flags: Vec<FlagInput>,
}

impl FacetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strings(mut self, strings: Vec<StringInput>) -> Self {
        self.strings = strings;
        self
    }

    pub fn with_points(mut self, points: Vec<PointInput>) -> Self {
        self.points = points;
        self
    }

    pub fn with_descriptions(mut self, descriptions: Vec<DescriptionInput>) -> Self {
        self.descriptions = descriptions;
        self
    }

    pub fn with_counters(mut self, counters: Vec<CounterInput>) -> Self {
        self.counters = counters;
        self
    }

    pub fn with_files(mut self, files: Vec<FileInput>) -> Self {
        self.files = files;
        self
    }

    pub fn with_permissions(mut self, permissions: Vec<PermissionInput>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_flags(mut self, flags: Vec<FlagInput>) -> Self {
        self.flags = flags;
        self
    }

    /// Check every input's key-format fields across all seven families.
    ///
    /// Validation is pure, so the content service runs it before touching any
    /// store: a patch with one bad input fails the whole mutation up front
    /// instead of leaving partial facet state behind.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for input in &self.strings {
            input.validate()?;
        }
        for input in &self.points {
            input.validate()?;
        }
        for input in &self.descriptions {
            input.validate()?;
        }
        for input in &self.counters {
            input.validate()?;
        }
        for input in &self.files {
            input.validate()?;
        }
        for input in &self.permissions {
            input.validate()?;
        }
        for input in &self.flags {
            input.validate()?;
        }
        Ok(())
    }
}
