//! Typed attribute value rows
//!
//! Five row families carry the typed values attached to owning entities:
//! localized strings, point references, localized descriptions, counters and
//! file references. Each row names the `Attribute` definition it belongs to,
//! carries a stable internal id, and derives a composite key from its payload
//! so the reconciliation engine can diff stored rows against desired inputs.

use crate::core::entity::{is_valid_key, EntityRef};
use crate::core::error::ValidationError;
use crate::core::reconcile::{CompositeKey, FacetInput, FacetRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The value type of an `Attribute` definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    String,
    Point,
    Description,
    Counter,
    File,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::Point => "point",
            AttributeKind::Description => "description",
            AttributeKind::Counter => "counter",
            AttributeKind::File => "file",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Optional key segments (lang, measure) render as an empty segment so that
// "no language" and a concrete language never collide.
fn option_segment(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn check_key(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_valid_key(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidKey {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn check_optional_key(field: &'static str, value: &Option<String>) -> Result<(), ValidationError> {
    match value {
        Some(v) => check_key(field, v),
        None => Ok(()),
    }
}

// =============================================================================
// Strings
// =============================================================================

/// A localized string value attached to an owning entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringValue {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner: EntityRef,
    /// Key of the `Attribute` definition this value belongs to
    pub attribute: String,
    /// Language key, absent for a language-neutral value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

/// Desired string value for a reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringInput {
    pub attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub value: String,
}

impl StringInput {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            lang: None,
            value: value.into(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl FacetInput for StringInput {
    fn validate(&self) -> Result<(), ValidationError> {
        check_key("attribute", &self.attribute)?;
        check_optional_key("lang", &self.lang)
    }
}

impl CompositeKey for StringInput {
    fn composite_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.attribute,
            option_segment(&self.lang),
            self.value
        )
    }
}

impl CompositeKey for StringValue {
    fn composite_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.attribute,
            option_segment(&self.lang),
            self.value
        )
    }
}

impl FacetRow for StringValue {
    type Input = StringInput;

    fn family() -> &'static str {
        "string"
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

    fn from_input(tenant_id: Uuid, owner: &EntityRef, input: StringInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            owner: owner.clone(),
            attribute: input.attribute,
            lang: input.lang,
            value: input.value,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Points
// =============================================================================

/// A reference to a `Point` entity, attached through a point-typed attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointValue {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner: EntityRef,
    pub attribute: String,
    /// Key of the referenced `Point` entity
    pub point: String,
    pub created_at: DateTime<Utc>,
}

/// Desired point reference for a reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointInput {
    pub attribute: String,
    pub point: String,
}

impl PointInput {
    pub fn new(attribute: impl Into<String>, point: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            point: point.into(),
        }
    }
}

impl FacetInput for PointInput {
    fn validate(&self) -> Result<(), ValidationError> {
        check_key("attribute", &self.attribute)?;
        check_key("point", &self.point)
    }
}

impl CompositeKey for PointInput {
    fn composite_key(&self) -> String {
        format!("{}:{}", self.attribute, self.point)
    }
}

impl CompositeKey for PointValue {
    fn composite_key(&self) -> String {
        format!("{}:{}", self.attribute, self.point)
    }
}

impl FacetRow for PointValue {
    type Input = PointInput;

    fn family() -> &'static str {
        "point"
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

    fn from_input(tenant_id: Uuid, owner: &EntityRef, input: PointInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            owner: owner.clone(),
            attribute: input.attribute,
            point: input.point,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Descriptions
// =============================================================================

/// A localized long-form text value attached to an owning entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionValue {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner: EntityRef,
    pub attribute: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub value: String,
    pub created_at: DateTime<Utc>,
}

/// Desired description value for a reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionInput {
    pub attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    pub value: String,
}

impl DescriptionInput {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            lang: None,
            value: value.into(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl FacetInput for DescriptionInput {
    fn validate(&self) -> Result<(), ValidationError> {
        check_key("attribute", &self.attribute)?;
        check_optional_key("lang", &self.lang)
    }
}

impl CompositeKey for DescriptionInput {
    fn composite_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.attribute,
            option_segment(&self.lang),
            self.value
        )
    }
}

impl CompositeKey for DescriptionValue {
    fn composite_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.attribute,
            option_segment(&self.lang),
            self.value
        )
    }
}

impl FacetRow for DescriptionValue {
    type Input = DescriptionInput;

    fn family() -> &'static str {
        "description"
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

    fn from_input(tenant_id: Uuid, owner: &EntityRef, input: DescriptionInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            owner: owner.clone(),
            attribute: input.attribute,
            lang: input.lang,
            value: input.value,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Counters
// =============================================================================

/// A numeric value attached to an owning entity, optionally scoped to a
/// `Measure` entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterValue {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner: EntityRef,
    pub attribute: String,
    /// Key of the `Measure` entity, absent for a unitless counter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    pub count: i64,
    pub created_at: DateTime<Utc>,
}

/// Desired counter value for a reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterInput {
    pub attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    pub count: i64,
}

impl CounterInput {
    pub fn new(attribute: impl Into<String>, count: i64) -> Self {
        Self {
            attribute: attribute.into(),
            measure: None,
            count,
        }
    }

    pub fn with_measure(mut self, measure: impl Into<String>) -> Self {
        self.measure = Some(measure.into());
        self
    }
}

impl FacetInput for CounterInput {
    fn validate(&self) -> Result<(), ValidationError> {
        check_key("attribute", &self.attribute)?;
        check_optional_key("measure", &self.measure)
    }
}

impl CompositeKey for CounterInput {
    fn composite_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.attribute,
            option_segment(&self.measure),
            self.count
        )
    }
}

impl CompositeKey for CounterValue {
    fn composite_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.attribute,
            option_segment(&self.measure),
            self.count
        )
    }
}

impl FacetRow for CounterValue {
    type Input = CounterInput;

    fn family() -> &'static str {
        "counter"
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

    fn from_input(tenant_id: Uuid, owner: &EntityRef, input: CounterInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            owner: owner.clone(),
            attribute: input.attribute,
            measure: input.measure,
            count: input.count,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Files
// =============================================================================

/// A reference to a `File` entity, attached through a file-typed attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileValue {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub owner: EntityRef,
    pub attribute: String,
    /// Key of the referenced `File` entity
    pub file: String,
    pub created_at: DateTime<Utc>,
}

/// Desired file reference for a reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInput {
    pub attribute: String,
    pub file: String,
}

impl FileInput {
    pub fn new(attribute: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            file: file.into(),
        }
    }
}

impl FacetInput for FileInput {
    fn validate(&self) -> Result<(), ValidationError> {
        check_key("attribute", &self.attribute)?;
        check_key("file", &self.file)
    }
}

impl CompositeKey for FileInput {
    fn composite_key(&self) -> String {
        format!("{}:{}", self.attribute, self.file)
    }
}

impl CompositeKey for FileValue {
    fn composite_key(&self) -> String {
        format!("{}:{}", self.attribute, self.file)
    }
}

impl FacetRow for FileValue {
    type Input = FileInput;

    fn family() -> &'static str {
        "file"
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

    fn from_input(tenant_id: Uuid, owner: &EntityRef, input: FileInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            owner: owner.clone(),
            attribute: input.attribute,
            file: input.file,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
