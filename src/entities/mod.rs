//! Content entity definitions
//!
//! All entity types share the common shape generated by
//! [`impl_content_entity!`](crate::impl_content_entity): an opaque string
//! key, a tenant id and lifecycle timestamps. Attribute values, permissions
//! and status flags attach to any of them through the facet services.

use crate::core::attribute::AttributeKind;
use crate::impl_content_entity;

pub mod macros;

// =============================================================================
// Registers
// =============================================================================

// A controlled vocabulary; points belong to exactly one directory
impl_content_entity!(Directory, "directory", {});

// An entry of a directory, referenced by point-typed attribute values
impl_content_entity!(
    Point,
    "point",
    {
        directory: String,
    }
);

// A unit of measurement for counter values
impl_content_entity!(Measure, "measure", {});

// A typed field definition; point-typed attributes name their directory
impl_content_entity!(
    Attribute,
    "attribute",
    {
        kind: AttributeKind,
        directory: Option<String>,
    }
);

// A language of the localization register
impl_content_entity!(Language, "language", {});

// An entry of the status register, referenced by status flags
impl_content_entity!(Status, "status", {});

// =============================================================================
// Media
// =============================================================================

// A named set of files
impl_content_entity!(Collection, "collection", {});

// A file metadata record; byte storage is the deployment's concern
impl_content_entity!(
    File,
    "file",
    {
        collection: String,
        original: String,
        mimetype: String,
        path: String,
    }
);

// =============================================================================
// Pages
// =============================================================================

// A content area of the site
impl_content_entity!(Block, "block", {});

// A subdivision of a block
impl_content_entity!(
    Section,
    "section",
    {
        block: String,
    }
);

// A content item within a block
impl_content_entity!(
    Element,
    "element",
    {
        block: String,
    }
);

// =============================================================================
// Forms
// =============================================================================

// A submission form definition
impl_content_entity!(Form, "form", {});

// A submitted form payload
impl_content_entity!(
    FormResult,
    "result",
    {
        form: String,
        data: ::serde_json::Value,
    }
);

// =============================================================================
// Access
// =============================================================================

// An account of the admin backend
impl_content_entity!(
    User,
    "user",
    {
        login: String,
        groups: Vec<String>,
    }
);

// A permission group, referenced by grants and user memberships
impl_content_entity!(Group, "group", {});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::ContentEntity;
    use uuid::Uuid;

    #[test]
    fn test_entity_type_names() {
        assert_eq!(Directory::entity_type(), "directory");
        assert_eq!(Point::entity_type(), "point");
        assert_eq!(Measure::entity_type(), "measure");
        assert_eq!(Attribute::entity_type(), "attribute");
        assert_eq!(Language::entity_type(), "language");
        assert_eq!(Status::entity_type(), "status");
        assert_eq!(Collection::entity_type(), "collection");
        assert_eq!(File::entity_type(), "file");
        assert_eq!(Block::entity_type(), "block");
        assert_eq!(Section::entity_type(), "section");
        assert_eq!(Element::entity_type(), "element");
        assert_eq!(Form::entity_type(), "form");
        assert_eq!(FormResult::entity_type(), "result");
        assert_eq!(User::entity_type(), "user");
        assert_eq!(Group::entity_type(), "group");
    }

    #[test]
    fn test_point_belongs_to_directory() {
        let point = Point::new(Uuid::new_v4(), "LONDON", "CITIES".to_string());
        assert_eq!(point.directory, "CITIES");
        assert_eq!(point.key(), "LONDON");
    }

    #[test]
    fn test_attribute_carries_kind() {
        let attr = Attribute::new(
            Uuid::new_v4(),
            "CITY",
            AttributeKind::Point,
            Some("CITIES".to_string()),
        );
        assert_eq!(attr.kind, AttributeKind::Point);
        assert_eq!(attr.directory.as_deref(), Some("CITIES"));

        let name = Attribute::new(Uuid::new_v4(), "NAME", AttributeKind::String, None);
        assert_eq!(name.kind, AttributeKind::String);
        assert!(name.directory.is_none());
    }

    #[test]
    fn test_file_metadata_fields() {
        let file = File::new(
            Uuid::new_v4(),
            "SKYLINE",
            "PHOTOS".to_string(),
            "skyline.jpg".to_string(),
            "image/jpeg".to_string(),
            "2026/08/skyline.jpg".to_string(),
        );
        assert_eq!(file.collection, "PHOTOS");
        assert_eq!(file.mimetype, "image/jpeg");
    }

    #[test]
    fn test_form_result_payload() {
        let result = FormResult::new(
            Uuid::new_v4(),
            "R-2026-001",
            "CONTACT".to_string(),
            serde_json::json!({"email": "jo@example.com", "message": "hi"}),
        );
        assert_eq!(result.form, "CONTACT");
        assert_eq!(result.data["email"], "jo@example.com");
    }

    #[test]
    fn test_entity_serialization() {
        let attr = Attribute::new(Uuid::new_v4(), "CITY", AttributeKind::Point, None);
        let json = serde_json::to_value(&attr).unwrap();

        assert_eq!(json["key"], "CITY");
        assert_eq!(json["kind"], "point");
        assert!(json["deleted_at"].is_null());
    }
}
