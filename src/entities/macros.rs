//! Macros for reducing boilerplate when defining entities
//!
//! Every content entity type shares the same base shape: a string key, a
//! tenant id and lifecycle timestamps. The macro generates the struct, the
//! `ContentEntity` implementation and the usual constructors so entity
//! definitions stay declarative.

/// Complete macro to create a content entity with automatic trait
/// implementations
///
/// # Example
///
/// ```rust,ignore
/// use mosaic::prelude::*;
///
/// impl_content_entity!(
///     Directory,
///     "directory",
///     {}
/// );
///
/// impl_content_entity!(
///     Point,
///     "point",
///     {
///         directory: String,
///     }
/// );
///
/// // Usage
/// let point = Point::new(tenant_id, "LONDON", "CITIES".to_string());
/// ```
#[macro_export]
macro_rules! impl_content_entity {
    (
        $type:ident,
        $type_name:expr,
        {
            $( $specific_field:ident : $specific_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Opaque string key, the public identity within the tenant
            pub key: String,

            /// Tenant this entity belongs to
            pub tenant_id: ::uuid::Uuid,

            /// When this entity was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was soft-deleted (if applicable)
            pub deleted_at: Option<::chrono::DateTime<::chrono::Utc>>,
            $( pub $specific_field : $specific_type ),*
        }

        impl $crate::core::entity::ContentEntity for $type {
            fn entity_type() -> &'static str {
                $type_name
            }

            fn key(&self) -> &str {
                &self.key
            }

            fn tenant_id(&self) -> ::uuid::Uuid {
                self.tenant_id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }

            fn set_created_at(&mut self, at: ::chrono::DateTime<::chrono::Utc>) {
                self.created_at = at;
            }

            fn set_deleted_at(&mut self, at: Option<::chrono::DateTime<::chrono::Utc>>) {
                self.deleted_at = at;
                self.updated_at = ::chrono::Utc::now();
            }
        }

        // Utility methods
        impl $type {
            /// Create a new instance of this entity
            pub fn new(
                tenant_id: ::uuid::Uuid,
                key: impl Into<String>,
                $( $specific_field: $specific_type ),*
            ) -> Self {
                Self {
                    key: key.into(),
                    tenant_id,
                    created_at: ::chrono::Utc::now(),
                    updated_at: ::chrono::Utc::now(),
                    deleted_at: None,
                    $( $specific_field ),*
                }
            }

            /// Soft delete this entity (sets deleted_at timestamp)
            pub fn soft_delete(&mut self) {
                self.deleted_at = Some(::chrono::Utc::now());
                self.updated_at = ::chrono::Utc::now();
            }

            /// Restore a soft-deleted entity (clears deleted_at timestamp)
            pub fn restore(&mut self) {
                self.deleted_at = None;
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
