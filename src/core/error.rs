//! Typed error handling for the mosaic content core
//!
//! This module provides a typed error hierarchy that enables callers to
//! handle errors specifically rather than dealing with generic
//! `anyhow::Error` values.
//!
//! # Error Categories
//!
//! - [`EntityError`]: Errors related to entity operations (CRUD)
//! - [`FacetError`]: Errors related to facet reconciliation
//! - [`ConfigError`]: Errors related to configuration parsing and validation
//! - [`ValidationError`]: Errors related to input validation
//! - [`StorageError`]: Errors related to storage backends
//!
//! # Example
//!
//! ```rust,ignore
//! use mosaic::prelude::*;
//!
//! async fn get_directory(tenant_id: Uuid, key: &str) -> Result<Directory, MosaicError> {
//!     service.get(tenant_id, key).await?.ok_or(MosaicError::Entity(EntityError::NotFound {
//!         entity_type: "directory".to_string(),
//!         key: key.to_string(),
//!     }))
//! }
//!
//! // Callers can match specific errors
//! match result {
//!     Ok(entity) => println!("Found: {:?}", entity),
//!     Err(MosaicError::Entity(EntityError::NotFound { key, .. })) => {
//!         println!("Entity {} not found", key);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// The main error type for the mosaic content core
///
/// This enum encompasses all possible errors that can occur within the crate.
/// Each variant contains a more specific error type for that category.
#[derive(Debug)]
pub enum MosaicError {
    /// Entity-related errors (CRUD operations)
    Entity(EntityError),

    /// Facet reconciliation errors
    Facet(FacetError),

    /// Configuration errors
    Config(ConfigError),

    /// Validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MosaicError::Entity(e) => write!(f, "{}", e),
            MosaicError::Facet(e) => write!(f, "{}", e),
            MosaicError::Config(e) => write!(f, "{}", e),
            MosaicError::Validation(e) => write!(f, "{}", e),
            MosaicError::Storage(e) => write!(f, "{}", e),
            MosaicError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MosaicError::Entity(e) => Some(e),
            MosaicError::Facet(e) => Some(e),
            MosaicError::Config(e) => Some(e),
            MosaicError::Validation(e) => Some(e),
            MosaicError::Storage(e) => Some(e),
            MosaicError::Internal(_) => None,
        }
    }
}

/// Error report structure for logs and API layers built on top of the crate
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl MosaicError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MosaicError::Entity(e) => e.error_code(),
            MosaicError::Facet(e) => e.error_code(),
            MosaicError::Config(_) => "CONFIG_ERROR",
            MosaicError::Validation(_) => "VALIDATION_ERROR",
            MosaicError::Storage(_) => "STORAGE_ERROR",
            MosaicError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            MosaicError::Entity(EntityError::NotFound { entity_type, key }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "key": key
                }))
            }
            MosaicError::Entity(EntityError::AlreadyExists { entity_type, key }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "key": key
                }))
            }
            MosaicError::Facet(FacetError::OperationFailed { family, owner, .. }) => {
                Some(serde_json::json!({
                    "family": family,
                    "owner": owner
                }))
            }
            MosaicError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found
    NotFound {
        entity_type: String,
        key: String,
    },

    /// Entity already exists (conflict)
    AlreadyExists {
        entity_type: String,
        key: String,
    },

    /// Entity is soft-deleted and cannot be mutated
    Archived {
        entity_type: String,
        key: String,
    },

    /// Entity is not soft-deleted, so it cannot be restored
    NotArchived {
        entity_type: String,
        key: String,
    },

    /// Entity operation failed
    OperationFailed {
        entity_type: String,
        operation: String,
        message: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, key } => {
                write!(f, "{} with key '{}' not found", entity_type, key)
            }
            EntityError::AlreadyExists { entity_type, key } => {
                write!(f, "{} with key '{}' already exists", entity_type, key)
            }
            EntityError::Archived { entity_type, key } => {
                write!(f, "{} with key '{}' is archived", entity_type, key)
            }
            EntityError::NotArchived { entity_type, key } => {
                write!(f, "{} with key '{}' is not archived", entity_type, key)
            }
            EntityError::OperationFailed {
                entity_type,
                operation,
                message,
            } => {
                write!(f, "Failed to {} {}: {}", operation, entity_type, message)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::Archived { .. } => "ENTITY_ARCHIVED",
            EntityError::NotArchived { .. } => "ENTITY_NOT_ARCHIVED",
            EntityError::OperationFailed { .. } => "ENTITY_OPERATION_FAILED",
        }
    }
}

impl From<EntityError> for MosaicError {
    fn from(err: EntityError) -> Self {
        MosaicError::Entity(err)
    }
}

// =============================================================================
// Facet Errors
// =============================================================================

/// Errors related to facet reconciliation
#[derive(Debug)]
pub enum FacetError {
    /// Applying a reconciliation plan failed
    OperationFailed {
        family: String,
        owner: String,
        message: String,
    },

    /// A facet input referenced an invalid key
    InvalidReference {
        family: String,
        field: String,
        value: String,
    },
}

impl fmt::Display for FacetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetError::OperationFailed {
                family,
                owner,
                message,
            } => {
                write!(
                    f,
                    "Failed to reconcile {} facet for '{}': {}",
                    family, owner, message
                )
            }
            FacetError::InvalidReference {
                family,
                field,
                value,
            } => {
                write!(
                    f,
                    "Invalid {} reference in {} input: '{}'",
                    field, family, value
                )
            }
        }
    }
}

impl std::error::Error for FacetError {}

impl FacetError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FacetError::OperationFailed { .. } => "FACET_OPERATION_FAILED",
            FacetError::InvalidReference { .. } => "FACET_INVALID_REFERENCE",
        }
    }
}

impl From<FacetError> for MosaicError {
    fn from(err: FacetError) -> Self {
        MosaicError::Facet(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound {
        path: String,
    },

    /// IO error while reading configuration
    IoError {
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for MosaicError {
    fn from(err: ConfigError) -> Self {
        MosaicError::Config(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError {
        field: String,
        message: String,
    },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// A key does not match the entity key format
    InvalidKey {
        field: String,
        value: String,
    },

    /// Invalid JSON format
    InvalidJson {
        message: String,
    },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidKey { field, value } => {
                write!(
                    f,
                    "Invalid key '{}' for field '{}': keys must start with a letter and contain only letters, digits, '_' or '-'",
                    value, field
                )
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for MosaicError {
    fn from(err: ValidationError) -> Self {
        MosaicError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Lock acquisition or concurrent access error
    LockError {
        message: String,
    },

    /// Atomic write application error
    ApplyError {
        message: String,
    },

    /// Data integrity error
    IntegrityError {
        message: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockError { message } => {
                write!(f, "Failed to acquire store lock: {}", message)
            }
            StorageError::ApplyError { message } => {
                write!(f, "Failed to apply write plan: {}", message)
            }
            StorageError::IntegrityError { message } => {
                write!(f, "Data integrity error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for MosaicError {
    fn from(err: StorageError) -> Self {
        MosaicError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for MosaicError {
    fn from(err: serde_json::Error) -> Self {
        MosaicError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        MosaicError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for MosaicError {
    fn from(err: serde_yaml::Error) -> Self {
        MosaicError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error for service boundaries
///
/// Store implementations return `anyhow::Result` and may wrap any of the
/// typed errors; the downcast chain recovers them so error codes survive
/// the boundary.
impl From<anyhow::Error> for MosaicError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<MosaicError>() {
            Ok(e) => return e,
            Err(err) => err,
        };
        let err = match err.downcast::<EntityError>() {
            Ok(e) => return e.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<FacetError>() {
            Ok(e) => return e.into(),
            Err(err) => err,
        };
        let err = match err.downcast::<StorageError>() {
            Ok(e) => return e.into(),
            Err(err) => err,
        };
        MosaicError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for mosaic operations
pub type MosaicResult<T> = Result<T, MosaicError>;

// =============================================================================
// Tests
// =============================================================================
