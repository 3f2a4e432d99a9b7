//! Configuration loading and management

use crate::core::entity::is_valid_key;
use crate::core::error::{ConfigError, MosaicError};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Runtime configuration for the content core
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Language key used by view localization when the requested language has
    /// no value
    pub default_language: String,

    /// Group key receiving the implicit wildcard grant on every owner
    pub admin_group: String,

    /// Buffer capacity of the event bus
    pub event_capacity: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_language: "EN".to_string(),
            admin_group: "admin".to_string(),
            event_capacity: 1024,
        }
    }
}

impl ContentConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values
    ///
    /// `default_language` and `admin_group` flow into composite keys, so both
    /// must match the entity key format.
    pub fn validate(&self) -> Result<(), MosaicError> {
        if !is_valid_key(&self.default_language) {
            return Err(ConfigError::InvalidValue {
                field: "default_language".to_string(),
                value: self.default_language.clone(),
                message: "must be a valid language key".to_string(),
            }
            .into());
        }
        if !is_valid_key(&self.admin_group) {
            return Err(ConfigError::InvalidValue {
                field: "admin_group".to_string(),
                value: self.admin_group.clone(),
                message: "must be a valid group key".to_string(),
            }
            .into());
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "event_capacity".to_string(),
                value: self.event_capacity.to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ContentConfig::default();
        assert_eq!(config.default_language, "EN");
        assert_eq!(config.admin_group, "admin");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
default_language: FR
admin_group: superusers
"#;
        let config = ContentConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.default_language, "FR");
        assert_eq!(config.admin_group, "superusers");
        // Unset fields fall back to defaults
        assert_eq!(config.event_capacity, 1024);
    }

    #[test]
    fn test_yaml_serialization_roundtrip() {
        let config = ContentConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ContentConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.default_language, config.default_language);
        assert_eq!(parsed.admin_group, config.admin_group);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let yaml = "default_language: 'E N'\n";
        assert!(ContentConfig::from_yaml_str(yaml).is_err());

        let yaml = "admin_group: 'no:colons'\n";
        assert!(ContentConfig::from_yaml_str(yaml).is_err());

        let yaml = "event_capacity: 0\n";
        assert!(ContentConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_language: DE").unwrap();

        let config = ContentConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.default_language, "DE");
        assert_eq!(config.admin_group, "admin");
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(ContentConfig::from_yaml_file("/nonexistent/mosaic.yaml").is_err());
    }
}
