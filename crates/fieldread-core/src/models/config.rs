//! Configuration structures for extraction and result reporting.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldreadError, Result};
use crate::models::result::{ConfidenceTier, FieldKind};

/// Main configuration for fieldread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldreadConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Field to extract when none is given explicitly.
    pub default_kind: FieldKind,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_kind: FieldKind::Vin,
        }
    }
}

/// Result reporting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Include every candidate in reports.
    pub include_candidates: bool,

    /// Include the normalized text in reports.
    pub include_normalized_text: bool,

    /// Results below this tier (or without a value) are flagged for verification.
    pub verify_below: ConfidenceTier,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_candidates: true,
            include_normalized_text: false,
            verify_below: ConfidenceTier::High,
        }
    }
}

impl FieldreadConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| FieldreadError::Config(format!("invalid config: {}", e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = FieldreadConfig::from_json(r#"{"output": {"verify_below": "medium"}}"#).unwrap();

        assert_eq!(config.extraction.default_kind, FieldKind::Vin);
        assert_eq!(config.output.verify_below, ConfidenceTier::Medium);
        assert!(config.output.include_candidates);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = FieldreadConfig::from_json(r#"{"extraction": {"default_kind": "plate"}}"#)
            .unwrap_err();
        assert!(matches!(err, FieldreadError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FieldreadConfig::default();
        config.extraction.default_kind = FieldKind::Mileage;
        config.output.include_normalized_text = true;
        config.save(&path).unwrap();

        assert_eq!(FieldreadConfig::from_file(&path).unwrap(), config);
    }
}
