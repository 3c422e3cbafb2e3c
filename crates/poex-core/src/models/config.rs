//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PoexError, Result};

/// Main configuration for the poex pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoexConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output table configuration.
    pub output: OutputConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Below this many characters of text a PDF is reported as probably scanned.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
        }
    }
}

/// Purchase-order extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Keyword an article description must contain (case-insensitive).
    pub brand_keyword: String,

    /// Buyer's registered name, stripped from the ship-to block.
    pub buyer_name: String,

    /// Retail-brand tokens marking the store name in the ship-to block.
    pub site_brand_tokens: Vec<String>,

    /// Characters after an article line searched for a wrapped weight.
    pub continuation_window: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            brand_keyword: "shareat".to_string(),
            buyer_name: "Avenue Supermarts Ltd".to_string(),
            site_brand_tokens: vec!["DMart".to_string(), "Dmart".to_string(), "DMART".to_string()],
            continuation_window: 120,
        }
    }
}

/// Output table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix of generated batch output file names.
    pub file_prefix: String,

    /// Prepend a source-file column to batch tables.
    pub include_source_column: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: "PO_Extracted".to_string(),
            include_source_column: true,
        }
    }
}

impl PoexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PoexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| PoexError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PoexConfig =
            serde_json::from_str(r#"{"extraction": {"brand_keyword": "acme"}}"#).unwrap();

        assert_eq!(config.extraction.brand_keyword, "acme");
        assert_eq!(config.extraction.continuation_window, 120);
        assert_eq!(config.output.file_prefix, "PO_Extracted");
        assert_eq!(config.pdf.min_text_length, 50);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PoexConfig::default();
        config.output.include_source_column = false;
        config.save(&path).unwrap();

        assert_eq!(PoexConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(PoexConfig::from_file(&path), Err(PoexError::Config(_))));
    }
}
