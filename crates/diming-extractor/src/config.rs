//! Configuration for the Extractor

use crate::error::ExtractorError;
use diming_llm::RuntimeConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default model passed to the runtime
pub const DEFAULT_MODEL: &str = "qwen2.5:7b";

/// Text chunking strategy for long documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    /// Split on line breaks, then pack whole paragraphs
    #[default]
    ByParagraph,
    /// Split on chapter or section headings
    BySection,
    /// Split after sentence-ending punctuation
    BySentence,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Model identifier used when the caller does not name one
    #[serde(default = "default_model")]
    pub model: String,

    /// Chunking strategy for `extract_chunked`
    #[serde(default)]
    pub chunk_strategy: ChunkStrategy,

    /// Maximum chunk size (characters)
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// How the model runtime is launched
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_chunk_size() -> usize {
    4_000
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be greater than 0".to_string());
        }
        self.runtime.validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExtractorError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ExtractorError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = Self::from_toml(&contents).map_err(ExtractorError::Config)?;
        config.validate().map_err(ExtractorError::Config)?;
        Ok(config)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            chunk_strategy: ChunkStrategy::default(),
            max_chunk_size: default_max_chunk_size(),
            runtime: RuntimeConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "qwen2.5:7b");
        assert_eq!(config.runtime.program, "ollama");
    }

    #[test]
    fn test_invalid_max_chunk_size() {
        let mut config = ExtractorConfig::default();
        config.max_chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_empty_model() {
        let mut config = ExtractorConfig::default();
        config.model = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ExtractorConfig::default();
        config.chunk_strategy = ChunkStrategy::BySentence;

        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml(
            r#"
            model = "llama3"
            chunk_strategy = "by_section"

            [runtime]
            program = "/opt/ollama/bin/ollama"
            "#,
        )
        .unwrap();

        assert_eq!(config.model, "llama3");
        assert_eq!(config.chunk_strategy, ChunkStrategy::BySection);
        assert_eq!(config.runtime.program, "/opt/ollama/bin/ollama");
        assert_eq!(config.runtime.args, vec!["run".to_string()]);
        assert_eq!(config.max_chunk_size, 4_000);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"qwen2.5:14b\"").unwrap();

        let config = ExtractorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model, "qwen2.5:14b");
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_chunk_size = 0").unwrap();

        let result = ExtractorConfig::from_file(file.path());
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let result = ExtractorConfig::from_file("/nonexistent/diming.toml");
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }
}
