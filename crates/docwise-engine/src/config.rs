//! Engine configuration loaded from an optional TOML file.

use std::path::Path;

use docwise_corpus::{ChunkerConfig, RetrievalConfig};
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub chunker: ChunkerConfig,
    pub retrieval: RetrievalConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the loaded values fail validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error when any field is outside its usable range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunker.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "chunker.chunk_size must be positive".into(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::Invalid(
                "retrieval.top_k must be positive".into(),
            ));
        }
        if !self.retrieval.floor.is_finite() || self.retrieval.floor < 0.0 {
            return Err(ConfigError::Invalid(
                "retrieval.floor must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.chunker.chunk_size, 400);
        assert_eq!(config.chunker.overlap_sentences, 2);
        assert_eq!(config.retrieval.top_k, 8);
        assert!((config.retrieval.floor - 0.0).abs() < 1e-9);
    }

    #[test]
    fn parse_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docwise.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r"
[chunker]
chunk_size = 300
overlap_sentences = 1

[retrieval]
top_k = 4
"
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.chunker.chunk_size, 300);
        assert_eq!(config.chunker.overlap_sentences, 1);
        assert_eq!(config.retrieval.top_k, 4);
        // Unset sections keep their defaults.
        assert!((config.retrieval.floor - 0.0).abs() < 1e-9);
    }

    #[test]
    fn zero_top_k_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docwise.toml");
        std::fs::write(&path, "[retrieval]\ntop_k = 0\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docwise.toml");
        std::fs::write(&path, "chunker = not-a-table").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
