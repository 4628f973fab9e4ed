//! LexGraph Configuration Management
//!
//! Handles configuration from environment variables and TOML config files,
//! with defaults matching the `Laws/HTML` corpus layout.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where documents are read from
    pub input: InputConfig,

    /// Where tables and reports are written
    pub output: OutputConfig,

    /// Extraction tuning
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Input / output
        if let Some(dir) = lookup("LEXGRAPH_INPUT_DIR") {
            self.input.dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("LEXGRAPH_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        // Extraction
        if let Some(len) = lookup("LEXGRAPH_MAX_CITATION_LENGTH") {
            self.extraction.max_citation_length =
                len.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "LEXGRAPH_MAX_CITATION_LENGTH".to_string(),
                    value: len,
                })?;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.json_format = format.eq_ignore_ascii_case("json");
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject settings that would make extraction meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extraction.max_citation_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "extraction.max_citation_length".to_string(),
                value: "0".to_string(),
            });
        }
        if self.input.extensions.is_empty() {
            return Err(ConfigError::MissingRequired(
                "input.extensions".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input document configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Directory scanned for documents (non-recursive)
    pub dir: PathBuf,

    /// File name suffixes accepted as documents
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Laws/HTML"),
            extensions: vec!["htm".to_string()],
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving all tables and reports
    pub dir: PathBuf,

    /// Table file names
    pub files: OutputFiles,

    /// Fixed X coordinate per node type for bipartite layouts
    pub x_coordinates: XCoordinates,

    /// Write one text report per document
    pub write_reports: bool,

    /// Remove table files from a previous run before writing
    pub clear_previous: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Laws/HTML/out"),
            files: OutputFiles::default(),
            x_coordinates: XCoordinates::default(),
            write_reports: true,
            clear_previous: true,
        }
    }
}

/// Output table file names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputFiles {
    pub entities_connected_by_actions: String,
    pub entities_laws_bipartite: String,
    pub entities_citations_bipartite: String,
    pub laws_citations_bipartite: String,
    pub entities: String,
    pub citations: String,
    pub laws: String,
    pub actions: String,
}

impl OutputFiles {
    /// Every table file name, used when clearing a previous run
    pub fn all(&self) -> [&str; 8] {
        [
            self.entities_connected_by_actions.as_str(),
            self.entities_laws_bipartite.as_str(),
            self.entities_citations_bipartite.as_str(),
            self.laws_citations_bipartite.as_str(),
            self.entities.as_str(),
            self.citations.as_str(),
            self.laws.as_str(),
            self.actions.as_str(),
        ]
    }
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            entities_connected_by_actions: "entities_connected_by_actions.csv".to_string(),
            entities_laws_bipartite: "entities_laws_bipartite.csv".to_string(),
            entities_citations_bipartite: "entities_citations_bipartite.csv".to_string(),
            laws_citations_bipartite: "laws_citations_bipartite.csv".to_string(),
            entities: "entities.csv".to_string(),
            citations: "citations.csv".to_string(),
            laws: "laws.csv".to_string(),
            actions: "actions.csv".to_string(),
        }
    }
}

/// X axis coordinate per node type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct XCoordinates {
    pub actions: u32,
    pub entities: u32,
    pub laws: u32,
    pub citations: u32,
}

impl Default for XCoordinates {
    fn default() -> Self {
        Self {
            actions: 10,
            entities: 20,
            laws: 30,
            citations: 40,
        }
    }
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Citations at or above this many characters are dropped
    pub max_citation_length: usize,

    /// Incidental characters replaced with a plain space in text and mentions
    pub ignored_chars: Vec<char>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_citation_length: 200,
            // EM SPACE, GREEK SMALL LETTER MU, LATIN SMALL LETTER U WITH DIAERESIS
            ignored_chars: vec!['\u{2003}', '\u{03bc}', '\u{00fc}'],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.extraction.max_citation_length, 200);
        assert_eq!(config.output.x_coordinates.actions, 10);
        assert_eq!(config.output.x_coordinates.citations, 40);
        assert_eq!(config.output.files.laws, "laws.csv");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .apply_overrides(lookup_from(&[
                ("LEXGRAPH_INPUT_DIR", "/data/laws"),
                ("LEXGRAPH_MAX_CITATION_LENGTH", "120"),
                ("LOG_FORMAT", "JSON"),
            ]))
            .unwrap();

        assert_eq!(config.input.dir, PathBuf::from("/data/laws"));
        assert_eq!(config.extraction.max_citation_length, 120);
        assert!(config.logging.json_format);
        // Untouched values keep their defaults
        assert_eq!(config.output.dir, PathBuf::from("Laws/HTML/out"));
    }

    #[test]
    fn test_invalid_env_value() {
        let result = AppConfig::default()
            .apply_overrides(lookup_from(&[("LEXGRAPH_MAX_CITATION_LENGTH", "long")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = AppConfig::default()
            .apply_overrides(lookup_from(&[("LEXGRAPH_MAX_CITATION_LENGTH", "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[output]\ndir = \"out\"\nwrite_reports = false\n\n[output.x_coordinates]\nlaws = 99\n"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert!(!config.output.write_reports);
        assert_eq!(config.output.x_coordinates.laws, 99);
        assert_eq!(config.output.x_coordinates.entities, 20);
        assert_eq!(config.extraction, ExtractionConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file("/nonexistent/lexgraph.toml");
        assert!(matches!(result, Err(ConfigError::FileReadError { .. })));
    }
}
