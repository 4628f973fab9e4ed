//! LexGraph Core - Domain models, errors, and shared types
//!
//! This crate defines the core abstractions used throughout LexGraph:
//! - Mention kinds (citation, action, entity)
//! - Per-document extraction records
//! - Relation edges for adjacency tables
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ConfigError, ExtractionConfig, InputConfig, LoggingConfig, OutputConfig,
    OutputFiles, XCoordinates,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for LexGraph operations
#[derive(Error, Debug)]
pub enum LexError {
    #[error("Invalid pattern '{label}': {message}")]
    InvalidPattern { label: String, message: String },

    #[error("Duplicate pattern label '{label}' in {group} group")]
    DuplicateLabel { group: MentionKind, label: String },

    #[error("Document '{id}' rejected: {reason}")]
    Document { id: String, reason: String },

    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, LexError>;

// ============================================================================
// Mention Kinds
// ============================================================================

/// The three kinds of mentions pulled out of a legal text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionKind {
    /// Reference to another legal instrument by name and year
    Citation,
    /// Verb denoting an official act
    Action,
    /// Role, office, or organization
    Entity,
}

impl MentionKind {
    /// All kinds, in extraction order
    pub const ALL: [MentionKind; 3] = [Self::Citation, Self::Action, Self::Entity];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citation => "citation",
            Self::Action => "action",
            Self::Entity => "entity",
        }
    }
}

impl std::fmt::Display for MentionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MentionKind {
    type Err = LexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "citation" | "citations" => Ok(Self::Citation),
            "action" | "actions" => Ok(Self::Action),
            "entity" | "entities" => Ok(Self::Entity),
            other => Err(LexError::Config(ConfigError::InvalidValue {
                key: "mention kind".to_string(),
                value: other.to_string(),
            })),
        }
    }
}

// ============================================================================
// Document Records
// ============================================================================

/// Extraction result for a single document
///
/// All three collections are sorted lexicographically and keep duplicates.
/// A record is built once per document and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Document identifier, unique within a corpus run
    pub id: String,

    /// Normalized citations shorter than the configured limit
    pub citations: Vec<String>,

    /// Normalized actions
    pub actions: Vec<String>,

    /// Normalized entities
    pub entities: Vec<String>,
}

impl DocumentRecord {
    /// Create a record, sorting each collection
    pub fn new(
        id: impl Into<String>,
        mut citations: Vec<String>,
        mut actions: Vec<String>,
        mut entities: Vec<String>,
    ) -> Self {
        citations.sort();
        actions.sort();
        entities.sort();

        Self {
            id: id.into(),
            citations,
            actions,
            entities,
        }
    }

    /// Collection for a given mention kind
    pub fn mentions(&self, kind: MentionKind) -> &[String] {
        match kind {
            MentionKind::Citation => &self.citations,
            MentionKind::Action => &self.actions,
            MentionKind::Entity => &self.entities,
        }
    }

    /// True if nothing was extracted from the document
    pub fn is_empty(&self) -> bool {
        self.citations.is_empty() && self.actions.is_empty() && self.entities.is_empty()
    }
}

// ============================================================================
// Relation Edges
// ============================================================================

/// One row of a pairwise adjacency table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationEdge {
    pub left: String,
    pub right: String,
}

impl RelationEdge {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl std::fmt::Display for RelationEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}", self.left, self.right)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sorts_collections() {
        let record = DocumentRecord::new(
            "law.htm",
            vec!["חוק ב".to_string(), "חוק א".to_string()],
            vec!["קבע".to_string(), "אישר".to_string(), "קבע".to_string()],
            vec![],
        );

        assert_eq!(record.citations, vec!["חוק א", "חוק ב"]);
        // Duplicates are kept
        assert_eq!(record.actions, vec!["אישר", "קבע", "קבע"]);
        assert!(record.entities.is_empty());
        assert!(!record.is_empty());
    }

    #[test]
    fn test_record_mentions_by_kind() {
        let record = DocumentRecord::new(
            "L1",
            vec!["c".to_string()],
            vec!["a".to_string()],
            vec!["e".to_string()],
        );

        assert_eq!(record.mentions(MentionKind::Citation), ["c"]);
        assert_eq!(record.mentions(MentionKind::Action), ["a"]);
        assert_eq!(record.mentions(MentionKind::Entity), ["e"]);
    }

    #[test]
    fn test_mention_kind_parse() {
        assert_eq!(
            "entities".parse::<MentionKind>().unwrap(),
            MentionKind::Entity
        );
        assert_eq!(
            "Citation".parse::<MentionKind>().unwrap(),
            MentionKind::Citation
        );
        assert!("verbs".parse::<MentionKind>().is_err());
    }

    #[test]
    fn test_edge_display_is_tab_separated() {
        let edge = RelationEdge::new("קבלן", "L1");
        assert_eq!(edge.to_string(), "קבלן\tL1");
    }

    #[test]
    fn test_error_display() {
        let err = LexError::InvalidPattern {
            label: "laws".to_string(),
            message: "unclosed group".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid pattern 'laws': unclosed group");
    }

    #[test]
    fn test_config_error_converts() {
        fn load() -> Result<()> {
            let checked: std::result::Result<(), ConfigError> =
                Err(ConfigError::MissingRequired("input.extensions".to_string()));
            checked?;
            Ok(())
        }

        let err = load().unwrap_err();
        assert!(matches!(err, LexError::Config(ConfigError::MissingRequired(_))));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required configuration: input.extensions"
        );
    }
}
