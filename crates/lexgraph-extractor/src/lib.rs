//! LexGraph Extractor - Reference extraction pipeline
//!
//! Pulls citations, actions, and entities out of legal texts with
//! pattern catalogs, and turns the per-document results into adjacency
//! tables for graph tools.

pub mod catalog;
pub mod corpus;
pub mod document;
pub mod export;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod relation;

pub use catalog::{PatternCatalog, PatternGroup};
pub use corpus::CorpusIndex;
pub use document::{DocumentProcessor, RawCounts};
pub use export::OutputWriter;
pub use metrics::{DocumentFailure, RunMetrics};
pub use normalize::Normalizer;
pub use pipeline::{Pipeline, PipelineOutput};
pub use relation::{DocumentRelations, RelationTables};

/// A substring of document text satisfying one pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch<'a> {
    /// Label of the pattern that produced the match
    pub label: &'a str,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Trait for mention extractors
pub trait MentionExtractor: Send + Sync {
    fn extract<'a>(&'a self, text: &'a str) -> Vec<RawMatch<'a>>;
}

/// Apply every pattern of `group` to `text`
pub fn extract<'a>(text: &'a str, group: &'a dyn MentionExtractor) -> Vec<RawMatch<'a>> {
    group.extract(text)
}
