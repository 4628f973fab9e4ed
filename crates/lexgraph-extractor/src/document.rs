//! Per-document aggregation
//!
//! Runs the three pattern groups over one document's text and turns the
//! raw matches into a sorted `DocumentRecord`.

use serde::{Deserialize, Serialize};

use crate::catalog::PatternCatalog;
use crate::normalize::Normalizer;
use crate::{extract, RawMatch};
use lexgraph_core::{DocumentRecord, ExtractionConfig, MentionKind};

/// Number of raw matches per kind, before length filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCounts {
    pub citations: usize,
    pub actions: usize,
    pub entities: usize,
}

/// Builds `DocumentRecord`s from document text
pub struct DocumentProcessor {
    catalog: PatternCatalog,
    normalizer: Normalizer,
    max_citation_length: usize,
}

impl DocumentProcessor {
    /// Processor with the built-in catalog and default extraction settings
    pub fn new(catalog: PatternCatalog) -> Self {
        Self::with_config(catalog, &ExtractionConfig::default())
    }

    pub fn with_config(catalog: PatternCatalog, config: &ExtractionConfig) -> Self {
        Self {
            catalog,
            normalizer: Normalizer::from_config(config),
            max_citation_length: config.max_citation_length,
        }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn max_citation_length(&self) -> usize {
        self.max_citation_length
    }

    /// Extract, normalize, filter and sort all mentions of one document
    pub fn process(&self, document_id: &str, text: &str) -> DocumentRecord {
        self.process_with_counts(document_id, text).0
    }

    /// Like `process`, also returning the raw match counts for diagnostics
    pub fn process_with_counts(&self, document_id: &str, text: &str) -> (DocumentRecord, RawCounts) {
        let text = self.normalizer.scrub(text);

        let raw_citations = extract(&text, self.catalog.group(MentionKind::Citation));
        let raw_actions = extract(&text, self.catalog.group(MentionKind::Action));
        let raw_entities = extract(&text, self.catalog.group(MentionKind::Entity));

        let counts = RawCounts {
            citations: raw_citations.len(),
            actions: raw_actions.len(),
            entities: raw_entities.len(),
        };

        let citations = self
            .normalize_all(&raw_citations)
            .into_iter()
            .filter(|c| c.chars().count() < self.max_citation_length)
            .collect();
        let actions = self.normalize_all(&raw_actions);
        let entities = self.normalize_all(&raw_entities);

        let record = DocumentRecord::new(document_id, citations, actions, entities);

        tracing::debug!(
            document = document_id,
            citations = record.citations.len(),
            actions = record.actions.len(),
            entities = record.entities.len(),
            "Document processed"
        );

        (record, counts)
    }

    fn normalize_all(&self, matches: &[RawMatch<'_>]) -> Vec<String> {
        matches
            .iter()
            .map(|m| self.normalizer.normalize(m.text))
            .collect()
    }
}
