//! Corpus pipeline
//!
//! Feeds documents one at a time through a `DocumentProcessor`, folding
//! each record into the corpus index and keeping run metrics. A document
//! that cannot be read is recorded as a failure and the run continues.

use crate::corpus::CorpusIndex;
use crate::document::DocumentProcessor;
use crate::metrics::RunMetrics;
use crate::relation::{DocumentRelations, RelationTables};
use lexgraph_core::{DocumentRecord, LexError};

/// Single-pass extraction over a corpus
pub struct Pipeline {
    processor: DocumentProcessor,
    index: CorpusIndex,
    records: Vec<DocumentRecord>,
    relations: RelationTables,
    metrics: RunMetrics,
}

impl Pipeline {
    pub fn new(processor: DocumentProcessor) -> Self {
        Self {
            processor,
            index: CorpusIndex::new(),
            records: Vec::new(),
            relations: RelationTables::new(),
            metrics: RunMetrics::new(),
        }
    }

    /// Extract one document and fold it into the corpus
    pub fn process_document(&mut self, document_id: &str, text: &str) -> &DocumentRecord {
        let (record, counts) = self.processor.process_with_counts(document_id, text);

        tracing::info!(
            "File: {}, Number of citations {}, Number of actions {}, Number of entities {}",
            document_id,
            counts.citations,
            counts.actions,
            counts.entities
        );

        self.metrics.record_success(&counts);
        self.index.fold_in(&record);
        self.relations.append(DocumentRelations::build(&record));
        self.records.push(record);

        &self.records[self.records.len() - 1]
    }

    /// Note a document that was skipped
    pub fn record_failure(&mut self, document_id: &str, reason: impl std::fmt::Display) {
        let reason = reason.to_string();
        let error = LexError::Document {
            id: document_id.to_string(),
            reason: reason.clone(),
        };
        tracing::warn!("{}", error);
        self.metrics.record_failure(document_id, reason);
    }

    pub fn processor(&self) -> &DocumentProcessor {
        &self.processor
    }

    /// Records in processing order
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn index(&self) -> &CorpusIndex {
        &self.index
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Edge tables for every processed document, in processing order
    pub fn relations(&self) -> &RelationTables {
        &self.relations
    }

    /// Stop the clock and hand back the run's results
    pub fn finish(mut self) -> PipelineOutput {
        self.metrics.finish();
        tracing::info!(
            "Total cites: {}, total actions: {}, total entities: {}",
            self.metrics.total_citations,
            self.metrics.total_actions,
            self.metrics.total_entities
        );

        PipelineOutput {
            relations: self.relations,
            index: self.index,
            records: self.records,
            metrics: self.metrics,
        }
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<DocumentRecord>,
    pub index: CorpusIndex,
    pub relations: RelationTables,
    pub metrics: RunMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternCatalog;

    fn pipeline() -> Pipeline {
        Pipeline::new(DocumentProcessor::new(PatternCatalog::builtin().unwrap()))
    }

    #[test]
    fn test_process_document_folds_into_index() {
        let mut pipeline = pipeline();
        let record = pipeline.process_document("L1.htm", "הקבלן קבע. המעסיק אישר ");
        assert_eq!(record.id, "L1.htm");

        pipeline.process_document("L2.htm", "הקבלן התיר ");

        assert_eq!(pipeline.records().len(), 2);
        assert_eq!(pipeline.index().documents, vec!["L1.htm", "L2.htm"]);
        assert!(pipeline.index().all_actions.contains("התיר"));
        assert_eq!(pipeline.metrics().documents_succeeded, 2);
    }

    #[test]
    fn test_failures_do_not_stop_the_run() {
        let mut pipeline = pipeline();
        pipeline.record_failure("broken.htm", "No <body> element found");
        pipeline.process_document("L1.htm", "הקבלן קבע ");

        let output = pipeline.finish();
        assert_eq!(output.metrics.documents_failed(), 1);
        assert_eq!(output.metrics.documents_succeeded, 1);
        assert_eq!(output.index.documents, vec!["L1.htm"]);
        assert!(output.metrics.finished_at.is_some());
    }

    #[test]
    fn test_finish_builds_relations_in_order() {
        let mut pipeline = pipeline();
        pipeline.process_document("L1.htm", "הקבלן והמעסיק קבע ");
        pipeline.process_document("L2.htm", "הקבלן והמעסיק קבע ");

        let expected = RelationTables::from_records(pipeline.records());
        let output = pipeline.finish();

        assert_eq!(output.relations, expected);
        // Same pair from two documents is kept twice in each direction
        assert_eq!(output.relations.entity_entity.len(), 4);
        assert_eq!(output.relations.entity_document[0].right, "L1.htm");
    }
}
