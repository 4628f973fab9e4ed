//! Relation building
//!
//! Derives the four adjacency tables from a `DocumentRecord`:
//! - entity ↔ entity, weighted by the number of distinct actions
//! - entity ↔ document
//! - entity ↔ citation
//! - document ↔ citation
//!
//! Within a document every table is built from the distinct values of each
//! collection. Across documents tables are appended, never deduplicated: an
//! edge produced by two documents appears twice.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use lexgraph_core::{DocumentRecord, RelationEdge};

fn distinct(values: &[String]) -> BTreeSet<&str> {
    values.iter().map(String::as_str).collect()
}

// ============================================================================
// Edge Builders
// ============================================================================

/// Ordered pairs of distinct entities, each repeated once per distinct action
///
/// Both directions are produced and self-pairs are excluded. A document
/// without actions yields no edges even if several entities co-occur.
pub fn entity_entity_edges(record: &DocumentRecord) -> Vec<RelationEdge> {
    let entities = distinct(&record.entities);
    let weight = distinct(&record.actions).len();

    let mut edges = Vec::new();
    for left in &entities {
        for right in &entities {
            if left == right {
                continue;
            }
            for _ in 0..weight {
                edges.push(RelationEdge::new(*left, *right));
            }
        }
    }
    edges
}

/// `(entity, document id)` once per distinct entity
pub fn entity_document_edges(record: &DocumentRecord) -> Vec<RelationEdge> {
    distinct(&record.entities)
        .into_iter()
        .map(|entity| RelationEdge::new(entity, record.id.as_str()))
        .collect()
}

/// `(entity, citation)` for every pair of distinct entity and distinct citation
pub fn entity_citation_edges(record: &DocumentRecord) -> Vec<RelationEdge> {
    let citations = distinct(&record.citations);

    distinct(&record.entities)
        .into_iter()
        .flat_map(|entity| {
            citations
                .iter()
                .map(move |citation| RelationEdge::new(entity, *citation))
        })
        .collect()
}

/// `(document id, citation)` once per distinct citation
pub fn document_citation_edges(record: &DocumentRecord) -> Vec<RelationEdge> {
    distinct(&record.citations)
        .into_iter()
        .map(|citation| RelationEdge::new(record.id.as_str(), citation))
        .collect()
}

// ============================================================================
// Per-document and Corpus Tables
// ============================================================================

/// The four edge tables derived from one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRelations {
    pub entity_entity: Vec<RelationEdge>,
    pub entity_document: Vec<RelationEdge>,
    pub entity_citation: Vec<RelationEdge>,
    pub document_citation: Vec<RelationEdge>,
}

impl DocumentRelations {
    pub fn build(record: &DocumentRecord) -> Self {
        Self {
            entity_entity: entity_entity_edges(record),
            entity_document: entity_document_edges(record),
            entity_citation: entity_citation_edges(record),
            document_citation: document_citation_edges(record),
        }
    }

    /// Total number of edges over all four tables
    pub fn len(&self) -> usize {
        self.entity_entity.len()
            + self.entity_document.len()
            + self.entity_citation.len()
            + self.document_citation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Edge tables accumulated over a corpus, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTables {
    pub entity_entity: Vec<RelationEdge>,
    pub entity_document: Vec<RelationEdge>,
    pub entity_citation: Vec<RelationEdge>,
    pub document_citation: Vec<RelationEdge>,
}

impl RelationTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the tables for a sequence of records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DocumentRecord>) -> Self {
        let mut tables = Self::new();
        for record in records {
            tables.append(DocumentRelations::build(record));
        }
        tables
    }

    /// Append one document's edges; duplicates across documents are kept
    pub fn append(&mut self, relations: DocumentRelations) {
        self.entity_entity.extend(relations.entity_entity);
        self.entity_document.extend(relations.entity_document);
        self.entity_citation.extend(relations.entity_citation);
        self.document_citation.extend(relations.document_citation);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn record(id: &str, citations: &[&str], actions: &[&str], entities: &[&str]) -> DocumentRecord {
        DocumentRecord::new(id, owned(citations), owned(actions), owned(entities))
    }

    fn count(edges: &[RelationEdge], left: &str, right: &str) -> usize {
        edges
            .iter()
            .filter(|e| e.left == left && e.right == right)
            .count()
    }

    #[test]
    fn test_entity_entity_weighted_by_actions() {
        let r = record("L1", &[], &["a1", "a2"], &["A", "B"]);
        let edges = entity_entity_edges(&r);

        assert_eq!(count(&edges, "A", "B"), 2);
        assert_eq!(count(&edges, "B", "A"), 2);
        assert_eq!(count(&edges, "A", "A"), 0);
        assert_eq!(count(&edges, "B", "B"), 0);
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn test_entity_entity_uses_distinct_actions_and_entities() {
        let r = record("L1", &[], &["a1", "a1", "a1"], &["A", "A", "B"]);
        let edges = entity_entity_edges(&r);

        assert_eq!(count(&edges, "A", "B"), 1);
        assert_eq!(count(&edges, "B", "A"), 1);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_entity_entity_without_actions() {
        let r = record("L1", &["c"], &[], &["A", "B"]);
        assert!(entity_entity_edges(&r).is_empty());
    }

    #[test]
    fn test_single_entity_has_no_pairs() {
        let r = record("L1", &[], &["a1"], &["A", "A"]);
        assert!(entity_entity_edges(&r).is_empty());
    }

    #[test]
    fn test_entity_document_edges() {
        let r = record("L1", &[], &[], &["B", "A", "A"]);
        let edges: BTreeSet<_> = entity_document_edges(&r).into_iter().collect();

        let expected: BTreeSet<_> = [RelationEdge::new("A", "L1"), RelationEdge::new("B", "L1")]
            .into_iter()
            .collect();
        assert_eq!(edges, expected);
        assert_eq!(entity_document_edges(&r).len(), 2);
    }

    #[test]
    fn test_entity_citation_cartesian_product() {
        let r = record("L1", &["c1", "c2", "c2"], &["a1", "a2", "a3"], &["A", "B", "C"]);
        let edges = entity_citation_edges(&r);

        // Not weighted by actions
        assert_eq!(edges.len(), 6);
        for entity in ["A", "B", "C"] {
            for citation in ["c1", "c2"] {
                assert_eq!(count(&edges, entity, citation), 1);
            }
        }
    }

    #[test]
    fn test_document_citation_edges() {
        let r = record("L1", &["c2", "c1", "c2"], &[], &[]);
        let edges = document_citation_edges(&r);

        assert_eq!(
            edges,
            vec![RelationEdge::new("L1", "c1"), RelationEdge::new("L1", "c2")]
        );
    }

    #[test]
    fn test_tables_keep_cross_document_duplicates() {
        let first = record("L1", &["c1"], &["a1"], &["A", "B"]);
        let second = record("L2", &["c1"], &["a1"], &["A", "B"]);

        let tables = RelationTables::from_records([&first, &second]);

        assert_eq!(count(&tables.entity_entity, "A", "B"), 2);
        assert_eq!(count(&tables.entity_citation, "A", "c1"), 2);
        assert_eq!(tables.entity_document.len(), 4);
        assert_eq!(
            tables.document_citation,
            vec![RelationEdge::new("L1", "c1"), RelationEdge::new("L2", "c1")]
        );
    }

    #[test]
    fn test_document_relations_len() {
        let r = record("L1", &["c1"], &["a1"], &["A", "B"]);
        let relations = DocumentRelations::build(&r);

        // 2 entity pairs + 2 entity-document + 2 entity-citation + 1 document-citation
        assert_eq!(relations.len(), 7);
        assert!(!relations.is_empty());
        assert!(DocumentRelations::build(&record("L2", &[], &[], &[])).is_empty());
    }
}
