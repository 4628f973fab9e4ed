//! Corpus-wide index of unique mentions

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use lexgraph_core::{DocumentRecord, MentionKind};

/// Union of every folded record's citations, actions, and entities
///
/// Sets only grow. Folding is commutative and associative, so the final
/// sets do not depend on document order; `documents` keeps fold order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusIndex {
    pub all_actions: BTreeSet<String>,
    pub all_entities: BTreeSet<String>,
    pub all_citations: BTreeSet<String>,
    /// Identifiers of folded documents, in fold order
    pub documents: Vec<String>,
}

impl CorpusIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record's mentions to the index
    pub fn fold_in(&mut self, record: &DocumentRecord) {
        self.all_citations.extend(record.citations.iter().cloned());
        self.all_actions.extend(record.actions.iter().cloned());
        self.all_entities.extend(record.entities.iter().cloned());
        self.documents.push(record.id.clone());
    }

    /// Merge an index built independently, e.g. over another shard
    pub fn merge(&mut self, other: CorpusIndex) {
        self.all_citations.extend(other.all_citations);
        self.all_actions.extend(other.all_actions);
        self.all_entities.extend(other.all_entities);
        self.documents.extend(other.documents);
    }

    /// Unique mentions of one kind
    pub fn mentions(&self, kind: MentionKind) -> &BTreeSet<String> {
        match kind {
            MentionKind::Citation => &self.all_citations,
            MentionKind::Action => &self.all_actions,
            MentionKind::Entity => &self.all_entities,
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}
