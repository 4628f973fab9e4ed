//! Run metrics
//!
//! Running totals for a corpus pass: how many raw matches were found, how
//! many documents were processed or rejected, and why.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::RawCounts;

/// A document that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub document_id: String,
    pub reason: String,
}

/// Diagnostics accumulated over one corpus run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Raw matches before normalization and filtering
    pub total_citations: usize,
    pub total_actions: usize,
    pub total_entities: usize,
    pub documents_succeeded: usize,
    pub failures: Vec<DocumentFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            total_citations: 0,
            total_actions: 0,
            total_entities: 0,
            documents_succeeded: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Count a successfully processed document
    pub fn record_success(&mut self, counts: &RawCounts) {
        self.total_citations += counts.citations;
        self.total_actions += counts.actions;
        self.total_entities += counts.entities;
        self.documents_succeeded += 1;
    }

    /// Count a rejected document
    pub fn record_failure(&mut self, document_id: impl Into<String>, reason: impl Into<String>) {
        self.failures.push(DocumentFailure {
            document_id: document_id.into(),
            reason: reason.into(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn documents_failed(&self) -> usize {
        self.failures.len()
    }

    pub fn documents_seen(&self) -> usize {
        self.documents_succeeded + self.failures.len()
    }

    /// True if every document seen was processed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Wall-clock duration, once finished
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// Print a summary report
    pub fn report(&self) -> String {
        let mut report = format!(
            "=== Extraction Run Summary ===\n\n\
             Documents: {} succeeded, {} failed\n\
             Total cites: {}, total actions: {}, total entities: {}\n",
            self.documents_succeeded,
            self.documents_failed(),
            self.total_citations,
            self.total_actions,
            self.total_entities,
        );

        if let Some(elapsed) = self.elapsed() {
            report.push_str(&format!("Elapsed: {} ms\n", elapsed.num_milliseconds()));
        }

        if !self.failures.is_empty() {
            report.push_str("\nFailed documents:\n");
            for failure in &self.failures {
                report.push_str(&format!("  {}: {}\n", failure.document_id, failure.reason));
            }
        }

        report
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
