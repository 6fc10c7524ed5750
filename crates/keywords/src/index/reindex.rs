//! Bulk reindex types.
//!
//! A reindex recomputes and persists the keyword set of every record in a
//! collection. Records are processed independently: a failure on one is
//! recorded in the [`ReindexSummary`] and never stops the others.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to reindex a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReindexRequest {
    /// Maximum number of records processed at once. Values below 1 are
    /// treated as 1.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    8
}

impl Default for ReindexRequest {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl ReindexRequest {
    /// Creates a request with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the concurrency limit.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Returns the effective concurrency limit.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

/// A record that could not be reindexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexFailure {
    /// Record ID. `None` if the task processing the record was lost.
    pub id: Option<String>,
    /// Error message.
    pub error: String,
}

/// Outcome of a reindex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReindexSummary {
    /// Number of records whose keywords were persisted.
    pub updated: u64,

    /// Number of records that failed.
    pub failed: u64,

    /// Per-record failures.
    pub failures: Vec<ReindexFailure>,

    /// When the reindex started.
    pub started_at: DateTime<Utc>,

    /// When the reindex finished.
    pub completed_at: Option<DateTime<Utc>>,
}

impl ReindexSummary {
    /// Starts an empty summary.
    pub fn start() -> Self {
        Self {
            updated: 0,
            failed: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub(crate) fn record_success(&mut self) {
        self.updated += 1;
    }

    pub(crate) fn record_failure(&mut self, id: Option<String>, error: impl Into<String>) {
        self.failed += 1;
        self.failures.push(ReindexFailure {
            id,
            error: error.into(),
        });
    }

    pub(crate) fn finish(mut self) -> Self {
        self.completed_at = Some(Utc::now());
        self
    }

    /// Returns `(updated, failed)`.
    pub fn counts(&self) -> (u64, u64) {
        (self.updated, self.failed)
    }

    /// Returns the total number of records processed.
    pub fn total(&self) -> u64 {
        self.updated + self.failed
    }

    /// Returns true if any record failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = ReindexRequest::default();
        assert_eq!(request.concurrency, 8);
        assert_eq!(request.with_concurrency(0).effective_concurrency(), 1);

        let parsed: ReindexRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.concurrency, 8);
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = ReindexSummary::start();
        summary.record_success();
        summary.record_success();
        summary.record_failure(Some("r3".to_string()), "disk full");

        let summary = summary.finish();
        assert_eq!(summary.counts(), (2, 1));
        assert_eq!(summary.total(), 3);
        assert!(summary.has_failures());
        assert!(summary.completed_at.is_some());
        assert_eq!(summary.failures[0].id.as_deref(), Some("r3"));
    }
}
