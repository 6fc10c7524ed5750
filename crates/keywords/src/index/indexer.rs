//! Per-record index maintenance.
//!
//! Each record is either [`IndexState::Clean`], meaning its stored keyword
//! set reflects its current field values, or [`IndexState::Dirty`]. A record
//! becomes dirty when it is created or when a configured source field (or a
//! parent or child path of one) is written. Recomputation always rebuilds the
//! set from a fresh snapshot of the source values and swaps it in whole.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::IndexSpec;
use crate::types::{Document, KeywordSet};

use super::builder::KeywordSetBuilder;

/// Whether a record's keyword set is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexState {
    /// The keyword set reflects the current source values.
    Clean,
    /// A source field changed, or the record was never indexed.
    Dirty,
}

impl IndexState {
    /// Returns true if the record needs recomputation.
    pub fn is_dirty(&self) -> bool {
        matches!(self, IndexState::Dirty)
    }
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexState::Clean => write!(f, "clean"),
            IndexState::Dirty => write!(f, "dirty"),
        }
    }
}

/// Outcome of [`KeywordIndexer::refresh`]. Both variants carry the record's
/// current keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// The record was new or dirty and its keywords were rebuilt.
    Recomputed(KeywordSet),
    /// The record was clean; its stored keywords are unchanged.
    Unchanged(KeywordSet),
}

impl Refresh {
    /// Returns true if the keywords were rebuilt.
    pub fn recomputed(&self) -> bool {
        matches!(self, Refresh::Recomputed(_))
    }

    /// Returns the current keyword set.
    pub fn keywords(&self) -> &KeywordSet {
        match self {
            Refresh::Recomputed(keywords) | Refresh::Unchanged(keywords) => keywords,
        }
    }

    /// Consumes the outcome, returning the current keyword set.
    pub fn into_keywords(self) -> KeywordSet {
        match self {
            Refresh::Recomputed(keywords) | Refresh::Unchanged(keywords) => keywords,
        }
    }
}

/// Maintains the keyword slot of records for one index.
#[derive(Debug, Clone)]
pub struct KeywordIndexer {
    spec: Arc<IndexSpec>,
}

impl KeywordIndexer {
    /// Creates an indexer for `spec`.
    pub fn new(spec: Arc<IndexSpec>) -> Self {
        Self { spec }
    }

    /// Returns the index spec.
    pub fn spec(&self) -> &IndexSpec {
        &self.spec
    }

    /// Returns the index state of `document`.
    pub fn state(&self, document: &Document) -> IndexState {
        if !document.is_indexed()
            || self
                .spec
                .fields()
                .iter()
                .any(|field| document.is_pending(field))
        {
            IndexState::Dirty
        } else {
            IndexState::Clean
        }
    }

    /// Snapshots the source values of `document`: every configured field in
    /// order, then the derivation output.
    ///
    /// A missing field contributes a null.
    pub fn source_values(&self, document: &Document) -> Vec<Value> {
        let mut values = Vec::new();
        for field in self.spec.fields() {
            let found = document.values_at(field);
            if found.is_empty() {
                values.push(Value::Null);
            } else {
                values.extend(found.into_iter().cloned());
            }
        }
        self.spec.derive(document).extend_into(&mut values);
        values
    }

    /// Recomputes the keyword set of `document`, replaces its keyword slot,
    /// and marks it clean.
    pub fn update_index(&self, document: &mut Document) -> KeywordSet {
        let values = self.source_values(document);
        let keywords = KeywordSetBuilder::new(&self.spec).build(&values);

        document.replace_keywords(self.spec.keyword_slot(), &keywords);
        document.mark_indexed();

        debug!(
            id = %document.id(),
            slot = %self.spec.keyword_slot(),
            keywords = keywords.len(),
            "Recomputed keywords"
        );

        keywords
    }

    /// Returns the keyword set currently stored on `document`.
    pub fn current_keywords(&self, document: &Document) -> KeywordSet {
        document.keywords(self.spec.keyword_slot())
    }

    /// Recomputes the keyword set if the record is new or dirty.
    ///
    /// On a clean record this is a no-op that returns the stored set. Run
    /// this before persisting.
    pub fn refresh(&self, document: &mut Document) -> Refresh {
        if document.is_new() || self.state(document).is_dirty() {
            Refresh::Recomputed(self.update_index(document))
        } else {
            trace!(id = %document.id(), "Keywords are clean, skipping recomputation");
            Refresh::Unchanged(self.current_keywords(document))
        }
    }
}
