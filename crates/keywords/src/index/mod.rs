//! Keyword index construction, maintenance, and querying.
//!
//! - [`builder`] - turns source values into a [`KeywordSet`](crate::types::KeywordSet)
//! - [`indexer`] - clean/dirty tracking and recomputation per record
//! - [`query`] - query translation and match semantics
//! - [`reindex`] - bulk reindex request and summary types

pub mod builder;
pub mod indexer;
pub mod query;
pub mod reindex;

pub use builder::{Derived, KeywordSetBuilder};
pub use indexer::{IndexState, KeywordIndexer, Refresh};
pub use query::{KeywordQuery, MatchMode};
pub use reindex::{ReindexFailure, ReindexRequest, ReindexSummary};
