//! Helios Keywords
//!
//! This crate derives a searchable set of normalized keywords from the text
//! fields of JSON records and answers boolean keyword queries against those
//! sets.
//!
//! # Features
//!
//! - **Three keyword modes**: plain tokens, Porter stems, or Metaphone codes
//! - **Change-driven maintenance**: keywords are recomputed only when a
//!   configured field changes, or on demand
//! - **Boolean search**: `all` (every term present) and `any` (some term
//!   present)
//! - **Bulk reindex**: bounded, partial-failure tolerant fan-out
//!
//! # Architecture
//!
//! - [`analysis`] - tokenizer, stemmer, phonetic encoder, keyword modes
//! - [`index`] - keyword set builder, per-record indexer, query translation
//! - [`config`] - index configuration and validation
//! - [`types`] - records and keyword sets
//! - [`core`] - the [`KeywordStore`] boundary
//! - [`backends`] - store implementations
//! - [`engine`] - the [`KeywordIndex`] facade
//! - [`error`] - error types
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use helios_keywords::{Document, IndexSpec, KeywordIndex, KeywordMode, MatchMode, MemoryStore};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let spec = IndexSpec::builder()
//!     .with_field("title")
//!     .mode(KeywordMode::Stem)
//!     .build()?;
//! let index = KeywordIndex::new("books", spec, Arc::new(MemoryStore::new()));
//!
//! let mut doc = Document::new(json!({"title": "Running with Scissors"}));
//! index.save(&mut doc).await?;
//! assert_eq!(doc.keywords("_keywords").as_slice(), &["run", "with", "scissor"]);
//!
//! let found = index.search("runs", MatchMode::Any).await?;
//! assert_eq!(found.len(), 1);
//! # Ok::<(), helios_keywords::KeywordError>(())
//! # }).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod backends;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod index;
pub mod types;

// Re-export commonly used types at crate root
pub use analysis::KeywordMode;
pub use config::{IndexConfig, IndexSpec, IndexSpecBuilder};
pub use engine::KeywordIndex;
pub use error::{ConfigError, KeywordError, KeywordResult, StorageError, StorageResult};
pub use index::{
    Derived, IndexState, KeywordQuery, MatchMode, Refresh, ReindexFailure, ReindexRequest,
    ReindexSummary,
};
pub use types::{Document, KeywordSet};

// Re-export the store boundary and backends
pub use backends::MemoryStore;
pub use crate::core::KeywordStore;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
