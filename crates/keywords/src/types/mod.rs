//! Core types for records and their keyword sets.
//!
//! - [`KeywordSet`] - the deduplicated keywords derived from one record
//! - [`Document`] - a JSON record with identity and change tracking

mod document;
mod keyword_set;

pub use document::Document;
pub use keyword_set::KeywordSet;
