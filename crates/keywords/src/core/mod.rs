//! Core storage abstraction.
//!
//! - [`KeywordStore`] - the async boundary between the engine and a database

pub mod store;

pub use store::KeywordStore;
