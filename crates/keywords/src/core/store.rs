//! The keyword store boundary.
//!
//! The engine never touches persistence directly. Everything it needs from a
//! database goes through [`KeywordStore`]: persisting records, replacing a
//! record's keyword slot in one write, and finding records whose keyword
//! slot satisfies a [`KeywordQuery`].

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::index::KeywordQuery;
use crate::types::{Document, KeywordSet};

/// Storage operations required by a keyword index.
///
/// Records are grouped into named collections. Implementations must make
/// [`replace_keywords`](KeywordStore::replace_keywords) a single indivisible
/// write so concurrent readers never see a partially updated set.
///
/// # Example
///
/// ```ignore
/// use helios_keywords::core::KeywordStore;
/// use helios_keywords::index::{KeywordQuery, MatchMode};
///
/// async fn find_smiths<S: KeywordStore>(store: &S) -> StorageResult<usize> {
///     let query = KeywordQuery::from_terms(["smith"], MatchMode::All);
///     let found = store.find_by_keywords("people", "_keywords", &query).await?;
///     Ok(found.len())
/// }
/// ```
#[async_trait]
pub trait KeywordStore: Send + Sync {
    /// Returns a human-readable name for this store.
    fn backend_name(&self) -> &'static str;

    /// Inserts a record, or replaces the stored record with the same ID.
    async fn insert_or_replace(&self, collection: &str, document: &Document)
    -> StorageResult<()>;

    /// Reads a record by ID.
    async fn read(&self, collection: &str, id: &str) -> StorageResult<Option<Document>>;

    /// Replaces the keyword slot of a stored record in a single write.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - if no record with `id` exists
    async fn replace_keywords(
        &self,
        collection: &str,
        id: &str,
        slot: &str,
        keywords: &KeywordSet,
    ) -> StorageResult<()>;

    /// Returns records whose keyword slot satisfies `query`.
    async fn find_by_keywords(
        &self,
        collection: &str,
        slot: &str,
        query: &KeywordQuery,
    ) -> StorageResult<Vec<Document>>;

    /// Loads every record in a collection.
    async fn load_all(&self, collection: &str) -> StorageResult<Vec<Document>>;
}
