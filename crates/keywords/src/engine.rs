//! The keyword index facade.
//!
//! [`KeywordIndex`] ties an [`IndexSpec`] to a collection in a
//! [`KeywordStore`] and exposes the operations callers use: manual
//! recomputation, save with the pre-persist hook, search, and bulk reindex.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::IndexSpec;
use crate::core::KeywordStore;
use crate::error::{KeywordError, KeywordResult, StorageError};
use crate::index::{
    IndexState, KeywordIndexer, KeywordQuery, MatchMode, ReindexRequest, ReindexSummary,
};
use crate::types::{Document, KeywordSet};

/// A keyword index over one collection of a store.
///
/// Cloning is cheap and shares the store and spec.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use helios_keywords::analysis::KeywordMode;
/// use helios_keywords::backends::MemoryStore;
/// use helios_keywords::config::IndexSpec;
/// use helios_keywords::engine::KeywordIndex;
/// use helios_keywords::index::MatchMode;
/// use helios_keywords::types::Document;
/// use serde_json::json;
///
/// # tokio_test::block_on(async {
/// let spec = IndexSpec::builder()
///     .with_fields(["name.first", "name.last"])
///     .mode(KeywordMode::Plain)
///     .build()?;
/// let index = KeywordIndex::new("people", spec, Arc::new(MemoryStore::new()));
///
/// let mut doc = Document::new(json!({"name": {"first": "Aaron", "last": "Heckmann"}}));
/// index.save(&mut doc).await?;
///
/// let found = index.search("heckmann", MatchMode::All).await?;
/// assert_eq!(found.len(), 1);
/// # Ok::<(), helios_keywords::error::KeywordError>(())
/// # }).unwrap();
/// ```
pub struct KeywordIndex<S> {
    collection: Arc<str>,
    indexer: KeywordIndexer,
    store: Arc<S>,
}

impl<S> Clone for KeywordIndex<S> {
    fn clone(&self) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
            indexer: self.indexer.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> std::fmt::Debug for KeywordIndex<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordIndex")
            .field("collection", &self.collection)
            .field("spec", self.indexer.spec())
            .finish()
    }
}

impl<S: KeywordStore + 'static> KeywordIndex<S> {
    /// Creates an index over `collection` in `store`.
    pub fn new(collection: impl Into<String>, spec: IndexSpec, store: Arc<S>) -> Self {
        Self {
            collection: Arc::from(collection.into()),
            indexer: KeywordIndexer::new(Arc::new(spec)),
            store,
        }
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the index spec.
    pub fn spec(&self) -> &IndexSpec {
        self.indexer.spec()
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the index state of `document`.
    pub fn state(&self, document: &Document) -> IndexState {
        self.indexer.state(document)
    }

    /// Recomputes the keyword set of `document` and marks it clean.
    ///
    /// Only the in-memory record changes. Call [`save`](Self::save) to
    /// persist it.
    pub fn update_index(&self, document: &mut Document) -> KeywordSet {
        self.indexer.update_index(document)
    }

    /// Persists `document`, recomputing its keywords first if it is new or
    /// dirty.
    ///
    /// Returns true if the keywords were recomputed.
    pub async fn save(&self, document: &mut Document) -> KeywordResult<bool> {
        let refreshed = self.indexer.refresh(document).recomputed();

        self.store
            .insert_or_replace(&self.collection, document)
            .await?;
        document.mark_saved();

        debug!(
            collection = %self.collection,
            id = %document.id(),
            refreshed,
            "Saved record"
        );

        Ok(refreshed)
    }

    /// Finds records matching `query` under `match_mode`.
    pub async fn search(&self, query: &str, match_mode: MatchMode) -> KeywordResult<Vec<Document>> {
        let query = KeywordQuery::new(self.spec(), query, match_mode);

        debug!(
            collection = %self.collection,
            terms = ?query.terms(),
            match_mode = %match_mode,
            "Searching keywords"
        );

        let found = self
            .store
            .find_by_keywords(&self.collection, self.spec().keyword_slot(), &query)
            .await?;
        Ok(found)
    }

    /// Like [`search`](Self::search), with the match mode given by name.
    ///
    /// `None` means [`MatchMode::All`]. An unrecognized name is a
    /// configuration error.
    pub async fn search_str(
        &self,
        query: &str,
        match_mode: Option<&str>,
    ) -> KeywordResult<Vec<Document>> {
        let match_mode = MatchMode::parse_or_default(match_mode)?;
        self.search(query, match_mode).await
    }

    /// Recomputes and persists the keywords of every record in the
    /// collection.
    ///
    /// Records are processed independently with at most
    /// `request.concurrency` in flight. A failure on one record is logged and
    /// recorded in the summary; it never aborts the others. Only a failure to
    /// load the collection is returned as an error.
    pub async fn reindex_all(&self, request: ReindexRequest) -> KeywordResult<ReindexSummary> {
        let documents = self.store.load_all(&self.collection).await?;
        let concurrency = request.effective_concurrency();

        info!(
            collection = %self.collection,
            records = documents.len(),
            concurrency,
            "Starting reindex"
        );

        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut tasks: JoinSet<(String, KeywordResult<()>)> = JoinSet::new();

        for document in documents {
            let index = self.clone();
            let semaphore = Arc::clone(&semaphore);

            tasks.spawn(async move {
                let id = document.id().to_string();
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => index.reindex_one(document).await,
                    Err(e) => Err(KeywordError::Storage(StorageError::Unavailable {
                        backend_name: index.store.backend_name().to_string(),
                        message: e.to_string(),
                    })),
                };
                (id, result)
            });
        }

        let mut summary = ReindexSummary::start();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(()))) => summary.record_success(),
                Ok((id, Err(e))) => {
                    warn!(
                        collection = %self.collection,
                        id = %id,
                        error = %e,
                        "Failed to reindex record"
                    );
                    summary.record_failure(Some(id), e.to_string());
                }
                Err(e) => {
                    warn!(collection = %self.collection, error = %e, "Reindex task failed");
                    summary.record_failure(None, e.to_string());
                }
            }
        }

        let summary = summary.finish();
        info!(
            collection = %self.collection,
            updated = summary.updated,
            failed = summary.failed,
            "Finished reindex"
        );

        Ok(summary)
    }

    async fn reindex_one(&self, mut document: Document) -> KeywordResult<()> {
        let keywords = self.indexer.update_index(&mut document);
        self.store
            .replace_keywords(
                &self.collection,
                document.id(),
                self.spec().keyword_slot(),
                &keywords,
            )
            .await?;
        Ok(())
    }
}
