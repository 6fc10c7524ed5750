//! In-memory keyword store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::core::KeywordStore;
use crate::error::{StorageError, StorageResult};
use crate::index::KeywordQuery;
use crate::types::{Document, KeywordSet};

type Collection = BTreeMap<String, Value>;

/// A [`KeywordStore`] that keeps records in process memory.
///
/// Records are held per collection, ordered by ID, so search results come
/// back in ID order. Nothing is persisted across restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records in a collection.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Returns true if a collection holds no records.
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl KeywordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert_or_replace(
        &self,
        collection: &str,
        document: &Document,
    ) -> StorageResult<()> {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(document.id().to_string(), document.content().clone());
        Ok(())
    }

    async fn read(&self, collection: &str, id: &str) -> StorageResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|records| records.get(id))
            .map(|content| Document::from_stored(id, content.clone())))
    }

    async fn replace_keywords(
        &self,
        collection: &str,
        id: &str,
        slot: &str,
        keywords: &KeywordSet,
    ) -> StorageResult<()> {
        let mut collections = self.collections.write();
        let content = collections
            .get_mut(collection)
            .and_then(|records| records.get_mut(id))
            .ok_or_else(|| StorageError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        if !content.is_object() {
            *content = Value::Object(Map::new());
        }
        content[slot] = keywords.to_json();
        Ok(())
    }

    async fn find_by_keywords(
        &self,
        collection: &str,
        slot: &str,
        query: &KeywordQuery,
    ) -> StorageResult<Vec<Document>> {
        let collections = self.collections.read();
        let Some(records) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(records
            .iter()
            .filter(|(_, content)| {
                let keywords = content
                    .get(slot)
                    .map(KeywordSet::from_json)
                    .unwrap_or_default();
                query.matches(keywords.as_slice())
            })
            .map(|(id, content)| Document::from_stored(id.as_str(), content.clone()))
            .collect())
    }

    async fn load_all(&self, collection: &str) -> StorageResult<Vec<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .map(|(id, content)| Document::from_stored(id.as_str(), content.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
