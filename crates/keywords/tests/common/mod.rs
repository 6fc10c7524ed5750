//! Shared fixtures for the keyword index integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use helios_keywords::analysis::KeywordMode;
use helios_keywords::backends::MemoryStore;
use helios_keywords::config::IndexSpec;
use helios_keywords::core::KeywordStore;
use helios_keywords::engine::KeywordIndex;
use helios_keywords::error::{StorageError, StorageResult};
use helios_keywords::index::KeywordQuery;
use helios_keywords::types::{Document, KeywordSet};

/// Installs a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Spec over `name.first` and `name.last` in the given mode.
pub fn name_spec(mode: KeywordMode) -> IndexSpec {
    IndexSpec::builder()
        .with_fields(["name.first", "name.last"])
        .mode(mode)
        .build()
        .expect("valid spec")
}

/// Index over a fresh memory store.
pub fn memory_index(spec: IndexSpec) -> KeywordIndex<MemoryStore> {
    init_tracing();
    KeywordIndex::new("people", spec, Arc::new(MemoryStore::new()))
}

/// Record with the given first and last name.
pub fn person(id: &str, first: Option<&str>, last: Option<&str>) -> Document {
    let mut name = serde_json::Map::new();
    if let Some(first) = first {
        name.insert("first".to_string(), Value::from(first));
    }
    if let Some(last) = last {
        name.insert("last".to_string(), Value::from(last));
    }
    Document::with_id(id, serde_json::json!({ "name": name }))
}

/// A store that fails keyword writes for chosen records and tracks how many
/// writes are in flight.
pub struct FlakyStore {
    inner: MemoryStore,
    failing: HashSet<String>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    write_delay: Duration,
}

impl FlakyStore {
    pub fn new<I, S>(failing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: MemoryStore::new(),
            failing: failing.into_iter().map(Into::into).collect(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            write_delay: Duration::ZERO,
        }
    }

    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeywordStore for FlakyStore {
    fn backend_name(&self) -> &'static str {
        "flaky"
    }

    async fn insert_or_replace(&self, collection: &str, document: &Document) -> StorageResult<()> {
        self.inner.insert_or_replace(collection, document).await
    }

    async fn read(&self, collection: &str, id: &str) -> StorageResult<Option<Document>> {
        self.inner.read(collection, id).await
    }

    async fn replace_keywords(
        &self,
        collection: &str,
        id: &str,
        slot: &str,
        keywords: &KeywordSet,
    ) -> StorageResult<()> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }

        let result = if self.failing.contains(id) {
            Err(StorageError::Backend {
                backend_name: "flaky".to_string(),
                message: format!("write rejected for {}", id),
            })
        } else {
            self.inner.replace_keywords(collection, id, slot, keywords).await
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn find_by_keywords(
        &self,
        collection: &str,
        slot: &str,
        query: &KeywordQuery,
    ) -> StorageResult<Vec<Document>> {
        self.inner.find_by_keywords(collection, slot, query).await
    }

    async fn load_all(&self, collection: &str) -> StorageResult<Vec<Document>> {
        self.inner.load_all(collection).await
    }
}

/// A store whose every call fails.
pub struct DownStore;

impl DownStore {
    fn error() -> StorageError {
        StorageError::Unavailable {
            backend_name: "down".to_string(),
            message: "connection refused".to_string(),
        }
    }
}

#[async_trait]
impl KeywordStore for DownStore {
    fn backend_name(&self) -> &'static str {
        "down"
    }

    async fn insert_or_replace(&self, _: &str, _: &Document) -> StorageResult<()> {
        Err(Self::error())
    }

    async fn read(&self, _: &str, _: &str) -> StorageResult<Option<Document>> {
        Err(Self::error())
    }

    async fn replace_keywords(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: &KeywordSet,
    ) -> StorageResult<()> {
        Err(Self::error())
    }

    async fn find_by_keywords(
        &self,
        _: &str,
        _: &str,
        _: &KeywordQuery,
    ) -> StorageResult<Vec<Document>> {
        Err(Self::error())
    }

    async fn load_all(&self, _: &str) -> StorageResult<Vec<Document>> {
        Err(Self::error())
    }
}
