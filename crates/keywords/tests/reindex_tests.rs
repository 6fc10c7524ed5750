//! Bulk reindex tests.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use helios_keywords::analysis::KeywordMode;
use helios_keywords::config::IndexSpec;
use helios_keywords::core::KeywordStore;
use helios_keywords::engine::KeywordIndex;
use helios_keywords::index::{MatchMode, ReindexRequest};
use helios_keywords::types::Document;

use common::{DownStore, FlakyStore, init_tracing, name_spec};

fn spec() -> IndexSpec {
    IndexSpec::builder()
        .with_field("title")
        .mode(KeywordMode::Plain)
        .build()
        .unwrap()
}

/// Seeds `count` records whose stored keywords are stale.
async fn seed<S: KeywordStore>(store: &S, count: usize) {
    for i in 0..count {
        let doc = Document::with_id(
            format!("r{}", i),
            json!({"title": format!("title {}", i), "_keywords": ["stale"]}),
        );
        store.insert_or_replace("books", &doc).await.unwrap();
    }
}

#[tokio::test]
async fn test_reindex_rewrites_every_record() {
    init_tracing();
    let store = Arc::new(FlakyStore::new(Vec::<String>::new()));
    seed(store.as_ref(), 5).await;
    let index = KeywordIndex::new("books", spec(), Arc::clone(&store));

    let summary = index.reindex_all(ReindexRequest::default()).await.unwrap();
    assert_eq!(summary.counts(), (5, 0));
    assert!(summary.completed_at.is_some());

    assert!(index.search("stale", MatchMode::Any).await.unwrap().is_empty());
    let found = index.search("title 3", MatchMode::All).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), "r3");
}

#[tokio::test]
async fn test_reindex_tolerates_partial_failure() {
    init_tracing();
    let store = Arc::new(FlakyStore::new(["r1", "r4"]));
    seed(store.as_ref(), 6).await;
    let index = KeywordIndex::new("books", spec(), Arc::clone(&store));

    let summary = index.reindex_all(ReindexRequest::default()).await.unwrap();
    assert_eq!(summary.counts(), (4, 2));
    assert!(summary.has_failures());

    let mut failed: Vec<_> = summary
        .failures
        .iter()
        .filter_map(|f| f.id.as_deref())
        .collect();
    failed.sort();
    assert_eq!(failed, vec!["r1", "r4"]);

    let r1 = store.read("books", "r1").await.unwrap().unwrap();
    assert_eq!(r1.keywords("_keywords").as_slice(), &["stale"]);
    let r2 = store.read("books", "r2").await.unwrap().unwrap();
    assert_eq!(r2.keywords("_keywords").as_slice(), &["title", "2"]);
}

#[tokio::test]
async fn test_reindex_respects_concurrency_limit() {
    init_tracing();
    let store = Arc::new(
        FlakyStore::new(Vec::<String>::new()).with_write_delay(Duration::from_millis(5)),
    );
    seed(store.as_ref(), 10).await;
    let index = KeywordIndex::new("books", spec(), Arc::clone(&store));

    let summary = index
        .reindex_all(ReindexRequest::new().with_concurrency(2))
        .await
        .unwrap();

    assert_eq!(summary.counts(), (10, 0));
    assert!(store.max_in_flight() <= 2);
    assert!(store.max_in_flight() >= 1);
}

#[tokio::test]
async fn test_reindex_zero_concurrency_runs_serially() {
    init_tracing();
    let store = Arc::new(
        FlakyStore::new(Vec::<String>::new()).with_write_delay(Duration::from_millis(1)),
    );
    seed(store.as_ref(), 3).await;
    let index = KeywordIndex::new("books", spec(), Arc::clone(&store));

    let summary = index
        .reindex_all(ReindexRequest::new().with_concurrency(0))
        .await
        .unwrap();
    assert_eq!(summary.counts(), (3, 0));
    assert_eq!(store.max_in_flight(), 1);
}

#[tokio::test]
async fn test_reindex_load_failure_propagates() {
    init_tracing();
    let index = KeywordIndex::new("people", name_spec(KeywordMode::Plain), Arc::new(DownStore));

    let err = index.reindex_all(ReindexRequest::default()).await.unwrap_err();
    assert!(err.is_storage());
}
