//! The [`Document`] record type.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use uuid::Uuid;

use super::KeywordSet;

/// A JSON record with change tracking.
///
/// `Document` wraps the record content together with the bookkeeping the
/// indexer needs:
///
/// - **Identity**: a logical ID, generated if not supplied
/// - **Newness**: whether the record has been saved yet
/// - **Changes**: which dotted paths were written since the last save, and
///   which were written since keywords were last computed
///
/// Fields are addressed by dotted paths such as `name.first`. Arrays along a
/// path are flattened, so `names.first` reads `first` from every element of
/// `names`.
///
/// # Examples
///
/// ```
/// use helios_keywords::types::Document;
/// use serde_json::json;
///
/// let mut doc = Document::with_id("p1", json!({"name": {"last": "heckmann"}}));
/// doc.set("name.first", "aaron");
///
/// assert_eq!(doc.get("name.first"), Some(&json!("aaron")));
/// assert!(doc.is_modified("name"));
/// assert!(!doc.is_modified("tags"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// The record's logical ID.
    id: String,

    /// The record content as JSON.
    content: Value,

    /// True until the record has been saved once.
    is_new: bool,

    /// Paths written since the last save.
    modified: BTreeSet<String>,

    /// Paths written since keywords were last computed.
    pending: BTreeSet<String>,

    /// Whether keywords have been computed for this record.
    indexed: bool,
}

impl Document {
    /// Creates a new, unsaved record with a generated ID.
    pub fn new(content: Value) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), content)
    }

    /// Creates a new, unsaved record with the given ID.
    pub fn with_id(id: impl Into<String>, content: Value) -> Self {
        Self {
            id: id.into(),
            content,
            is_new: true,
            modified: BTreeSet::new(),
            pending: BTreeSet::new(),
            indexed: false,
        }
    }

    /// Rehydrates a record loaded from a store.
    ///
    /// The stored keyword slot is trusted to match the stored content, so the
    /// record starts out indexed and unmodified.
    pub fn from_stored(id: impl Into<String>, content: Value) -> Self {
        Self {
            id: id.into(),
            content,
            is_new: false,
            modified: BTreeSet::new(),
            pending: BTreeSet::new(),
            indexed: true,
        }
    }

    /// Returns the record ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the record content.
    pub fn content(&self) -> &Value {
        &self.content
    }

    /// Consumes the record, returning its content.
    pub fn into_content(self) -> Value {
        self.content
    }

    /// Returns true if the record has never been saved.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Returns the value at a dotted path, following objects only.
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.content, |value, segment| value.get(segment))
    }

    /// Returns every value reachable at a dotted path, flattening arrays
    /// encountered along the way.
    pub fn values_at(&self, path: &str) -> Vec<&Value> {
        let segments: Vec<&str> = path.split('.').collect();
        let mut out = Vec::new();
        collect_path(&self.content, &segments, &mut out);
        out
    }

    /// Writes a value at a dotted path, creating intermediate objects.
    ///
    /// Any non-object value standing in the way is replaced by an object.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let mut current = &mut self.content;
        for segment in path.split('.') {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            current = &mut current[segment];
        }
        *current = value.into();

        self.modified.insert(path.to_string());
        self.pending.insert(path.to_string());
    }

    /// Returns true if `path`, a parent of it, or a child of it was written
    /// since the last save.
    pub fn is_modified(&self, path: &str) -> bool {
        self.modified.iter().any(|m| paths_overlap(m, path))
    }

    /// Returns the paths written since the last save.
    pub fn modified_paths(&self) -> impl Iterator<Item = &str> {
        self.modified.iter().map(String::as_str)
    }

    /// Reads the keyword set stored under `slot`.
    pub fn keywords(&self, slot: &str) -> KeywordSet {
        self.content
            .get(slot)
            .map(KeywordSet::from_json)
            .unwrap_or_default()
    }

    /// Marks the record as saved: it is no longer new and has no
    /// modifications.
    pub fn mark_saved(&mut self) {
        self.is_new = false;
        self.modified.clear();
    }

    /// Replaces the keyword slot with `keywords` in a single assignment.
    pub(crate) fn replace_keywords(&mut self, slot: &str, keywords: &KeywordSet) {
        if !self.content.is_object() {
            self.content = Value::Object(Map::new());
        }
        self.content[slot] = keywords.to_json();
    }

    pub(crate) fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Returns true if `path` overlaps a write made since the last
    /// recomputation.
    pub(crate) fn is_pending(&self, path: &str) -> bool {
        self.pending.iter().any(|p| paths_overlap(p, path))
    }

    pub(crate) fn mark_indexed(&mut self) {
        self.indexed = true;
        self.pending.clear();
    }
}

/// True if the paths are equal or one is an ancestor of the other.
pub(crate) fn paths_overlap(a: &str, b: &str) -> bool {
    a == b || is_descendant(a, b) || is_descendant(b, a)
}

fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('.'))
}

fn collect_path<'v>(value: &'v Value, segments: &[&str], out: &mut Vec<&'v Value>) {
    let Some((segment, remaining)) = segments.split_first() else {
        out.push(value);
        return;
    };

    match value {
        Value::Object(obj) => {
            if let Some(child) = obj.get(*segment) {
                collect_path(child, remaining, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_path(item, segments, out);
            }
        }
        _ => {}
    }
}
