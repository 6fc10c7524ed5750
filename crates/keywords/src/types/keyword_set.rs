//! The [`KeywordSet`] type.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

/// An insertion-ordered, duplicate-free set of keywords owned by one record.
///
/// A `KeywordSet` is never edited in place. The builder produces a fresh set
/// from the record's current values and the indexer swaps it in whole.
///
/// # Examples
///
/// ```
/// use helios_keywords::types::KeywordSet;
///
/// let set = KeywordSet::from_keywords(["smith", "", "john", "smith"]);
/// assert_eq!(set.as_slice(), &["smith", "john"]);
/// assert!(set.contains("john"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from keywords in order, dropping empties and repeats.
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for keyword in keywords {
            let keyword = keyword.into();
            if !keyword.is_empty() && seen.insert(keyword.clone()) {
                ordered.push(keyword);
            }
        }
        Self(ordered)
    }

    /// Reads a set from a stored JSON array. Non-string entries are ignored.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                Self::from_keywords(items.iter().filter_map(Value::as_str))
            }
            _ => Self::new(),
        }
    }

    /// Converts the set to the JSON array stored in the keyword slot.
    pub fn to_json(&self) -> Value {
        Value::Array(self.0.iter().cloned().map(Value::String).collect())
    }

    /// Returns true if the keyword is in the set.
    pub fn contains(&self, keyword: &str) -> bool {
        self.0.iter().any(|k| k == keyword)
    }

    /// Returns the number of keywords.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set has no keywords.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the keywords in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterates over the keywords in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Consumes the set, returning the keywords.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
