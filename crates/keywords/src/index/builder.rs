//! Keyword set construction.
//!
//! [`KeywordSetBuilder`] turns a list of source values into a [`KeywordSet`].
//! It is a pure function: it neither reads nor writes the record, so the same
//! values always produce the same set.

use serde_json::Value;

use crate::analysis::{TokenNormalizer, analyze};
use crate::config::IndexSpec;
use crate::types::KeywordSet;

/// Output of a derivation callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Derived {
    /// Contributes no values.
    #[default]
    None,
    /// One extra source value.
    One(Value),
    /// Several independent source values.
    Many(Vec<Value>),
}

impl Derived {
    /// Appends the derived values to `out`.
    pub fn extend_into(self, out: &mut Vec<Value>) {
        match self {
            Derived::None => {}
            Derived::One(value) => out.push(value),
            Derived::Many(values) => out.extend(values),
        }
    }
}

impl From<Value> for Derived {
    fn from(value: Value) -> Self {
        Derived::One(value)
    }
}

impl From<Vec<Value>> for Derived {
    fn from(values: Vec<Value>) -> Self {
        Derived::Many(values)
    }
}

impl From<&str> for Derived {
    fn from(value: &str) -> Self {
        Derived::One(Value::String(value.to_string()))
    }
}

impl From<String> for Derived {
    fn from(value: String) -> Self {
        Derived::One(Value::String(value))
    }
}

impl<T: Into<Derived>> From<Option<T>> for Derived {
    fn from(value: Option<T>) -> Self {
        value.map_or(Derived::None, Into::into)
    }
}

/// Builds keyword sets for one index.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSetBuilder<'a> {
    normalizer: &'a TokenNormalizer,
}

impl<'a> KeywordSetBuilder<'a> {
    /// Creates a builder using the spec's normalizer.
    pub fn new(spec: &'a IndexSpec) -> Self {
        Self::with_normalizer(spec.normalizer())
    }

    /// Creates a builder over an explicit normalizer.
    pub fn with_normalizer(normalizer: &'a TokenNormalizer) -> Self {
        Self { normalizer }
    }

    /// Builds a fresh set from `values`, in encounter order.
    ///
    /// Each value is coerced to text, tokenized, and normalized. Repeated
    /// and empty keywords are dropped.
    pub fn build<'v, I>(&self, values: I) -> KeywordSet
    where
        I: IntoIterator<Item = &'v Value>,
    {
        let mut texts = Vec::new();
        for value in values {
            coerce(value, &mut texts);
        }

        KeywordSet::from_keywords(
            texts
                .iter()
                .flat_map(|text| analyze(self.normalizer, text)),
        )
    }
}

/// Coerces a JSON value to the strings it contributes.
///
/// Null becomes the empty string, scalars their JSON rendering, and
/// containers contribute each member in order.
fn coerce(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => out.push(String::new()),
        Value::String(s) => out.push(s.clone()),
        Value::Bool(_) | Value::Number(_) => out.push(value.to_string()),
        Value::Array(items) => {
            for item in items {
                coerce(item, out);
            }
        }
        Value::Object(map) => {
            for member in map.values() {
                coerce(member, out);
            }
        }
    }
}
