//! Index configuration.
//!
//! An index is described in two layers:
//!
//! - [`IndexConfig`] - the serializable settings (fields, mode, case handling,
//!   keyword slot), loadable from JSON
//! - [`IndexSpec`] - a validated config plus the optional derivation callback
//!   and the resolved [`TokenNormalizer`]. Immutable once built.
//!
//! # JSON Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `fields` | `[]` | Dotted field path, or list of paths, whose values feed extraction |
//! | `mode` | `stem` | `plain`, `stem` or `phonetic` (`metaphone` is accepted) |
//! | `preserveCase` | `false` | Skip lower-casing for `plain` and `stem` |
//! | `keywordSlot` | `_keywords` | Top-level key holding the keyword set |
//! | `maxCodeLen` | none | Truncate phonetic codes to this length |
//!
//! # Example
//!
//! ```
//! use helios_keywords::analysis::KeywordMode;
//! use helios_keywords::config::{IndexConfig, IndexSpec};
//! use serde_json::json;
//!
//! let config = IndexConfig::from_value(json!({
//!     "fields": ["name.first", "name.last"],
//!     "mode": "plain"
//! }))
//! .unwrap();
//! assert_eq!(config.mode, KeywordMode::Plain);
//!
//! let spec = IndexSpec::builder()
//!     .with_fields(["name.first", "name.last"])
//!     .mode(KeywordMode::Phonetic)
//!     .build()
//!     .unwrap();
//! assert_eq!(spec.keyword_slot(), "_keywords");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analysis::{KeywordMode, TokenNormalizer};
use crate::error::ConfigError;
use crate::index::Derived;
use crate::types::Document;

/// Default name of the slot holding the keyword set.
pub const DEFAULT_KEYWORD_SLOT: &str = "_keywords";

/// Serializable index settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexConfig {
    /// Dotted field paths whose values feed extraction, in order.
    ///
    /// A single path is accepted in place of a list.
    #[serde(deserialize_with = "deserialize_fields")]
    pub fields: Vec<String>,

    /// Token transform applied when indexing and querying.
    pub mode: KeywordMode,

    /// Keep the original case of `plain` and `stem` keywords.
    pub preserve_case: bool,

    /// Top-level key under which the keyword set is stored.
    pub keyword_slot: String,

    /// Maximum length of phonetic codes. Unlimited when unset.
    pub max_code_len: Option<usize>,
}

/// A single field path or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldList {
    One(String),
    Many(Vec<String>),
}

fn deserialize_fields<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FieldList::deserialize(deserializer)? {
        FieldList::One(field) => vec![field],
        FieldList::Many(fields) => fields,
    })
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            mode: KeywordMode::default(),
            preserve_case: false,
            keyword_slot: DEFAULT_KEYWORD_SLOT.to_string(),
            max_code_len: None,
        }
    }
}

impl IndexConfig {
    /// Parses and validates a config from JSON.
    ///
    /// An unknown `mode` is reported as [`ConfigError::UnknownMode`]; other
    /// problems are collected into [`ConfigError::Invalid`].
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        if let Some(mode) = value.get("mode").and_then(Value::as_str) {
            mode.parse::<KeywordMode>()?;
        }

        let config: IndexConfig =
            serde_json::from_value(value).map_err(|e| ConfigError::Invalid {
                errors: vec![e.to_string()],
            })?;
        config.validate(false)?;
        Ok(config)
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json).map_err(|e| ConfigError::Invalid {
            errors: vec![e.to_string()],
        })?;
        Self::from_value(value)
    }

    /// Validates the configuration, reporting every problem found.
    ///
    /// `has_derive` relaxes the requirement for at least one field.
    pub fn validate(&self, has_derive: bool) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.fields.is_empty() && !has_derive {
            errors.push("at least one field or a derive callback is required".to_string());
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.split('.').any(str::is_empty) {
                errors.push(format!("field path '{}' is invalid", field));
            } else if !seen.insert(field.as_str()) {
                errors.push(format!("field '{}' is listed more than once", field));
            }
        }

        if self.keyword_slot.is_empty() {
            errors.push("keyword slot cannot be empty".to_string());
        } else if self.keyword_slot.contains('.') {
            errors.push(format!(
                "keyword slot '{}' must be a top-level key",
                self.keyword_slot
            ));
        } else if let Some(field) = self
            .fields
            .iter()
            .find(|f| f.split('.').next() == Some(self.keyword_slot.as_str()))
        {
            errors.push(format!(
                "keyword slot '{}' overlaps source field '{}'",
                self.keyword_slot, field
            ));
        }

        if self.max_code_len == Some(0) {
            errors.push("max code length must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { errors })
        }
    }
}

/// Derivation callback contributing extra source values for a record.
pub type DeriveFn = dyn Fn(&Document) -> Derived + Send + Sync;

/// A validated index definition.
///
/// Cloning is cheap; the derivation callback is shared.
#[derive(Clone)]
pub struct IndexSpec {
    config: IndexConfig,
    derive: Option<Arc<DeriveFn>>,
    normalizer: TokenNormalizer,
}

impl IndexSpec {
    /// Returns a builder for an index spec.
    pub fn builder() -> IndexSpecBuilder {
        IndexSpecBuilder::new()
    }

    /// Builds a spec from a config with no derivation callback.
    pub fn from_config(config: IndexConfig) -> Result<Self, ConfigError> {
        IndexSpecBuilder::from_config(config).build()
    }

    /// Returns the underlying config.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Returns the source field paths.
    pub fn fields(&self) -> &[String] {
        &self.config.fields
    }

    /// Returns the keyword mode.
    pub fn mode(&self) -> KeywordMode {
        self.config.mode
    }

    /// Returns the keyword slot name.
    pub fn keyword_slot(&self) -> &str {
        &self.config.keyword_slot
    }

    /// Returns the resolved token normalizer.
    pub fn normalizer(&self) -> &TokenNormalizer {
        &self.normalizer
    }

    /// Returns true if a derivation callback is configured.
    pub fn has_derive(&self) -> bool {
        self.derive.is_some()
    }

    /// Invokes the derivation callback, if any.
    pub fn derive(&self, document: &Document) -> Derived {
        match &self.derive {
            Some(derive) => derive(document),
            None => Derived::None,
        }
    }
}

impl fmt::Debug for IndexSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexSpec")
            .field("config", &self.config)
            .field("derive", &self.derive.is_some())
            .finish()
    }
}

/// Builder for [`IndexSpec`].
#[derive(Default)]
pub struct IndexSpecBuilder {
    config: IndexConfig,
    derive: Option<Arc<DeriveFn>>,
}

impl IndexSpecBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing config.
    pub fn from_config(config: IndexConfig) -> Self {
        Self {
            config,
            derive: None,
        }
    }

    /// Adds a source field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.config.fields.push(field.into());
        self
    }

    /// Adds several source fields.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Sets the keyword mode.
    pub fn mode(mut self, mode: KeywordMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Keeps original case for `plain` and `stem` keywords.
    pub fn preserve_case(mut self, preserve_case: bool) -> Self {
        self.config.preserve_case = preserve_case;
        self
    }

    /// Sets the keyword slot name.
    pub fn keyword_slot(mut self, slot: impl Into<String>) -> Self {
        self.config.keyword_slot = slot.into();
        self
    }

    /// Limits phonetic codes to `len` characters.
    pub fn max_code_len(mut self, len: usize) -> Self {
        self.config.max_code_len = Some(len);
        self
    }

    /// Sets the derivation callback.
    pub fn derive<F>(mut self, derive: F) -> Self
    where
        F: Fn(&Document) -> Derived + Send + Sync + 'static,
    {
        self.derive = Some(Arc::new(derive));
        self
    }

    /// Validates the settings and builds the spec.
    pub fn build(self) -> Result<IndexSpec, ConfigError> {
        self.config.validate(self.derive.is_some())?;

        if self.config.preserve_case && !self.config.mode.honors_case() {
            tracing::warn!(
                mode = %self.config.mode,
                "preserve_case has no effect for this keyword mode"
            );
        }

        let normalizer = TokenNormalizer::new(
            self.config.mode,
            self.config.preserve_case,
            self.config.max_code_len,
        );

        Ok(IndexSpec {
            config: self.config,
            derive: self.derive,
            normalizer,
        })
    }
}
