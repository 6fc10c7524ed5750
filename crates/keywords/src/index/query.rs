//! Query translation.
//!
//! A raw query string runs through the same tokenize and normalize pipeline
//! used for indexing. The resulting [`KeywordQuery`] is handed to the store,
//! which evaluates it against each record's stored keywords.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::analyze;
use crate::config::IndexSpec;
use crate::error::ConfigError;

/// How query terms are matched against a record's keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum MatchMode {
    /// Every query term must be present. An empty query matches everything.
    #[default]
    All,
    /// At least one query term must be present. An empty query matches
    /// nothing.
    Any,
}

impl MatchMode {
    /// Returns the name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::All => "all",
            MatchMode::Any => "any",
        }
    }

    /// Parses an optional mode name, defaulting to [`MatchMode::All`] when
    /// omitted.
    pub fn parse_or_default(value: Option<&str>) -> Result<Self, ConfigError> {
        value.map_or(Ok(MatchMode::default()), str::parse::<MatchMode>)
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(MatchMode::All),
            "any" => Ok(MatchMode::Any),
            _ => Err(ConfigError::UnknownMatchMode {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for MatchMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A tokenized, normalized query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    terms: Vec<String>,
    match_mode: MatchMode,
}

impl KeywordQuery {
    /// Translates a raw query using the index's normalizer.
    pub fn new(spec: &IndexSpec, query: &str, match_mode: MatchMode) -> Self {
        Self {
            terms: analyze(spec.normalizer(), query).collect(),
            match_mode,
        }
    }

    /// Creates a query from already-normalized terms.
    pub fn from_terms<I, S>(terms: I, match_mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            match_mode,
        }
    }

    /// Returns the normalized query terms. May contain repeats.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns the match mode.
    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Returns true if a record with `keywords` satisfies the query.
    pub fn matches(&self, keywords: &[String]) -> bool {
        let present = |term: &String| keywords.contains(term);
        match self.match_mode {
            MatchMode::All => self.terms.iter().all(present),
            MatchMode::Any => self.terms.iter().any(present),
        }
    }
}
