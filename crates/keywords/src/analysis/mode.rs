//! Keyword mode and the token normalizer it resolves to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::phonetic::Metaphone;
use super::stemmer::stem;

/// How each token is transformed before it becomes a keyword.
///
/// The mode is fixed when an index is configured and applies to both
/// indexing and querying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum KeywordMode {
    /// The token itself.
    Plain,
    /// The Porter stem of the token.
    #[default]
    Stem,
    /// The Metaphone code of the token.
    Phonetic,
}

impl KeywordMode {
    /// Returns the configuration name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordMode::Plain => "plain",
            KeywordMode::Stem => "stem",
            KeywordMode::Phonetic => "phonetic",
        }
    }

    /// Returns true if the `preserve_case` setting affects this mode.
    pub fn honors_case(&self) -> bool {
        !matches!(self, KeywordMode::Phonetic)
    }
}

impl fmt::Display for KeywordMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KeywordMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(KeywordMode::Plain),
            "stem" => Ok(KeywordMode::Stem),
            "phonetic" | "metaphone" => Ok(KeywordMode::Phonetic),
            _ => Err(ConfigError::UnknownMode {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for KeywordMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The resolved per-token transform for a configured index.
///
/// Built once from the index configuration. Every token seen while indexing
/// or querying goes through [`TokenNormalizer::normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenNormalizer {
    /// Keep the token, lower-casing unless `preserve_case` is set.
    Plain {
        /// Skip lower-casing.
        preserve_case: bool,
    },
    /// Stem the token, lower-casing first unless `preserve_case` is set.
    Stem {
        /// Skip lower-casing.
        preserve_case: bool,
    },
    /// Encode the token with Metaphone. Output is always upper case.
    Phonetic(Metaphone),
}

impl TokenNormalizer {
    /// Resolves the normalizer for a mode.
    pub fn new(mode: KeywordMode, preserve_case: bool, max_code_len: Option<usize>) -> Self {
        match mode {
            KeywordMode::Plain => TokenNormalizer::Plain { preserve_case },
            KeywordMode::Stem => TokenNormalizer::Stem { preserve_case },
            KeywordMode::Phonetic => TokenNormalizer::Phonetic(
                max_code_len.map_or_else(Metaphone::default, Metaphone::with_max_code_len),
            ),
        }
    }

    /// Returns the mode this normalizer was resolved from.
    pub fn mode(&self) -> KeywordMode {
        match self {
            TokenNormalizer::Plain { .. } => KeywordMode::Plain,
            TokenNormalizer::Stem { .. } => KeywordMode::Stem,
            TokenNormalizer::Phonetic(_) => KeywordMode::Phonetic,
        }
    }

    /// Normalizes one token. The result may be empty (e.g. the phonetic code
    /// of a number); callers drop empty keywords.
    pub fn normalize(&self, token: &str) -> String {
        match self {
            TokenNormalizer::Plain { preserve_case } => fold(token, *preserve_case),
            TokenNormalizer::Stem { preserve_case } => stem(&fold(token, *preserve_case)),
            TokenNormalizer::Phonetic(encoder) => encoder.encode(token),
        }
    }
}

fn fold(token: &str, preserve_case: bool) -> String {
    if preserve_case {
        token.to_string()
    } else {
        token.to_lowercase()
    }
}
