//! Text analysis.
//!
//! - [`tokenizer`] - splits text into words
//! - [`stemmer`] - Porter stemming
//! - [`phonetic`] - Metaphone encoding
//! - [`mode`] - the configured keyword mode and its resolved normalizer
//!
//! Everything here is a pure function of its input and safe to call from
//! any number of threads.

pub mod mode;
pub mod phonetic;
pub mod stemmer;
pub mod tokenizer;

pub use mode::{KeywordMode, TokenNormalizer};
pub use phonetic::{Metaphone, metaphone};
pub use stemmer::stem;
pub use tokenizer::{Tokens, tokenize};

/// Tokenizes `text` and normalizes each token, skipping empty results.
///
/// This is the pipeline shared by indexing and querying.
///
/// # Example
///
/// ```
/// use helios_keywords::analysis::{KeywordMode, TokenNormalizer, analyze};
///
/// let normalizer = TokenNormalizer::new(KeywordMode::Plain, false, None);
/// let words: Vec<_> = analyze(&normalizer, " Aaron  HECKMANN ").collect();
/// assert_eq!(words, vec!["aaron", "heckmann"]);
/// ```
pub fn analyze<'a>(
    normalizer: &'a TokenNormalizer,
    text: &'a str,
) -> impl Iterator<Item = String> + 'a {
    tokenize(text)
        .map(|token| normalizer.normalize(token))
        .filter(|keyword| !keyword.is_empty())
}
