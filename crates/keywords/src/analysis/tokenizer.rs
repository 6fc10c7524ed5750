//! Word tokenizer.
//!
//! Splits text on runs of whitespace and other non-alphanumeric characters.
//! Tokens are borrowed slices of the input in their original case; case
//! folding happens later in [`TokenNormalizer`](super::TokenNormalizer) so
//! that phonetic codes are not affected by it.

use std::iter::FusedIterator;

/// Returns a lazy iterator over the words in `text`.
///
/// # Example
///
/// ```
/// use helios_keywords::analysis::tokenize;
///
/// let tokens: Vec<_> = tokenize("  Hello, wide-World! ").collect();
/// assert_eq!(tokens, vec!["Hello", "wide", "World"]);
/// ```
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

/// Iterator over the words of a string.
///
/// Cloning the iterator restarts the sequence from the clone point, so a
/// `Tokens` value taken before iteration can be walked any number of times.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.rest.find(|c: char| c.is_alphanumeric())?;
        let word = &self.rest[start..];
        let end = word
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(word.len());

        self.rest = &word[end..];
        Some(&word[..end])
    }
}

impl FusedIterator for Tokens<'_> {}
