//! Metaphone phonetic encoder.
//!
//! Encoding is delegated to [`rphonetic::Metaphone`], which follows the
//! Apache commons-codec rule set. This module adds the unlimited default
//! code length used by keyword indexes.

use rphonetic::Encoder;

/// Encodes a word with no length limit.
///
/// # Example
///
/// ```
/// use helios_keywords::analysis::metaphone;
///
/// assert_eq!(metaphone("Smith"), "SM0");
/// assert_eq!(metaphone("Philip"), "FLP");
/// assert_eq!(metaphone(""), "");
/// ```
pub fn metaphone(word: &str) -> String {
    Metaphone::default().encode(word)
}

/// Metaphone encoder with an optional maximum code length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metaphone {
    max_code_len: Option<usize>,
}

impl Metaphone {
    /// Creates an encoder that truncates codes to `max_code_len` characters.
    pub fn with_max_code_len(max_code_len: usize) -> Self {
        Self {
            max_code_len: Some(max_code_len),
        }
    }

    /// Returns the configured maximum code length, if any.
    pub fn max_code_len(&self) -> Option<usize> {
        self.max_code_len
    }

    /// Encodes a word into its Metaphone code.
    pub fn encode(&self, word: &str) -> String {
        // A code is never more than twice the input length (X encodes as KS).
        let limit = self
            .max_code_len
            .unwrap_or_else(|| word.chars().count() * 2)
            .max(1);
        rphonetic::Metaphone::new(Some(limit)).encode(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_codes(cases: &[(&str, &str)]) {
        for (word, expected) in cases {
            assert_eq!(metaphone(word), *expected, "metaphone({:?})", word);
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert_codes(&[("", ""), ("a", "A"), ("b", "B")]);
    }

    #[test]
    fn test_output_case_is_fixed() {
        assert_eq!(metaphone("Smith"), "SM0");
        assert_eq!(metaphone("SMITH"), "SM0");
        assert_eq!(metaphone("smith"), "SM0");
    }

    #[test]
    fn test_initial_exceptions() {
        assert_codes(&[
            ("knight", "NT"),
            ("gnome", "NM"),
            ("pneumatic", "NMTK"),
            ("aeon", "EN"),
            ("wrack", "RK"),
            ("whale", "WL"),
            ("xavier", "SFR"),
        ]);
    }

    #[test]
    fn test_initial_ch() {
        assert_codes(&[
            ("church", "KRX"),
            ("character", "KRKTR"),
            ("chemist", "KMST"),
            ("christ", "XRST"),
            ("chloe", "XL"),
        ]);
    }

    #[test]
    fn test_digraphs() {
        assert_codes(&[
            ("philip", "FLP"),
            ("school", "SKL"),
            ("nation", "NXN"),
            ("shop", "XP"),
            ("thumb", "0M"),
            ("watch", "WX"),
        ]);
    }

    #[test]
    fn test_soft_and_hard_consonants() {
        assert_codes(&[
            ("cider", "STR"),
            ("science", "SNS"),
            ("edge", "EJ"),
            ("giant", "JNT"),
            ("ghost", "KST"),
            ("night", "NT"),
            ("quick", "KK"),
            ("box", "BKS"),
            ("zoo", "S"),
            ("vivid", "FFT"),
        ]);
    }

    #[test]
    fn test_doubled_letters_collapse() {
        assert_codes(&[("bell", "BL"), ("mississippi", "MSSP"), ("accident", "AKSTNT")]);
    }

    #[test]
    fn test_long_words_are_not_truncated() {
        assert_eq!(metaphone("generalizations"), "JNRLSXNS");
    }

    #[test]
    fn test_max_code_len() {
        let encoder = Metaphone::with_max_code_len(2);
        assert_eq!(encoder.encode("character"), "KR");
        assert_eq!(encoder.max_code_len(), Some(2));
        assert_eq!(Metaphone::default().max_code_len(), None);
    }
}
