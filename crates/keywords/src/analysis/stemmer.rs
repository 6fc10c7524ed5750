//! Porter stemmer.
//!
//! An implementation of M.F. Porter's 1980 suffix-stripping algorithm using
//! the rule tables of his reference implementation (including its `bli` and
//! `logi` step 2 rules).
//!
//! Letters are classified case-insensitively. Characters that survive
//! stripping keep their original case and replacement suffixes are written in
//! lower case, so callers that fold case first get the usual lower-case stems.

/// Step 2 rules, `(suffix, replacement)`. Applied when the stem measure is > 0.
const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

/// Step 3 rules, `(suffix, replacement)`. Applied when the stem measure is > 0.
const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Step 4 suffixes, removed when the stem measure is > 1.
const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Reduces a word to its Porter stem.
///
/// Words of two characters or fewer are returned unchanged.
///
/// # Example
///
/// ```
/// use helios_keywords::analysis::stem;
///
/// assert_eq!(stem("absolver"), "absolv");
/// assert_eq!(stem("caresses"), "caress");
/// assert_eq!(stem("relational"), "relat");
/// ```
pub fn stem(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 2 {
        return word.to_string();
    }

    let mut stemmer = Stemmer { b: chars, j: 0 };
    stemmer.step1ab();
    if stemmer.b.len() > 1 {
        stemmer.step1c();
        stemmer.step2();
        stemmer.step3();
        stemmer.step4();
        stemmer.step5();
    }

    stemmer.b.into_iter().collect()
}

/// Working state for one word.
///
/// `b` holds the word being reduced; `j` is the length of the stem in front
/// of the suffix most recently matched by [`Stemmer::ends`].
struct Stemmer {
    b: Vec<char>,
    j: usize,
}

impl Stemmer {
    fn lower(&self, i: usize) -> char {
        self.b[i].to_ascii_lowercase()
    }

    fn last(&self) -> usize {
        self.b.len() - 1
    }

    fn is_consonant(&self, i: usize) -> bool {
        match self.lower(i) {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..j]`.
    ///
    /// For `[C](VC)^m[V]` this is `m`: `tr` and `ee` give 0, `trouble` gives 1,
    /// `troubles` and `private` give 2.
    fn measure(&self) -> usize {
        let j = self.j;
        let mut n = 0;
        let mut i = 0;

        while i < j && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < j && !self.is_consonant(i) {
                i += 1;
            }
            if i >= j {
                return n;
            }
            n += 1;
            while i < j && self.is_consonant(i) {
                i += 1;
            }
            if i >= j {
                return n;
            }
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.is_consonant(i))
    }

    fn double_consonant(&self, i: usize) -> bool {
        i >= 1 && self.lower(i) == self.lower(i - 1) && self.is_consonant(i)
    }

    /// True if `b[i-2..=i]` is consonant-vowel-consonant and the final
    /// consonant is not `w`, `x` or `y`.
    fn cvc(&self, i: usize) -> bool {
        i >= 2
            && self.is_consonant(i)
            && !self.is_consonant(i - 1)
            && self.is_consonant(i - 2)
            && !matches!(self.lower(i), 'w' | 'x' | 'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        let len = suffix.len();
        if len > self.b.len() {
            return false;
        }
        let start = self.b.len() - len;
        let matched = self.b[start..]
            .iter()
            .zip(suffix.chars())
            .all(|(c, s)| c.to_ascii_lowercase() == s);
        if matched {
            self.j = start;
        }
        matched
    }

    fn set_to(&mut self, replacement: &str) {
        self.b.truncate(self.j);
        self.b.extend(replacement.chars());
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.measure() > 0 {
            self.set_to(replacement);
        }
    }

    /// Plurals, `-ed` and `-ing`.
    fn step1ab(&mut self) {
        if self.lower(self.last()) == 's' {
            if self.ends("sses") {
                self.b.truncate(self.b.len() - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.lower(self.last() - 1) != 's' {
                self.b.pop();
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.b.pop();
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.b.truncate(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.last()) {
                if !matches!(self.lower(self.last()), 'l' | 's' | 'z') {
                    self.b.pop();
                }
            } else {
                self.j = self.b.len();
                if self.measure() == 1 && self.cvc(self.last()) {
                    self.b.push('e');
                }
            }
        }
    }

    /// Terminal `y` becomes `i` when the stem has a vowel.
    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let k = self.last();
            self.b[k] = 'i';
        }
    }

    fn step2(&mut self) {
        self.apply_first(STEP2);
    }

    fn step3(&mut self) {
        self.apply_first(STEP3);
    }

    fn apply_first(&mut self, rules: &[(&str, &str)]) {
        if let Some((_, replacement)) = rules.iter().find(|(suffix, _)| self.ends(suffix)) {
            self.replace_if_measured(replacement);
        }
    }

    fn step4(&mut self) {
        let found = STEP4.iter().any(|suffix| {
            self.ends(suffix)
                && (*suffix != "ion" || (self.j > 0 && matches!(self.lower(self.j - 1), 's' | 't')))
        });
        if found && self.measure() > 1 {
            self.b.truncate(self.j);
        }
    }

    /// Final `e` and double `l`.
    fn step5(&mut self) {
        self.j = self.b.len();
        let k = self.last();
        if self.lower(k) == 'e' {
            let m = self.measure();
            let short = k.checked_sub(1).is_some_and(|i| self.cvc(i));
            if m > 1 || (m == 1 && !short) {
                self.b.pop();
            }
        }

        self.j = self.b.len();
        let k = self.last();
        if self.lower(k) == 'l' && self.double_consonant(k) && self.measure() > 1 {
            self.b.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_stems(cases: &[(&str, &str)]) {
        for (word, expected) in cases {
            assert_eq!(stem(word), *expected, "stem({:?})", word);
        }
    }

    #[test]
    fn test_short_words_unchanged() {
        assert_stems(&[("a", "a"), ("is", "is"), ("", "")]);
    }

    #[test]
    fn test_step1_plurals_and_participles() {
        assert_stems(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("ties", "ti"),
            ("caress", "caress"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("agreed", "agre"),
            ("plastered", "plaster"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("hopping", "hop"),
            ("falling", "fall"),
            ("filing", "file"),
        ]);
    }

    #[test]
    fn test_step1c_terminal_y() {
        assert_stems(&[("happy", "happi"), ("sky", "sky")]);
    }

    #[test]
    fn test_derivational_suffixes() {
        assert_stems(&[
            ("relational", "relat"),
            ("conditional", "condit"),
            ("rational", "ration"),
            ("digitizer", "digit"),
            ("operator", "oper"),
            ("hopeful", "hope"),
            ("goodness", "good"),
            ("generalizations", "gener"),
        ]);
    }

    #[test]
    fn test_step4_and_step5() {
        assert_stems(&[
            ("absolver", "absolv"),
            ("adjustment", "adjust"),
            ("replacement", "replac"),
            ("adoption", "adopt"),
            ("effective", "effect"),
            ("probate", "probat"),
            ("rate", "rate"),
            ("cease", "ceas"),
            ("controll", "control"),
            ("roll", "roll"),
        ]);
    }

    #[test]
    fn test_case_insensitive_classification() {
        assert_eq!(stem("Running"), "Run");
        assert_eq!(stem("ABSOLVER"), "ABSOLV");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(stem("generalizations"), stem("generalizations"));
    }
}
