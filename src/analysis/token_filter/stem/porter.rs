//! Porter stemming algorithm implementation.
//!
//! Follows Martin Porter's reference release, including its two departures
//! from the 1980 paper: `-bli` rewrites to `-ble` and `-logi` to `-log` in
//! step 2.
//!
//! # Algorithm
//!
//! The Porter stemmer applies a series of rewrite rules in five steps:
//! 1. Plurals and -ed/-ing suffixes, then terminal y → i
//! 2. -ational → -ate, -tional → -tion, etc.
//! 3. -icate → -ic, -ative → "", etc.
//! 4. Remove -al, -ance, -ence, etc.
//! 5. Remove final -e and -ll
//!
//! # Examples
//!
//! ```
//! use lexeval::analysis::token_filter::stem::Stemmer;
//! use lexeval::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("motoring"), "motor");
//! assert_eq!(stemmer.stem("ponies"), "poni");
//! assert_eq!(stemmer.stem("conditional"), "condit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_RULES: &[(&str, &str)] = &[
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

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm.
///
/// Words are lowercased first. Words of two letters or fewer, and words
/// containing anything other than ASCII letters, come back lowercased but
/// otherwise untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.len() <= 2 || !lower.bytes().all(|b| b.is_ascii_lowercase()) {
            return lower;
        }

        let mut state = StemState::new(lower.into_bytes());
        state.step1ab();
        if state.k > 0 {
            state.step1c();
            state.step2();
            state.step3();
            state.step4();
            state.step5();
        }
        state.finish()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

/// Working buffer for a single word.
///
/// `k` is the index of the last letter of the current word and `j` marks the
/// end of the stem once a suffix has matched. `j` is -1 when the whole word
/// matched a suffix.
struct StemState {
    b: Vec<u8>,
    k: isize,
    j: isize,
}

impl StemState {
    fn new(b: Vec<u8>) -> Self {
        let k = b.len() as isize - 1;
        StemState { b, k, j: k }
    }

    fn finish(mut self) -> String {
        self.b.truncate((self.k + 1) as usize);
        // Only ASCII lowercase bytes are ever written into the buffer.
        String::from_utf8_lossy(&self.b).into_owned()
    }

    fn at(&self, i: isize) -> u8 {
        self.b[i as usize]
    }

    fn cons(&self, i: isize) -> bool {
        match self.at(i) {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.cons(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[0..=j]`.
    fn m(&self) -> usize {
        let mut n = 0;
        let mut i = 0;
        loop {
            if i > self.j {
                return n;
            }
            if !self.cons(i) {
                break;
            }
            i += 1;
        }
        i += 1;
        loop {
            loop {
                if i > self.j {
                    return n;
                }
                if self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
            n += 1;
            loop {
                if i > self.j {
                    return n;
                }
                if !self.cons(i) {
                    break;
                }
                i += 1;
            }
            i += 1;
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..=self.j).any(|i| !self.cons(i))
    }

    fn double_consonant(&self, i: isize) -> bool {
        i >= 1 && self.at(i) == self.at(i - 1) && self.cons(i)
    }

    /// Consonant-vowel-consonant ending at `i`, where the last consonant is
    /// not w, x or y.
    fn cvc(&self, i: isize) -> bool {
        if i < 2 || !self.cons(i) || self.cons(i - 1) || !self.cons(i - 2) {
            return false;
        }
        !matches!(self.at(i), b'w' | b'x' | b'y')
    }

    /// Check for `suffix` at the end of the current word and point `j` at the
    /// stem in front of it. `j` is left alone when there is no match.
    fn ends(&mut self, suffix: &str) -> bool {
        let len = suffix.len() as isize;
        if len > self.k + 1 {
            return false;
        }
        let start = (self.k - len + 1) as usize;
        if &self.b[start..=self.k as usize] != suffix.as_bytes() {
            return false;
        }
        self.j = self.k - len;
        true
    }

    fn set_to(&mut self, replacement: &str) {
        let start = (self.j + 1) as usize;
        self.b.truncate(start);
        self.b.extend_from_slice(replacement.as_bytes());
        self.k = self.j + replacement.len() as isize;
    }

    fn replace_if_measured(&mut self, replacement: &str) {
        if self.m() > 0 {
            self.set_to(replacement);
        }
    }

    fn truncate_to(&mut self, k: isize) {
        self.k = k;
        self.b.truncate((k + 1) as usize);
    }

    fn step1ab(&mut self) {
        if self.at(self.k) == b's' {
            if self.ends("sses") {
                self.truncate_to(self.k - 2);
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.at(self.k - 1) != b's' {
                self.truncate_to(self.k - 1);
            }
        }

        if self.ends("eed") {
            if self.m() > 0 {
                self.truncate_to(self.k - 1);
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.truncate_to(self.j);
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.k) {
                if !matches!(self.at(self.k), b'l' | b's' | b'z') {
                    self.truncate_to(self.k - 1);
                }
            } else if self.m() == 1 && self.cvc(self.k) {
                self.set_to("e");
            }
        }
    }

    fn step1c(&mut self) {
        if self.ends("y") && self.vowel_in_stem() {
            let k = self.k as usize;
            self.b[k] = b'i';
        }
    }

    fn step2(&mut self) {
        for (suffix, replacement) in STEP2_RULES {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    fn step3(&mut self) {
        for (suffix, replacement) in STEP3_RULES {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    fn step4(&mut self) {
        for suffix in STEP4_SUFFIXES {
            if !self.ends(suffix) {
                continue;
            }
            if *suffix == "ion" && !(self.j >= 0 && matches!(self.at(self.j), b's' | b't')) {
                continue;
            }
            if self.m() > 1 {
                self.truncate_to(self.j);
            }
            return;
        }
    }

    fn step5(&mut self) {
        self.j = self.k;
        if self.at(self.k) == b'e' {
            let m = self.m();
            if m > 1 || (m == 1 && !self.cvc(self.k - 1)) {
                self.truncate_to(self.k - 1);
            }
        }
        if self.at(self.k) == b'l' && self.double_consonant(self.k) && self.m() > 1 {
            self.truncate_to(self.k - 1);
        }
    }
}
