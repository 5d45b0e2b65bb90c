//! Stopword removal.
//!
//! The built-in list covers English function words plus the question words
//! that open most CF queries ("what", "which", "how"). A stopword file, one
//! word per line, replaces it entirely.
//!
//! ```
//! use lexeval::analysis::token::{Token, terms};
//! use lexeval::analysis::token_filter::Filter;
//! use lexeval::analysis::token_filter::stop::StopFilter;
//!
//! let tokens = vec![Token::new("what", 0), Token::new("sweat", 1), Token::new("test", 2)];
//! let kept = StopFilter::new().filter(Box::new(tokens.into_iter())).unwrap();
//!
//! assert_eq!(terms(kept), vec!["sweat", "test"]);
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use log::debug;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::{LexevalError, Result};

const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it",
    "its", "itself", "may", "me", "might", "more", "most", "must", "my", "myself", "no", "nor",
    "not", "of", "off", "on", "once", "only", "or", "other", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "same", "shall", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "thus", "to", "too", "under", "until", "up", "upon",
    "very", "was", "we", "were", "what", "when", "where", "whether", "which", "while", "who",
    "whom", "why", "will", "with", "within", "without", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

static ENGLISH_SET: LazyLock<Arc<HashSet<String>>> =
    LazyLock::new(|| Arc::new(ENGLISH.iter().map(|w| w.to_string()).collect()));

/// Drops tokens found in a stopword set.
///
/// Matching is exact, so the filter runs after lowercasing. Tokens already
/// stopped upstream pass through untouched.
#[derive(Clone, Debug)]
pub struct StopFilter {
    words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// The built-in English list.
    pub fn new() -> Self {
        StopFilter {
            words: Arc::clone(&ENGLISH_SET),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    /// Read a stopword file. Words are trimmed and lowercased; blank lines
    /// and `#` comments are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            LexevalError::config(format!("Cannot read stopwords '{}': {e}", path.display()))
        })?;

        let filter = Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_lowercase),
        );
        debug!("Loaded {} stopwords from '{}'", filter.len(), path.display());
        Ok(filter)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words = Arc::clone(&self.words);

        Ok(Box::new(tokens.filter(move |token| {
            token.stopped || !words.contains(&token.text)
        })))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
