//! Stemming.
//!
//! [`StemFilter`] rewrites each token with a [`Stemmer`]. Only the stemmed
//! variant of the evaluation includes it.

use std::fmt;
use std::sync::Arc;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod porter;

pub use porter::PorterStemmer;

/// Reduces a word to its stem.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;

    fn name(&self) -> &'static str;
}

/// Replaces the text of every token that is not stopped by its stem.
#[derive(Clone)]
pub struct StemFilter {
    stemmer: Arc<dyn Stemmer>,
}

impl StemFilter {
    /// Porter stemming.
    pub fn new() -> Self {
        Self::with_stemmer(Box::new(PorterStemmer))
    }

    pub fn with_stemmer(stemmer: Box<dyn Stemmer>) -> Self {
        StemFilter {
            stemmer: Arc::from(stemmer),
        }
    }
}

impl Default for StemFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StemFilter").field(&self.stemmer.name()).finish()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stemmer = Arc::clone(&self.stemmer);
        Ok(Box::new(tokens.map(move |token| {
            if token.stopped {
                token
            } else {
                let stem = stemmer.stem(&token.text);
                token.rewrite(stem)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "stem"
    }
}
