//! Minimum term length.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Removes tokens shorter than a minimum number of characters.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min: usize,
}

impl LengthFilter {
    /// Create a filter keeping tokens with at least `min` characters.
    pub fn new(min: usize) -> Self {
        LengthFilter { min }
    }

    pub fn min(&self) -> usize {
        self.min
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let min = self.min;
        Ok(Box::new(
            tokens.filter(move |token| token.stopped || token.text.chars().count() >= min),
        ))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}
