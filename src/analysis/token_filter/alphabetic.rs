//! Filter that keeps purely alphabetic tokens.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Drops tokens containing anything other than ASCII letters.
///
/// Numbers such as record counts or dosages (`"7"`, `"12mg"`) never become
/// index terms.
#[derive(Clone, Debug, Default)]
pub struct AlphabeticFilter;

impl AlphabeticFilter {
    pub fn new() -> Self {
        AlphabeticFilter
    }
}

impl Filter for AlphabeticFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.filter(|token| {
            token.stopped || token.text.bytes().all(|b| b.is_ascii_alphabetic())
        })))
    }

    fn name(&self) -> &'static str {
        "alphabetic"
    }
}
