//! Splitting normalized text into tokens.

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub trait Tokenizer: Send + Sync {
    /// Tokens in text order, positions counting from zero.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    fn name(&self) -> &'static str;
}

pub mod regex;

pub use self::regex::RegexTokenizer;
