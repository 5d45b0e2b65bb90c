//! Pattern-based tokenization.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{LexevalError, Result};

/// Runs of ASCII letters and digits.
///
/// Punctuation, underscores and whitespace all separate tokens, so
/// `"CF-related"` yields `CF` and `related`.
pub const DEFAULT_PATTERN: &str = r"[A-Za-z0-9]+";

/// Emits every match of a pattern as a token.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_PATTERN)
    }

    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            LexevalError::analysis(format!("Invalid token pattern '{pattern}': {e}"))
        })?;
        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        // Matches borrow `text`, so the stream is materialized here.
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, found)| Token::at(found.as_str(), position, found.range()))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
