//! Tokens flowing through the analysis chain.
//!
//! Filters consume a [`TokenStream`] and return a new one. Tokens a filter
//! rejects are not dropped right away: they are marked stopped, so later
//! filters leave them alone, and [`terms`] skips them at the end.
//!
//! ```
//! use lexeval::analysis::token::Token;
//!
//! let token = Token::at("Mucus", 3, 21..26);
//! assert_eq!(token.span.len(), 5);
//! assert_eq!(token.rewrite("mucus").text, "mucus");
//! ```

use std::fmt;
use std::ops::Range;

/// One word of an abstract or query after tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Index of the token in the tokenizer output.
    pub position: usize,
    /// Byte range of the token in the char-filtered text.
    pub span: Range<usize>,
    pub stopped: bool,
}

impl Token {
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::at(text, position, 0..0)
    }

    pub fn at<S: Into<String>>(text: S, position: usize, span: Range<usize>) -> Self {
        Token {
            text: text.into(),
            position,
            span,
            stopped: false,
        }
    }

    /// Mark the token as rejected.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Replace the text, keeping position and span.
    pub fn rewrite<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stopped {
            write!(f, "({})", self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Lazily evaluated sequence of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Texts of the tokens no filter rejected, in order.
pub fn terms(tokens: TokenStream) -> Vec<String> {
    tokens
        .filter(|token| !token.stopped)
        .map(|token| token.text)
        .collect()
}
