//! The analyzer abstraction.
//!
//! An analyzer turns raw abstract or query text into the terms that are
//! indexed or searched:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → … → Filter N → Terms
//! ```
//!
//! ```
//! use lexeval::analysis::analyzer::analyzer::Analyzer;
//! use lexeval::analysis::token::{Token, TokenStream};
//! use lexeval::error::Result;
//!
//! struct Whitespace;
//!
//! impl Analyzer for Whitespace {
//!     fn analyze(&self, text: &str) -> Result<TokenStream> {
//!         let tokens: Vec<Token> = text
//!             .split_whitespace()
//!             .enumerate()
//!             .map(|(i, word)| Token::new(word, i))
//!             .collect();
//!         Ok(Box::new(tokens.into_iter()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "whitespace"
//!     }
//! }
//!
//! assert_eq!(Whitespace.terms("sweat test").unwrap(), vec!["sweat", "test"]);
//! ```

use crate::analysis::token::{TokenStream, terms};
use crate::error::Result;

pub trait Analyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    fn name(&self) -> &'static str;

    /// Texts of the tokens that survive analysis, in order.
    fn terms(&self, text: &str) -> Result<Vec<String>> {
        Ok(terms(self.analyze(text)?))
    }
}
