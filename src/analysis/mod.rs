//! Text analysis for documents and queries.
//!
//! Raw text flows through char filters, a tokenizer and a chain of token
//! filters before its terms reach the inverted list or a query vector:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Token Filters → Terms
//! ```
//!
//! The [`CollectionAnalyzer`](analyzer::collection::CollectionAnalyzer) wires
//! the pipeline used by the evaluation for both analysis variants.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, CollectionAnalyzer, PipelineAnalyzer, Variant};
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, Stemmer};
pub use tokenizer::Tokenizer;
