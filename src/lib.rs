//! # lexeval
//!
//! Measures how Porter stemming affects a tf-idf vector space retrieval
//! model on the Cystic Fibrosis test collection.
//!
//! ## Stages
//!
//! - Query processing: query XML to `queries.csv` and `expected.csv`
//! - Inverted list generation over the record XML files
//! - tf-idf model construction
//! - Cosine-similarity search for every query
//! - Evaluation and a markdown report comparing both variants
//!
//! Each stage runs once without stemming and once with it; see
//! [`pipeline`] for the files that connect them.

pub mod analysis;
pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod index;
pub mod pipeline;
pub mod report;
pub mod search;
pub mod table;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
