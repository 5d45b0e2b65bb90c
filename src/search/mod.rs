//! Vector space search over the term-document model.

pub mod engine;
pub mod results;

pub use engine::SearchEngine;
pub use results::{QueryResult, RankedDocument};
