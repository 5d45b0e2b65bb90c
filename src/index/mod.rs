//! Inverted list and term-document model.
//!
//! The inverted list records, for every term, the record number of each of
//! its occurrences. The model turns those occurrence lists into tf-idf
//! weights for the vector space search.

pub mod inverted_list;
pub mod model;

pub use inverted_list::InvertedList;
pub use model::{TermDocumentModel, TermWeights, tf_idf};
