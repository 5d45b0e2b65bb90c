//! The Cystic Fibrosis test collection.
//!
//! Record files hold the documents (`<RECORD>` elements) and the query file
//! holds the information needs together with the experts' relevance scores
//! (`<QUERY>` elements). Both are parsed with a streaming XML reader.

pub mod query;
pub mod record;
pub mod xml;

pub use query::{Query, QueryTopic, RelevanceJudgment};
pub use record::Record;
pub use xml::{parse_queries, parse_records, read_queries, read_records};

/// Collapse every whitespace run to a single space and trim the ends.
///
/// ```
/// use lexeval::collection::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  cystic\n   fibrosis\t"), "cystic fibrosis");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
