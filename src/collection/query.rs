//! Queries and relevance judgments.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table;

/// A processed query as stored in `queries.csv`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "QueryNumber")]
    pub number: u32,
    #[serde(rename = "QueryText")]
    pub text: String,
}

impl Query {
    pub fn new<S: Into<String>>(number: u32, text: S) -> Self {
        Query {
            number,
            text: text.into(),
        }
    }
}

/// How many experts judged a document relevant to a query, as stored in
/// `expected.csv`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceJudgment {
    #[serde(rename = "QueryNumber")]
    pub query: u32,
    #[serde(rename = "DocNumber")]
    pub document: u32,
    #[serde(rename = "DocVotes")]
    pub votes: u32,
}

impl RelevanceJudgment {
    /// A document counts as relevant when at least one expert voted for it.
    pub fn is_relevant(&self) -> bool {
        self.votes > 0
    }
}

/// A `<QUERY>` element: the query itself and its judged documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTopic {
    pub query: Query,
    pub judgments: Vec<RelevanceJudgment>,
}

/// Number of experts that gave a non-zero score.
///
/// Each character of the `score` attribute is one expert's grade, so
/// `"2212"` yields 4 and `"0010"` yields 1. Non-digit characters are ignored.
pub fn votes_from_score(score: &str) -> u32 {
    score
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter(|&grade| grade > 0)
        .count() as u32
}

/// Write `QueryNumber;QueryText` rows.
pub fn write_queries(path: &Path, queries: &[Query]) -> Result<usize> {
    table::write_rows(path, queries)
}

pub fn read_queries_table(path: &Path) -> Result<Vec<Query>> {
    table::read_rows(path)
}

/// Write `QueryNumber;DocNumber;DocVotes` rows.
pub fn write_judgments(path: &Path, judgments: &[RelevanceJudgment]) -> Result<usize> {
    table::write_rows(path, judgments)
}

pub fn read_judgments(path: &Path) -> Result<Vec<RelevanceJudgment>> {
    table::read_rows(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_votes_from_score() {
        assert_eq!(votes_from_score("2212"), 4);
        assert_eq!(votes_from_score("0010"), 1);
        assert_eq!(votes_from_score("0000"), 0);
        assert_eq!(votes_from_score(""), 0);
    }

    #[test]
    fn test_queries_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("queries.csv");
        let queries = vec![
            Query::new(1, "What are the effects of calcium on the physical properties of mucus?"),
            Query::new(2, "Can one distinguish between the effects of mucus hypersecretion?"),
        ];

        write_queries(&path, &queries).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("QueryNumber;QueryText\n"));

        assert_eq!(read_queries_table(&path).unwrap(), queries);
    }

    #[test]
    fn test_judgments_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("expected.csv");
        let judgments = vec![
            RelevanceJudgment { query: 1, document: 139, votes: 4 },
            RelevanceJudgment { query: 1, document: 151, votes: 0 },
        ];

        write_judgments(&path, &judgments).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "QueryNumber;DocNumber;DocVotes\n1;139;4\n1;151;0\n"
        );

        let back = read_judgments(&path).unwrap();
        assert_eq!(back, judgments);
        assert!(back[0].is_relevant());
        assert!(!back[1].is_relevant());
    }
}
