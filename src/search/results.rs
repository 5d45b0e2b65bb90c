//! Ranked results and the `QueryNumber;Results` table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LexevalError, Result};
use crate::table;

/// One entry of a ranking.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(usize, u32, f64)", into = "(usize, u32, f64)")]
pub struct RankedDocument {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub document: u32,
    pub score: f64,
}

impl From<(usize, u32, f64)> for RankedDocument {
    fn from((rank, document, score): (usize, u32, f64)) -> Self {
        RankedDocument {
            rank,
            document,
            score,
        }
    }
}

impl From<RankedDocument> for (usize, u32, f64) {
    fn from(ranked: RankedDocument) -> Self {
        (ranked.rank, ranked.document, ranked.score)
    }
}

/// The ranking produced for one query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryResult {
    pub query: u32,
    pub documents: Vec<RankedDocument>,
}

impl QueryResult {
    pub fn new(query: u32, documents: Vec<RankedDocument>) -> Self {
        QueryResult { query, documents }
    }

    /// Document numbers in rank order.
    pub fn ranking(&self) -> Vec<u32> {
        self.documents.iter().map(|d| d.document).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ResultRow {
    #[serde(rename = "QueryNumber")]
    query: u32,
    /// JSON array of `[rank, document, score]`.
    #[serde(rename = "Results")]
    results: String,
}

/// Write one `QueryNumber;Results` row per query.
pub fn write_results(path: &Path, results: &[QueryResult]) -> Result<usize> {
    let rows = results
        .iter()
        .map(|result| {
            Ok(ResultRow {
                query: result.query,
                results: serde_json::to_string(&result.documents)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    table::write_rows(path, rows)
}

/// Read a results table, checking that every ranking is numbered 1, 2, 3…
pub fn read_results(path: &Path) -> Result<Vec<QueryResult>> {
    table::read_rows::<ResultRow>(path)?
        .into_iter()
        .map(|row| {
            let documents: Vec<RankedDocument> =
                serde_json::from_str(&row.results).map_err(|e| {
                    LexevalError::search(format!(
                        "Invalid results for query {} in '{}': {e}",
                        row.query,
                        path.display()
                    ))
                })?;

            if let Some((position, _)) = documents
                .iter()
                .enumerate()
                .find(|(i, d)| d.rank != i + 1)
            {
                return Err(LexevalError::search(format!(
                    "Query {} in '{}' has rank {} at position {}",
                    row.query,
                    path.display(),
                    documents[position].rank,
                    position + 1
                )));
            }

            Ok(QueryResult::new(row.query, documents))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        let results = vec![
            QueryResult::new(
                1,
                vec![
                    RankedDocument::from((1, 139, 0.5)),
                    RankedDocument::from((2, 151, 0.25)),
                ],
            ),
            QueryResult::new(2, Vec::new()),
        ];

        write_results(&path, &results).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "QueryNumber;Results\n1;[[1,139,0.5],[2,151,0.25]]\n2;[]\n"
        );

        let back = read_results(&path).unwrap();
        assert_eq!(back, results);
        assert_eq!(back[0].ranking(), vec![139, 151]);
    }

    #[test]
    fn test_out_of_order_ranks_are_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(&path, "QueryNumber;Results\n1;[[2,139,0.5]]\n").unwrap();

        let err = read_results(&path).unwrap_err();
        assert!(err.to_string().contains("rank 2"));
    }
}
