//! Term → occurrence list.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::CollectionAnalyzer;
use crate::collection::Record;
use crate::error::{LexevalError, Result};
use crate::table;

#[derive(Debug, Serialize, Deserialize)]
struct InvertedListRow {
    #[serde(rename = "Word")]
    word: String,
    /// JSON array of record numbers.
    #[serde(rename = "RecordNumbers")]
    records: String,
}

/// Every term of the collection with one record number per occurrence.
///
/// A term that appears three times in record 12 lists `12` three times, so
/// the raw term frequency survives in the list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InvertedList {
    postings: BTreeMap<String, Vec<u32>>,
}

impl InvertedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze every record and collect its term occurrences.
    pub fn build(records: &[Record], analyzer: &CollectionAnalyzer) -> Result<Self> {
        let mut list = Self::new();
        for record in records {
            for term in analyzer.terms(&record.text)? {
                list.add(term, record.number);
            }
        }
        debug!(
            "Built inverted list with {} terms from {} records ({})",
            list.len(),
            records.len(),
            analyzer.variant()
        );
        Ok(list)
    }

    /// Record one occurrence of `term` in `record`.
    pub fn add<S: Into<String>>(&mut self, term: S, record: u32) {
        self.postings.entry(term.into()).or_default().push(record);
    }

    /// Occurrences of `term`, in insertion order.
    pub fn get(&self, term: &str) -> Option<&[u32]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Terms with their occurrence lists, in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.postings
            .iter()
            .map(|(term, records)| (term.as_str(), records.as_slice()))
    }

    /// Distinct record numbers appearing anywhere in the list.
    pub fn documents(&self) -> BTreeSet<u32> {
        self.postings.values().flatten().copied().collect()
    }

    /// Terms ordered by occurrence count, most frequent first; ties by term.
    pub fn by_frequency(&self) -> Vec<(&str, &[u32])> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Write `Word;RecordNumbers` rows in frequency order.
    pub fn write(&self, path: &Path) -> Result<usize> {
        let rows = self
            .by_frequency()
            .into_iter()
            .map(|(word, records)| {
                Ok(InvertedListRow {
                    word: word.to_string(),
                    records: serde_json::to_string(records)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        table::write_rows(path, rows)
    }

    pub fn read(path: &Path) -> Result<Self> {
        let mut list = Self::new();
        for row in table::read_rows::<InvertedListRow>(path)? {
            let records: Vec<u32> = serde_json::from_str(&row.records).map_err(|e| {
                LexevalError::index(format!(
                    "Invalid record list for '{}' in '{}': {e}",
                    row.word,
                    path.display()
                ))
            })?;
            if list.postings.insert(row.word.clone(), records).is_some() {
                return Err(LexevalError::index(format!(
                    "Duplicate word '{}' in '{}'",
                    row.word,
                    path.display()
                )));
            }
        }
        Ok(list)
    }
}
