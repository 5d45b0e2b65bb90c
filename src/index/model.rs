//! tf-idf term-document model.
//!
//! For `N` documents in the inverted list, a term occurring in `n_t` of them
//! and `f` times in document `d` has weight
//!
//! ```text
//! w(t, d) = (1 + ln f) · ln(N / n_t)     (0 when f = 0)
//! ```
//!
//! Only non-zero weights are kept. A term present in every document has an
//! idf of zero and therefore no stored weights, but it stays in the model.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{LexevalError, Result};
use crate::index::inverted_list::InvertedList;

/// tf-idf weight of a term occurring `frequency` times in a document.
///
/// ```
/// use lexeval::index::tf_idf;
///
/// assert_eq!(tf_idf(0, 10, 2), 0.0);
/// assert!((tf_idf(1, 10, 5) - 2f64.ln()).abs() < 1e-12);
/// ```
pub fn tf_idf(frequency: usize, total_documents: usize, documents_with_term: usize) -> f64 {
    if frequency == 0 || documents_with_term == 0 {
        return 0.0;
    }
    (1.0 + (frequency as f64).ln()) * idf(total_documents, documents_with_term)
}

fn idf(total_documents: usize, documents_with_term: usize) -> f64 {
    (total_documents as f64 / documents_with_term as f64).ln()
}

/// Per-term statistics stored in the model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TermWeights {
    /// `ln(N / n_t)`.
    pub idf: f64,
    /// Non-zero weight per record number.
    pub weights: BTreeMap<u32, f64>,
}

/// The weighted term-document matrix, stored sparsely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TermDocumentModel {
    /// Distinct documents in the inverted list the model was built from.
    pub document_count: usize,
    pub terms: BTreeMap<String, TermWeights>,
}

impl TermDocumentModel {
    pub fn from_inverted_list(list: &InvertedList) -> Self {
        let document_count = list.documents().len();
        let mut terms = BTreeMap::new();

        for (term, occurrences) in list.iter() {
            let mut frequencies: BTreeMap<u32, usize> = BTreeMap::new();
            for &record in occurrences {
                *frequencies.entry(record).or_insert(0) += 1;
            }

            let documents_with_term = frequencies.len();
            let weights = frequencies
                .into_iter()
                .map(|(record, f)| (record, tf_idf(f, document_count, documents_with_term)))
                .filter(|&(_, weight)| weight != 0.0)
                .collect();

            terms.insert(
                term.to_string(),
                TermWeights {
                    idf: idf(document_count, documents_with_term),
                    weights,
                },
            );
        }

        debug!(
            "Built model with {} terms over {} documents",
            terms.len(),
            document_count
        );

        TermDocumentModel {
            document_count,
            terms,
        }
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.terms.get(term).map(|t| t.idf)
    }

    /// Weight of `term` in `document`, zero when absent.
    pub fn weight(&self, term: &str, document: u32) -> f64 {
        self.terms
            .get(term)
            .and_then(|t| t.weights.get(&document))
            .copied()
            .unwrap_or(0.0)
    }

    /// Euclidean norm of every document vector.
    pub fn document_norms(&self) -> HashMap<u32, f64> {
        let mut squares: HashMap<u32, f64> = HashMap::new();
        for weights in self.terms.values() {
            for (&document, &weight) in &weights.weights {
                *squares.entry(document).or_insert(0.0) += weight * weight;
            }
        }
        squares
            .into_iter()
            .map(|(document, sum)| (document, sum.sqrt()))
            .collect()
    }

    /// Persist the model as JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            LexevalError::index(format!("Cannot open model '{}': {e}", path.display()))
        })?;
        let model = serde_json::from_reader(BufReader::new(file))?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn sample_list() -> InvertedList {
        let mut list = InvertedList::new();
        // Four documents: 1, 2, 3, 4
        for (term, records) in [
            ("mucus", vec![1, 1, 1, 2]),
            ("sputum", vec![3]),
            ("patient", vec![1, 2, 3, 4]),
        ] {
            for record in records {
                list.add(term, record);
            }
        }
        list
    }

    #[test]
    fn test_weights() {
        let model = TermDocumentModel::from_inverted_list(&sample_list());

        assert_eq!(model.document_count, 4);
        assert_eq!(model.len(), 3);

        let idf_mucus = 2f64.ln();
        assert!(approx(model.idf("mucus").unwrap(), idf_mucus));
        assert!(approx(model.weight("mucus", 1), (1.0 + 3f64.ln()) * idf_mucus));
        assert!(approx(model.weight("mucus", 2), idf_mucus));
        assert_eq!(model.weight("mucus", 3), 0.0);
        assert!(approx(model.weight("sputum", 3), 4f64.ln()));
    }

    #[test]
    fn test_term_in_every_document_has_no_weights() {
        let model = TermDocumentModel::from_inverted_list(&sample_list());

        assert_eq!(model.idf("patient"), Some(0.0));
        assert!(model.terms["patient"].weights.is_empty());
        assert_eq!(model.idf("unknown"), None);
    }

    #[test]
    fn test_document_norms() {
        let model = TermDocumentModel::from_inverted_list(&sample_list());
        let norms = model.document_norms();

        assert!(approx(norms[&3], 4f64.ln()));
        assert!(approx(norms[&2], 2f64.ln()));
        assert!(!norms.contains_key(&4));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out/model.json");
        let model = TermDocumentModel::from_inverted_list(&sample_list());

        model.save(&path).unwrap();
        let loaded = TermDocumentModel::load(&path).unwrap();

        assert_eq!(loaded.document_count, model.document_count);
        assert_eq!(loaded.terms.keys().collect::<Vec<_>>(), model.terms.keys().collect::<Vec<_>>());
        assert!(approx(loaded.weight("mucus", 1), model.weight("mucus", 1)));
    }

    #[test]
    fn test_empty_list() {
        let model = TermDocumentModel::from_inverted_list(&InvertedList::new());
        assert!(model.is_empty());
        assert_eq!(model.document_count, 0);
        assert!(model.document_norms().is_empty());
    }
}
