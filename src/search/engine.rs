//! Cosine-similarity ranking.
//!
//! Query terms are weighted like document terms, `(1 + ln tf) · idf`, and
//! documents are ranked by
//!
//! ```text
//! score(q, d) = Σ_t w(t, q) · w(t, d) / (|q| · |d|)
//! ```
//!
//! where `|d|` is the norm of the whole document vector. Terms missing from
//! the model are ignored.

use std::collections::{BTreeMap, HashMap};

use crate::index::TermDocumentModel;
use crate::search::results::RankedDocument;

/// Ranks documents of a [`TermDocumentModel`] against analyzed queries.
#[derive(Debug)]
pub struct SearchEngine {
    model: TermDocumentModel,
    norms: HashMap<u32, f64>,
}

impl SearchEngine {
    pub fn new(model: TermDocumentModel) -> Self {
        let norms = model.document_norms();
        SearchEngine { model, norms }
    }

    pub fn model(&self) -> &TermDocumentModel {
        &self.model
    }

    /// Query term weights for the terms known to the model.
    ///
    /// Query terms take their idf from the document model, so query and
    /// document vectors share one weighting.
    pub fn query_weights<'a>(&self, terms: &'a [String]) -> BTreeMap<&'a str, f64> {
        let mut frequencies: BTreeMap<&str, usize> = BTreeMap::new();
        for term in terms {
            *frequencies.entry(term.as_str()).or_insert(0) += 1;
        }

        frequencies
            .into_iter()
            .filter_map(|(term, tf)| {
                let idf = self.model.idf(term)?;
                Some((term, (1.0 + (tf as f64).ln()) * idf))
            })
            .filter(|&(_, weight)| weight != 0.0)
            .collect()
    }

    /// Rank documents for the analyzed query `terms`.
    ///
    /// Only documents with a positive score are returned, best first, ties
    /// broken by ascending document number, at most `top_k` of them.
    pub fn search(&self, terms: &[String], top_k: usize) -> Vec<RankedDocument> {
        let query = self.query_weights(terms);
        let query_norm = query.values().map(|w| w * w).sum::<f64>().sqrt();
        if query_norm == 0.0 {
            return Vec::new();
        }

        let mut dot: HashMap<u32, f64> = HashMap::new();
        for (term, query_weight) in &query {
            if let Some(entry) = self.model.terms.get(*term) {
                for (&document, &weight) in &entry.weights {
                    *dot.entry(document).or_insert(0.0) += query_weight * weight;
                }
            }
        }

        let mut scored: Vec<(u32, f64)> = dot
            .into_iter()
            .filter_map(|(document, product)| {
                let norm = self.norms.get(&document).copied().unwrap_or(0.0);
                if norm == 0.0 {
                    return None;
                }
                let score = product / (query_norm * norm);
                (score > 0.0).then_some((document, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(top_k);

        scored
            .into_iter()
            .enumerate()
            .map(|(i, (document, score))| RankedDocument {
                rank: i + 1,
                document,
                score,
            })
            .collect()
    }
}
