//! Per-query and per-run effectiveness metrics.
//!
//! Rankings are slices of document numbers, best first. Binary metrics treat
//! a document as relevant when it has at least one vote; DCG uses the votes
//! as graded relevance.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::analysis::Variant;
use crate::evaluation::judgments::Judgments;
use crate::search::QueryResult;

/// Recall levels of the 11-point interpolated precision curve.
pub const RECALL_LEVELS: [f64; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

/// Cutoff used for DCG and nDCG.
pub const DCG_CUTOFF: usize = 10;

fn hits(ranking: &[u32], relevant: &BTreeSet<u32>, k: usize) -> usize {
    ranking.iter().take(k).filter(|d| relevant.contains(d)).count()
}

/// Fraction of the first `k` positions holding a relevant document.
///
/// The denominator is always `k`, so a ranking shorter than `k` is
/// penalized for its missing positions.
pub fn precision_at(ranking: &[u32], relevant: &BTreeSet<u32>, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    hits(ranking, relevant, k) as f64 / k as f64
}

/// Fraction of the relevant documents found in the first `k` positions.
pub fn recall_at(ranking: &[u32], relevant: &BTreeSet<u32>, k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    hits(ranking, relevant, k) as f64 / relevant.len() as f64
}

/// F1 of precision and recall over the whole ranking.
pub fn f1(ranking: &[u32], relevant: &BTreeSet<u32>) -> f64 {
    let precision = precision_at(ranking, relevant, ranking.len());
    let recall = recall_at(ranking, relevant, ranking.len());
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Precision at rank R, where R is the number of relevant documents.
pub fn r_precision(ranking: &[u32], relevant: &BTreeSet<u32>) -> f64 {
    precision_at(ranking, relevant, relevant.len())
}

/// Mean of the precision at each relevant position, over all relevant
/// documents (missing ones contribute zero).
pub fn average_precision(ranking: &[u32], relevant: &BTreeSet<u32>) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }

    let mut found = 0;
    let mut precision_sum = 0.0;
    for (i, document) in ranking.iter().enumerate() {
        if relevant.contains(document) {
            found += 1;
            precision_sum += found as f64 / (i + 1) as f64;
        }
    }

    precision_sum / relevant.len() as f64
}

/// `1 / rank` of the first relevant document, zero when none is retrieved.
pub fn reciprocal_rank(ranking: &[u32], relevant: &BTreeSet<u32>) -> f64 {
    ranking
        .iter()
        .position(|d| relevant.contains(d))
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}

/// Interpolated precision at each of the [`RECALL_LEVELS`].
///
/// The interpolated precision at recall `r` is the highest precision
/// observed at any rank whose recall is at least `r`.
pub fn interpolated_precision(ranking: &[u32], relevant: &BTreeSet<u32>) -> [f64; 11] {
    let mut curve = [0.0; 11];
    if relevant.is_empty() {
        return curve;
    }

    let mut points = Vec::new();
    let mut found = 0;
    for (i, document) in ranking.iter().enumerate() {
        if relevant.contains(document) {
            found += 1;
            let recall = found as f64 / relevant.len() as f64;
            let precision = found as f64 / (i + 1) as f64;
            points.push((recall, precision));
        }
    }

    for (level, value) in RECALL_LEVELS.iter().zip(curve.iter_mut()) {
        *value = points
            .iter()
            // Small tolerance so that e.g. 3/10 counts as reaching 0.3
            .filter(|(recall, _)| *recall + 1e-9 >= *level)
            .map(|&(_, precision)| precision)
            .fold(0.0, f64::max);
    }

    curve
}

#[inline]
fn gain(votes: u32) -> f64 {
    2f64.powi(votes as i32) - 1.0
}

/// Discount for a 1-based position.
#[inline]
fn discount(position: usize) -> f64 {
    (position as f64 + 1.0).log2()
}

/// Discounted cumulative gain of the first `k` positions.
pub fn dcg_at(ranking: &[u32], votes: impl Fn(u32) -> u32, k: usize) -> f64 {
    ranking
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, &document)| gain(votes(document)) / discount(i + 1))
        .sum()
}

/// DCG normalized by the DCG of the ideal ordering of `grades`.
///
/// Zero when no judged document has a vote.
pub fn ndcg_at(ranking: &[u32], votes: impl Fn(u32) -> u32, grades: &[u32], k: usize) -> f64 {
    let mut ideal = grades.to_vec();
    ideal.sort_unstable_by(|a, b| b.cmp(a));
    let idcg: f64 = ideal
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, &v)| gain(v) / discount(i + 1))
        .sum();

    if idcg == 0.0 {
        0.0
    } else {
        dcg_at(ranking, votes, k) / idcg
    }
}

/// Every metric for one query.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryMetrics {
    pub query: u32,
    pub relevant: usize,
    pub retrieved: usize,
    pub precision_at_5: f64,
    pub precision_at_10: f64,
    pub f1: f64,
    pub r_precision: f64,
    pub average_precision: f64,
    pub reciprocal_rank: f64,
    pub dcg_at_10: f64,
    pub ndcg_at_10: f64,
    pub interpolated_precision: [f64; 11],
}

impl QueryMetrics {
    pub fn compute(query: u32, ranking: &[u32], judgments: &Judgments) -> Self {
        let relevant = judgments.relevant(query);
        let votes = |document: u32| judgments.votes(query, document);

        QueryMetrics {
            query,
            relevant: relevant.len(),
            retrieved: ranking.len(),
            precision_at_5: precision_at(ranking, &relevant, 5),
            precision_at_10: precision_at(ranking, &relevant, 10),
            f1: f1(ranking, &relevant),
            r_precision: r_precision(ranking, &relevant),
            average_precision: average_precision(ranking, &relevant),
            reciprocal_rank: reciprocal_rank(ranking, &relevant),
            dcg_at_10: dcg_at(ranking, votes, DCG_CUTOFF),
            ndcg_at_10: ndcg_at(ranking, votes, &judgments.grades(query), DCG_CUTOFF),
            interpolated_precision: interpolated_precision(ranking, &relevant),
        }
    }
}

/// Metrics of one variant's results, per query and averaged.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunMetrics {
    pub variant: Variant,
    /// Evaluated queries, ascending by number.
    pub queries: Vec<QueryMetrics>,
}

impl RunMetrics {
    /// Evaluate every judged query that has a relevant document. A query
    /// missing from `results` counts as an empty ranking; results for
    /// queries without relevant documents are ignored.
    pub fn evaluate(variant: Variant, results: &[QueryResult], judgments: &Judgments) -> Self {
        let rankings: BTreeMap<u32, Vec<u32>> = results
            .iter()
            .map(|result| (result.query, result.ranking()))
            .collect();

        let queries = judgments
            .queries()
            .filter(|&query| !judgments.relevant(query).is_empty())
            .map(|query| {
                let ranking = rankings.get(&query).map(Vec::as_slice).unwrap_or_default();
                QueryMetrics::compute(query, ranking, judgments)
            })
            .collect();

        RunMetrics { variant, queries }
    }

    fn mean(&self, metric: impl Fn(&QueryMetrics) -> f64) -> f64 {
        if self.queries.is_empty() {
            return 0.0;
        }
        self.queries.iter().map(metric).sum::<f64>() / self.queries.len() as f64
    }

    pub fn mean_average_precision(&self) -> f64 {
        self.mean(|q| q.average_precision)
    }

    pub fn mean_reciprocal_rank(&self) -> f64 {
        self.mean(|q| q.reciprocal_rank)
    }

    pub fn precision_at_5(&self) -> f64 {
        self.mean(|q| q.precision_at_5)
    }

    pub fn precision_at_10(&self) -> f64 {
        self.mean(|q| q.precision_at_10)
    }

    pub fn f1(&self) -> f64 {
        self.mean(|q| q.f1)
    }

    pub fn r_precision(&self) -> f64 {
        self.mean(|q| q.r_precision)
    }

    pub fn dcg_at_10(&self) -> f64 {
        self.mean(|q| q.dcg_at_10)
    }

    pub fn ndcg_at_10(&self) -> f64 {
        self.mean(|q| q.ndcg_at_10)
    }

    /// Mean interpolated precision at each recall level.
    pub fn interpolated_precision(&self) -> [f64; 11] {
        let mut curve = [0.0; 11];
        for (i, value) in curve.iter_mut().enumerate() {
            *value = self.mean(|q| q.interpolated_precision[i]);
        }
        curve
    }

    pub fn query(&self, query: u32) -> Option<&QueryMetrics> {
        self.queries.iter().find(|q| q.query == query)
    }
}
