//! Renders the comparison of the plain and stemmed runs.
//!
//! The output depends only on the judgments and the two result sets, so the
//! same inputs always produce byte-identical markdown.

use std::fmt;

use crate::analysis::Variant;
use crate::evaluation::{Judgments, RECALL_LEVELS, RunMetrics};
use crate::search::QueryResult;

/// Evaluated runs of both variants.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub plain: RunMetrics,
    pub stemmed: RunMetrics,
}

impl Comparison {
    pub fn new(
        judgments: &Judgments,
        plain_results: &[QueryResult],
        stemmed_results: &[QueryResult],
    ) -> Self {
        Comparison {
            plain: RunMetrics::evaluate(Variant::Plain, plain_results, judgments),
            stemmed: RunMetrics::evaluate(Variant::Stemmed, stemmed_results, judgments),
        }
    }

    /// Summary rows: metric name, plain value, stemmed value.
    pub fn summary(&self) -> Vec<(&'static str, f64, f64)> {
        let row = |name, metric: fn(&RunMetrics) -> f64| {
            (name, metric(&self.plain), metric(&self.stemmed))
        };
        vec![
            row("MAP", RunMetrics::mean_average_precision),
            row("MRR", RunMetrics::mean_reciprocal_rank),
            row("Precision@5", RunMetrics::precision_at_5),
            row("Precision@10", RunMetrics::precision_at_10),
            row("R-Precision", RunMetrics::r_precision),
            row("F1", RunMetrics::f1),
            row("DCG@10", RunMetrics::dcg_at_10),
            row("nDCG@10", RunMetrics::ndcg_at_10),
        ]
    }

    /// R-Precision per query for both runs.
    pub fn r_precision_by_query(&self) -> Vec<(u32, f64, f64)> {
        self.plain
            .queries
            .iter()
            .map(|plain| {
                let stemmed = self
                    .stemmed
                    .query(plain.query)
                    .map_or(0.0, |q| q.r_precision);
                (plain.query, plain.r_precision, stemmed)
            })
            .collect()
    }
}

fn value(x: f64) -> String {
    format!("{x:.4}")
}

fn difference(x: f64) -> String {
    let rounded = format!("{x:+.4}");
    // Avoid "-0.0000" for tiny negative differences
    if rounded == "-0.0000" {
        "+0.0000".to_string()
    } else {
        rounded
    }
}

/// Render the full report.
pub fn render(comparison: &Comparison) -> String {
    comparison.to_string()
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = Variant::Plain.label();
        let stemmed = Variant::Stemmed.label();

        writeln!(f, "# Retrieval evaluation report")?;
        writeln!(f)?;
        writeln!(
            f,
            "Vector space model with tf-idf weights and cosine similarity, evaluated \
             on {} queries with at least one relevant document. Differences are \
             stemmed minus plain.",
            self.plain.queries.len()
        )?;
        writeln!(f)?;

        writeln!(f, "## Summary")?;
        writeln!(f)?;
        writeln!(f, "| Metric | {plain} | {stemmed} | Difference |")?;
        writeln!(f, "|---|---:|---:|---:|")?;
        for (name, p, s) in self.summary() {
            writeln!(
                f,
                "| {name} | {} | {} | {} |",
                value(p),
                value(s),
                difference(s - p)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "## 11-point interpolated precision")?;
        writeln!(f)?;
        writeln!(f, "| Recall | {plain} | {stemmed} |")?;
        writeln!(f, "|---:|---:|---:|")?;
        let plain_curve = self.plain.interpolated_precision();
        let stemmed_curve = self.stemmed.interpolated_precision();
        for (i, level) in RECALL_LEVELS.iter().enumerate() {
            writeln!(
                f,
                "| {level:.1} | {} | {} |",
                value(plain_curve[i]),
                value(stemmed_curve[i])
            )?;
        }
        writeln!(f)?;

        writeln!(f, "## R-Precision by query")?;
        writeln!(f)?;
        writeln!(f, "| Query | {plain} | {stemmed} | Difference |")?;
        writeln!(f, "|---:|---:|---:|---:|")?;
        for (query, p, s) in self.r_precision_by_query() {
            writeln!(
                f,
                "| {query} | {} | {} | {} |",
                value(p),
                value(s),
                difference(s - p)
            )?;
        }

        Ok(())
    }
}
