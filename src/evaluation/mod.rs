//! Retrieval effectiveness against the experts' judgments.
//!
//! | Metric | Description |
//! |--------|-------------|
//! | 11-point curve | Interpolated precision at recall 0.0, 0.1, …, 1.0 |
//! | P@5, P@10 | Fraction of the top k that is relevant |
//! | F1 | Harmonic mean of precision and recall over the full ranking |
//! | R-Precision | Precision at rank R, R being the number of relevant documents |
//! | MAP | Mean of average precision |
//! | MRR | Mean of the reciprocal rank of the first relevant document |
//! | DCG@10, nDCG@10 | Graded gain `2^votes − 1`, discount `log2(i + 1)` |
//!
//! Means are taken over the queries that have at least one relevant document.

pub mod judgments;
pub mod metrics;

pub use judgments::Judgments;
pub use metrics::{QueryMetrics, RECALL_LEVELS, RunMetrics};
