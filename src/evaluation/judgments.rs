//! Relevance judgments grouped per query.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::collection::RelevanceJudgment;
use crate::collection::query::read_judgments;
use crate::error::Result;

/// Votes per judged document, per query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Judgments {
    votes: BTreeMap<u32, BTreeMap<u32, u32>>,
}

impl Judgments {
    /// Group judgments by query. A document judged twice for the same query
    /// keeps its highest vote count.
    pub fn new(judgments: &[RelevanceJudgment]) -> Self {
        let mut votes: BTreeMap<u32, BTreeMap<u32, u32>> = BTreeMap::new();
        for judgment in judgments {
            let entry = votes
                .entry(judgment.query)
                .or_default()
                .entry(judgment.document)
                .or_insert(0);
            *entry = (*entry).max(judgment.votes);
        }
        Judgments { votes }
    }

    /// Load an `expected.csv` table.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(&read_judgments(path)?))
    }

    /// Every judged query, ascending.
    pub fn queries(&self) -> impl Iterator<Item = u32> + '_ {
        self.votes.keys().copied()
    }

    /// Documents with at least one vote for `query`.
    pub fn relevant(&self, query: u32) -> BTreeSet<u32> {
        self.votes
            .get(&query)
            .map(|docs| {
                docs.iter()
                    .filter(|&(_, &votes)| votes > 0)
                    .map(|(&doc, _)| doc)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Votes of `document` for `query`, zero when unjudged.
    pub fn votes(&self, query: u32, document: u32) -> u32 {
        self.votes
            .get(&query)
            .and_then(|docs| docs.get(&document))
            .copied()
            .unwrap_or(0)
    }

    /// Vote counts of every judged document of `query`.
    pub fn grades(&self, query: u32) -> Vec<u32> {
        self.votes
            .get(&query)
            .map(|docs| docs.values().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judgment(query: u32, document: u32, votes: u32) -> RelevanceJudgment {
        RelevanceJudgment { query, document, votes }
    }

    #[test]
    fn test_grouping() {
        let judgments = Judgments::new(&[
            judgment(2, 10, 3),
            judgment(1, 5, 0),
            judgment(1, 7, 2),
            judgment(1, 7, 4),
        ]);

        assert_eq!(judgments.queries().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(judgments.relevant(1).into_iter().collect::<Vec<_>>(), vec![7]);
        assert_eq!(judgments.votes(1, 7), 4);
        assert_eq!(judgments.votes(1, 99), 0);
        assert_eq!(judgments.grades(1), vec![0, 4]);
        assert!(judgments.relevant(3).is_empty());
    }
}
