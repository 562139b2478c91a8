//! Fuzzy instrument lookup
//!
//! Every catalog item is scored independently against the query by name (on
//! [`free_text_key`](crate::normalize::free_text_key) forms) and by code (on
//! [`code_key`](crate::normalize::code_key) forms against per-market code
//! spellings). Items with a positive score are ranked by score, then by name in
//! Chinese collation order, then by code, then by market, so equal scores are
//! ordered identically on every run regardless of catalog order.

mod collate;
mod score;
mod weights;

use serde::Serialize;

use crate::catalog::StockItem;
use score::{score_item, QueryKeys};

pub use collate::compare_names;
pub use weights::ScoringWeights;

/// Default number of results returned to a picker
pub const DEFAULT_LIMIT: usize = 8;

/// A catalog item with its positive match score
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RankedMatch<'a> {
    pub item: &'a StockItem,
    pub score: u32,
}

/// Resolver over a catalog snapshot with a fixed set of weights
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    weights: ScoringWeights,
}

impl Searcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank `catalog` against `query`, returning at most `limit` matches
    pub fn search<'a>(
        &self,
        catalog: &'a [StockItem],
        query: &str,
        limit: usize,
    ) -> Vec<RankedMatch<'a>> {
        let trimmed = query.trim();
        if trimmed.is_empty() || limit == 0 {
            return Vec::new();
        }

        let keys = QueryKeys::new(trimmed);
        let mut matches: Vec<RankedMatch<'a>> = catalog
            .iter()
            .filter_map(|item| {
                let score = score_item(item, &keys, &self.weights);
                (score > 0).then_some(RankedMatch { item, score })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| compare_names(&a.item.name, &b.item.name))
                .then_with(|| a.item.code.cmp(&b.item.code))
                .then_with(|| a.item.market.cmp(&b.item.market))
        });
        matches.truncate(limit);

        tracing::trace!("Query {:?} matched {} items", trimmed, matches.len());
        matches
    }
}

/// Rank `catalog` against `query` with the default weights
pub fn search<'a>(catalog: &'a [StockItem], query: &str, limit: usize) -> Vec<RankedMatch<'a>> {
    Searcher::default().search(catalog, query, limit)
}
