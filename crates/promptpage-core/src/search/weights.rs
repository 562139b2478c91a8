//! Scoring constants for the resolver
//!
//! The defaults are empirically tuned against real lookups and are kept for
//! compatibility. They can be overridden from `[search.scoring]` in the config.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringWeights {
    /// Normalized name equals normalized query
    pub exact_name: u32,
    /// Name starts with query
    pub prefix_name: u32,
    /// Name contains query
    pub substring_name: u32,
    /// Query is a scattered subsequence of the name, before penalties
    pub subsequence_base: u32,
    /// Per extra character between first and last matched character
    pub span_penalty: u32,
    /// Per character before the first match
    pub offset_penalty: u32,
    pub exact_code: u32,
    pub prefix_code: u32,
    pub substring_code: u32,
    /// Added when both name and code match
    pub dual_match_bonus: u32,
    /// Added to every CN instrument, breaks ties toward the home market
    pub home_market_bonus: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_name: 1200,
            prefix_name: 1020,
            substring_name: 860,
            subsequence_base: 760,
            span_penalty: 18,
            offset_penalty: 8,
            exact_code: 760,
            prefix_code: 620,
            substring_code: 460,
            dual_match_bonus: 40,
            home_market_bonus: 1,
        }
    }
}
