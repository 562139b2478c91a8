//! Per-item scoring

use std::collections::BTreeSet;

use super::ScoringWeights;
use crate::catalog::format::{exchange_letters, padded_digits, split_code, trim_leading_zeros};
use crate::catalog::{Market, StockItem};
use crate::normalize::{code_key, free_text_key};

/// A query reduced to both canonical forms, computed once per search
#[derive(Debug, Clone)]
pub(crate) struct QueryKeys {
    text: Vec<char>,
    code: String,
}

impl QueryKeys {
    pub fn new(query: &str) -> Self {
        Self {
            text: free_text_key(query).chars().collect(),
            code: code_key(query),
        }
    }
}

/// Greedy leftmost subsequence match of `query` in `target`
///
/// Returns `(first_index, span)` in characters, or `None` if some query
/// character cannot be placed.
pub(crate) fn subsequence(query: &[char], target: &[char]) -> Option<(usize, usize)> {
    let mut cursor = 0;
    let mut first = None;
    let mut last = 0;

    for &wanted in query {
        let offset = target[cursor..].iter().position(|&c| c == wanted)?;
        let found = cursor + offset;
        first.get_or_insert(found);
        last = found;
        cursor = found + 1;
    }

    first.map(|first| (first, last - first + 1))
}

/// Score a name against the query's free-text key
pub(crate) fn name_score(name: &str, query: &QueryKeys, weights: &ScoringWeights) -> u32 {
    let name: Vec<char> = free_text_key(name).chars().collect();
    let query = query.text.as_slice();

    if name.is_empty() || query.is_empty() {
        return 0;
    }

    if name == query {
        return weights.exact_name;
    }
    if name.starts_with(query) {
        return weights.prefix_name;
    }
    if name.windows(query.len()).any(|window| window == query) {
        return weights.substring_name;
    }

    let Some((first, span)) = subsequence(query, &name) else {
        return 0;
    };

    let gap = span.saturating_sub(query.len()) as u32;
    let penalty = gap
        .saturating_mul(weights.span_penalty)
        .saturating_add((first as u32).saturating_mul(weights.offset_penalty));

    weights.subsequence_base.saturating_sub(penalty)
}

/// Code spellings an instrument can be looked up by
///
/// Every item contributes its code reduced to `[A-Z0-9]`; markets add their own
/// conventions on top (zero padding, exchange prefixes, share-class suffixes).
pub(crate) fn code_tokens(item: &StockItem) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    let upper = item.code.trim().to_uppercase();
    let pure: String = upper
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect();

    if !pure.is_empty() {
        tokens.insert(pure);
    }

    let (left, right) = split_code(&upper);

    match item.market {
        Market::Hk => {
            let digits = padded_digits(left, 5);
            let short = trim_leading_zeros(&digits).to_string();
            tokens.insert(format!("HK{}", digits));
            tokens.insert(format!("HK{}", short));
            tokens.insert(digits);
            tokens.insert(short);
        }
        Market::Cn => {
            let digits = padded_digits(left, 6);
            let exchange = exchange_letters(right);
            if !exchange.is_empty() {
                tokens.insert(format!("{}{}", exchange, digits));
            }
            tokens.insert(digits);
        }
        Market::Us => {
            tokens.insert(upper.replace('.', ""));
            tokens.insert(left.to_string());
        }
    }

    tokens
}

/// Score an item's code tokens against the query's code key
pub(crate) fn code_score(item: &StockItem, query: &QueryKeys, weights: &ScoringWeights) -> u32 {
    let query = query.code.as_str();
    if query.is_empty() {
        return 0;
    }

    code_tokens(item)
        .iter()
        .map(|token| {
            if token == query {
                weights.exact_code
            } else if token.starts_with(query) {
                weights.prefix_code
            } else if token.contains(query) {
                weights.substring_code
            } else {
                0
            }
        })
        .max()
        .unwrap_or(0)
}

/// Combined score of one item; zero means "not a match"
pub(crate) fn score_item(item: &StockItem, query: &QueryKeys, weights: &ScoringWeights) -> u32 {
    let name = name_score(&item.name, query, weights);
    let code = code_score(item, query, weights);

    if name == 0 && code == 0 {
        return 0;
    }

    let mut score = name.max(code);
    if name > 0 && code > 0 {
        score = score.saturating_add(weights.dual_match_bonus);
    }
    if item.market == Market::Cn {
        score = score.saturating_add(weights.home_market_bonus);
    }

    score
}
