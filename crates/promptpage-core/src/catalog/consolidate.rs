//! Catalog consolidation: normalize, dedupe, and fall back per market

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Market, RawStockItem, StockItem};

/// Instrument count per market
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct MarketCounts {
    #[serde(rename = "CN")]
    pub cn: usize,
    #[serde(rename = "HK")]
    pub hk: usize,
    #[serde(rename = "US")]
    pub us: usize,
}

impl MarketCounts {
    pub fn of(items: &[StockItem]) -> Self {
        let mut counts = Self::default();
        for item in items {
            *counts.slot(item.market) += 1;
        }
        counts
    }

    pub fn get(&self, market: Market) -> usize {
        match market {
            Market::Cn => self.cn,
            Market::Hk => self.hk,
            Market::Us => self.us,
        }
    }

    fn slot(&mut self, market: Market) -> &mut usize {
        match market {
            Market::Cn => &mut self.cn,
            Market::Hk => &mut self.hk,
            Market::Us => &mut self.us,
        }
    }

    /// Markets with no instruments
    pub fn missing(&self) -> Vec<Market> {
        Market::ALL
            .into_iter()
            .filter(|market| self.get(*market) == 0)
            .collect()
    }
}

/// Result of [`build_catalog`]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CatalogBuild {
    pub items: Vec<StockItem>,
    /// Catalog consists of the fallback set only
    pub used_full_fallback: bool,
    /// Fallback entries were added for at least one empty market
    pub used_partial_fallback: bool,
    pub market_counts: MarketCounts,
}

impl CatalogBuild {
    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// Validate raw source records
///
/// Codes are uppercased and alias lists collapse into sets. Records missing a
/// code, a name, or a recognizable market are dropped.
pub fn normalize_source(items: Vec<RawStockItem>) -> Vec<StockItem> {
    let total = items.len();
    let normalized: Vec<StockItem> = items.into_iter().filter_map(normalize_one).collect();

    let dropped = total - normalized.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} of {} source records with missing fields", dropped, total);
    }

    normalized
}

fn normalize_one(raw: RawStockItem) -> Option<StockItem> {
    let code = raw.code.filter(|c| !c.is_empty())?.to_uppercase();
    let name = raw.name.filter(|n| !n.is_empty())?;
    let market = raw.market?.parse::<Market>().ok()?;

    Some(StockItem {
        code,
        name,
        market,
        aliases: raw.aliases.unwrap_or_default().into_iter().collect(),
    })
}

/// Merge entries sharing `(market, code)` and sort by that key
///
/// Aliases are unioned. The first non-empty name wins, except that a name equal
/// to the item's own code is only a placeholder and yields to a later real name.
pub fn dedupe<I>(items: I) -> Vec<StockItem>
where
    I: IntoIterator<Item = StockItem>,
{
    let mut merged: BTreeMap<(Market, String), StockItem> = BTreeMap::new();

    for item in items {
        match merged.get_mut(&(item.market, item.code.clone())) {
            Some(existing) => {
                let placeholder_name = existing.name.is_empty() || existing.name == existing.code;
                if placeholder_name && !item.name.is_empty() {
                    existing.name = item.name;
                }
                existing.aliases.extend(item.aliases);
            }
            None => {
                merged.insert((item.market, item.code.clone()), item);
            }
        }
    }

    merged.into_values().collect()
}

/// Build the catalog snapshot from base, delta, and fallback sources
///
/// Never fails: an empty merge falls back to the whole fallback set, and each
/// market left empty is supplemented from the fallback set for that market only.
pub fn build_catalog(
    base: Vec<RawStockItem>,
    delta: Vec<RawStockItem>,
    fallback: Vec<RawStockItem>,
) -> CatalogBuild {
    let fallback = normalize_source(fallback);
    let merged = dedupe(
        normalize_source(base)
            .into_iter()
            .chain(normalize_source(delta)),
    );

    if merged.is_empty() {
        let items = dedupe(fallback);
        tracing::warn!(
            "Primary catalog sources are empty, using {} fallback instruments",
            items.len()
        );
        return CatalogBuild {
            market_counts: MarketCounts::of(&items),
            items,
            used_full_fallback: true,
            used_partial_fallback: false,
        };
    }

    let missing = MarketCounts::of(&merged).missing();
    let supplement: Vec<StockItem> = fallback
        .into_iter()
        .filter(|item| missing.contains(&item.market))
        .collect();

    let used_partial_fallback = !supplement.is_empty();
    let items = if used_partial_fallback {
        tracing::info!(
            "Supplementing markets {:?} with {} fallback instruments",
            missing,
            supplement.len()
        );
        dedupe(merged.into_iter().chain(supplement))
    } else {
        merged
    };

    CatalogBuild {
        market_counts: MarketCounts::of(&items),
        items,
        used_full_fallback: false,
        used_partial_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(code: &str, name: &str, market: &str, aliases: &[&str]) -> RawStockItem {
        RawStockItem {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            market: Some(market.to_string()),
            aliases: Some(aliases.iter().map(|a| a.to_string()).collect()),
        }
    }

    #[test]
    fn test_normalize_source_uppercases_and_drops_incomplete() {
        let items = normalize_source(vec![
            raw("aapl", "Apple Inc.", "US", &["APPLE", "APPLE"]),
            raw("", "No Code", "US", &[]),
            raw("TSLA", "", "US", &[]),
            raw("0700.HK", "腾讯控股", "JP", &[]),
            RawStockItem {
                code: Some("MSFT".to_string()),
                name: Some("Microsoft".to_string()),
                market: None,
                aliases: None,
            },
        ]);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "AAPL");
        assert_eq!(items[0].aliases.len(), 1);
    }

    #[test]
    fn test_dedupe_real_name_overrides_placeholder_name() {
        let merged = dedupe(vec![
            StockItem::new("000001", "000001", Market::Cn).with_aliases(["000001"]),
            StockItem::new("000001", "平安银行", Market::Cn).with_aliases(["平安银行", "SZ000001"]),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "平安银行");
        let aliases: Vec<&str> = merged[0].aliases.iter().map(String::as_str).collect();
        assert_eq!(aliases, vec!["000001", "SZ000001", "平安银行"]);
    }

    #[test]
    fn test_dedupe_keeps_first_real_name() {
        let merged = dedupe(vec![
            StockItem::new("AAPL", "Apple Inc.", Market::Us),
            StockItem::new("AAPL", "Apple", Market::Us),
        ]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Apple Inc.");
    }

    #[test]
    fn test_dedupe_sorts_by_market_then_code() {
        let merged = dedupe(vec![
            StockItem::new("MSFT", "Microsoft", Market::Us),
            StockItem::new("00700.HK", "腾讯控股", Market::Hk),
            StockItem::new("600519.SH", "贵州茅台", Market::Cn),
            StockItem::new("000001.SZ", "平安银行", Market::Cn),
            StockItem::new("AAPL", "Apple Inc.", Market::Us),
        ]);

        let keys: Vec<(Market, &str)> = merged.iter().map(StockItem::key).collect();
        assert_eq!(
            keys,
            vec![
                (Market::Cn, "000001.SZ"),
                (Market::Cn, "600519.SH"),
                (Market::Hk, "00700.HK"),
                (Market::Us, "AAPL"),
                (Market::Us, "MSFT"),
            ]
        );
    }

    #[test]
    fn test_dedupe_same_code_different_market_are_distinct() {
        let merged = dedupe(vec![
            StockItem::new("BABA", "Alibaba", Market::Us),
            StockItem::new("BABA", "Alibaba", Market::Hk),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_build_catalog_without_fallback_needed() {
        let build = build_catalog(
            vec![
                raw("600519.SH", "贵州茅台", "CN", &[]),
                raw("00700.HK", "腾讯控股", "HK", &[]),
            ],
            vec![raw("AAPL", "Apple Inc.", "US", &[])],
            vec![raw("MSFT", "Microsoft", "US", &[])],
        );

        assert!(!build.used_full_fallback);
        assert!(!build.used_partial_fallback);
        assert_eq!(build.total(), 3);
        assert_eq!(build.market_counts, MarketCounts { cn: 1, hk: 1, us: 1 });
    }

    #[test]
    fn test_build_catalog_full_fallback_when_sources_empty() {
        let build = build_catalog(
            vec![],
            vec![raw("", "", "", &[])],
            vec![
                raw("AAPL", "Apple Inc.", "US", &[]),
                raw("AAPL", "AAPL", "US", &["APPLE"]),
            ],
        );

        assert!(build.used_full_fallback);
        assert!(!build.used_partial_fallback);
        assert_eq!(build.total(), 1);
        assert_eq!(build.items[0].name, "Apple Inc.");
        assert_eq!(build.market_counts.us, 1);
    }

    #[test]
    fn test_build_catalog_supplements_only_missing_markets() {
        let build = build_catalog(
            vec![raw("600519.SH", "贵州茅台", "CN", &[])],
            vec![],
            vec![
                raw("000001.SZ", "平安银行", "CN", &[]),
                raw("00700.HK", "腾讯控股", "HK", &[]),
                raw("AAPL", "Apple Inc.", "US", &[]),
            ],
        );

        assert!(!build.used_full_fallback);
        assert!(build.used_partial_fallback);
        assert_eq!(build.market_counts, MarketCounts { cn: 1, hk: 1, us: 1 });
        assert!(build.items.iter().all(|item| item.code != "000001.SZ"));
    }

    #[test]
    fn test_build_catalog_partial_flag_requires_supplement() {
        let build = build_catalog(
            vec![raw("600519.SH", "贵州茅台", "CN", &[])],
            vec![],
            vec![raw("000001.SZ", "平安银行", "CN", &[])],
        );

        assert!(!build.used_partial_fallback);
        assert_eq!(build.total(), 1);
        assert_eq!(build.market_counts.missing(), vec![Market::Hk, Market::Us]);
    }

    #[test]
    fn test_build_catalog_all_sources_empty() {
        let build = build_catalog(vec![], vec![], vec![]);
        assert!(build.used_full_fallback);
        assert_eq!(build.total(), 0);
        assert_eq!(build.market_counts, MarketCounts::default());
    }
}
