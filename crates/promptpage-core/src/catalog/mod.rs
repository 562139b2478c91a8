//! Instrument catalog
//!
//! A catalog is an ordered, deduplicated list of [`StockItem`]s keyed by
//! `(market, code)`. It is rebuilt from up to three sources (base, delta,
//! fallback) by [`build_catalog`] and handed to the resolver as a snapshot.

mod consolidate;
mod fallback;
pub(crate) mod format;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub use consolidate::{build_catalog, dedupe, normalize_source, CatalogBuild, MarketCounts};
pub use fallback::builtin_fallback;
pub use format::{format_code, label};

/// Listing market of an instrument
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Cn,
    Hk,
    Us,
}

impl Market {
    pub const ALL: [Market; 3] = [Market::Cn, Market::Hk, Market::Us];

    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Cn => "CN",
            Market::Hk => "HK",
            Market::Us => "US",
        }
    }

    /// Display label used in pickers
    pub fn label(&self) -> &'static str {
        match self {
            Market::Cn => "A股",
            Market::Hk => "港股",
            Market::Us => "美股",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CN" => Ok(Market::Cn),
            "HK" => Ok(Market::Hk),
            "US" => Ok(Market::Us),
            other => Err(format!("unknown market '{}'", other)),
        }
    }
}

/// A tradable instrument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockItem {
    pub code: String,
    pub name: String,
    pub market: Market,
    #[serde(default)]
    pub aliases: BTreeSet<String>,
}

impl StockItem {
    pub fn new(code: impl Into<String>, name: impl Into<String>, market: Market) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            market,
            aliases: BTreeSet::new(),
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Canonical identity within a catalog
    pub fn key(&self) -> (Market, &str) {
        (self.market, self.code.as_str())
    }
}

/// An unvalidated record as it appears in a source list
///
/// Every field is optional so that a malformed entry only drops itself, never
/// the whole list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawStockItem {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub aliases: Option<Vec<String>>,
}

impl From<StockItem> for RawStockItem {
    fn from(item: StockItem) -> Self {
        Self {
            code: Some(item.code),
            name: Some(item.name),
            market: Some(item.market.as_str().to_string()),
            aliases: Some(item.aliases.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_parses_case_insensitively() {
        assert_eq!("cn".parse::<Market>(), Ok(Market::Cn));
        assert_eq!(" HK ".parse::<Market>(), Ok(Market::Hk));
        assert!("JP".parse::<Market>().is_err());
    }

    #[test]
    fn test_market_orders_like_its_code() {
        let mut markets = vec![Market::Us, Market::Cn, Market::Hk];
        markets.sort();
        assert_eq!(markets, Market::ALL.to_vec());
    }

    #[test]
    fn test_stock_item_serializes_market_as_code() {
        let item = StockItem::new("AAPL", "Apple Inc.", Market::Us).with_aliases(["APPLE"]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["market"], "US");
        assert_eq!(json["aliases"], serde_json::json!(["APPLE"]));
    }

    #[test]
    fn test_raw_item_tolerates_missing_fields() {
        let raw: Vec<RawStockItem> =
            serde_json::from_str(r#"[{"code": "AAPL"}, {"name": "x", "aliases": null}]"#).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].code.as_deref(), Some("AAPL"));
        assert!(raw[1].aliases.is_none());
    }
}
