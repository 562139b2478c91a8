//! Built-in fallback instruments

use super::{Market, RawStockItem, StockItem};

/// Small dataset used when no fallback source is configured
pub fn builtin_fallback() -> Vec<RawStockItem> {
    vec![
        StockItem::new("00700.HK", "腾讯控股", Market::Hk)
            .with_aliases(["腾讯", "00700", "HK00700", "700"]),
        StockItem::new("09988.HK", "阿里巴巴-W", Market::Hk)
            .with_aliases(["阿里", "09988", "HK09988", "9988"]),
        StockItem::new("600519.SH", "贵州茅台", Market::Cn)
            .with_aliases(["茅台", "600519", "SH600519"]),
        StockItem::new("000001.SZ", "平安银行", Market::Cn)
            .with_aliases(["平安银行", "000001", "SZ000001"]),
        StockItem::new("AAPL", "Apple Inc.", Market::Us).with_aliases(["APPLE", "AAPL"]),
        StockItem::new("BABA", "Alibaba Group Holding Limited", Market::Us)
            .with_aliases(["ALIBABA", "BABA"]),
    ]
    .into_iter()
    .map(RawStockItem::from)
    .collect()
}
