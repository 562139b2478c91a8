//! Variable metadata inferred from a placeholder's name

use super::AutoFillKind;
use crate::template::{VariableMeta, VariableType};

/// Names recognized as auto-filled variables
pub const AUTO_FILL_NAMES: &[&str] = &[
    "今天",
    "今日",
    "日期",
    "当前日期",
    "current_date",
    "today",
    "时间",
    "当前时间",
    "current_time",
    "日期时间",
    "当前日期时间",
    "current_datetime",
    "now",
    "星期",
    "周几",
    "本月",
    "当前月份",
    "当前年月",
    "本季度",
    "当前季度",
    "时间戳",
    "UNIX时间戳",
    "Unix时间戳",
    "最近交易日",
    "交易日",
    "最新交易日",
];

/// Substrings (matched case-insensitively) that mark an instrument variable
const STOCK_MARKERS: &[&str] = &["股票", "标的", "证券", "ticker", "symbol"];

fn auto_fill_by_name(name: &str) -> Option<(VariableType, AutoFillKind)> {
    let entry = match name {
        "今天" | "今日" | "日期" | "当前日期" | "current_date" | "today" => {
            (VariableType::Date, AutoFillKind::Date)
        }
        "时间" | "当前时间" | "current_time" => (VariableType::Time, AutoFillKind::Time),
        "日期时间" | "当前日期时间" | "current_datetime" | "now" => {
            (VariableType::Text, AutoFillKind::DateTime)
        }
        "星期" | "周几" => (VariableType::Text, AutoFillKind::Weekday),
        "本月" | "当前月份" | "当前年月" => (VariableType::Text, AutoFillKind::Month),
        "本季度" | "当前季度" => (VariableType::Text, AutoFillKind::Quarter),
        "时间戳" | "UNIX时间戳" | "Unix时间戳" => (VariableType::Text, AutoFillKind::Timestamp),
        "最近交易日" | "交易日" | "最新交易日" => {
            (VariableType::Date, AutoFillKind::TradingDay)
        }
        _ => return None,
    };
    Some(entry)
}

fn looks_like_instrument(name: &str) -> bool {
    let lowered = name.to_lowercase();
    STOCK_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Metadata implied by a variable's name alone
///
/// Exact dictionary names get a type and an auto-fill kind; names mentioning
/// an instrument get the `stock` type; everything else gets nothing.
pub fn infer_meta_by_name(name: &str) -> VariableMeta {
    let name = name.trim();

    if let Some((var_type, auto_fill)) = auto_fill_by_name(name) {
        return VariableMeta {
            var_type: Some(var_type),
            auto_fill: Some(auto_fill),
            ..VariableMeta::default()
        };
    }

    if looks_like_instrument(name) {
        return VariableMeta {
            var_type: Some(VariableType::Stock),
            ..VariableMeta::default()
        };
    }

    VariableMeta::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_infers_auto_fill() {
        for name in AUTO_FILL_NAMES {
            let meta = infer_meta_by_name(name);
            assert!(meta.auto_fill.is_some(), "{} should auto-fill", name);
            assert!(meta.var_type.is_some());
        }
    }

    #[test]
    fn test_dictionary_entries() {
        let today = infer_meta_by_name("今天");
        assert_eq!(today.var_type, Some(VariableType::Date));
        assert_eq!(today.auto_fill, Some(AutoFillKind::Date));

        let trading = infer_meta_by_name(" 交易日 ");
        assert_eq!(trading.auto_fill, Some(AutoFillKind::TradingDay));

        let now = infer_meta_by_name("now");
        assert_eq!(now.var_type, Some(VariableType::Text));
        assert_eq!(now.auto_fill, Some(AutoFillKind::DateTime));
    }

    #[test]
    fn test_dictionary_is_case_sensitive() {
        assert_eq!(infer_meta_by_name("TODAY"), VariableMeta::default());
    }

    #[test]
    fn test_instrument_names_infer_stock_type() {
        for name in ["股票代码", "目标标的", "证券名称", "Ticker", "SYMBOL_1"] {
            let meta = infer_meta_by_name(name);
            assert_eq!(meta.var_type, Some(VariableType::Stock), "{}", name);
            assert_eq!(meta.auto_fill, None);
        }
    }

    #[test]
    fn test_other_names_infer_nothing() {
        assert_eq!(infer_meta_by_name("行业"), VariableMeta::default());
        assert_eq!(infer_meta_by_name(""), VariableMeta::default());
    }
}
