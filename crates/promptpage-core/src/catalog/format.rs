//! Display forms of instrument codes

use super::{Market, StockItem};

/// Split an uppercased code at its first dot into `(symbol, exchange suffix)`
pub(crate) fn split_code(upper: &str) -> (&str, &str) {
    match upper.split_once('.') {
        Some((left, right)) => (left, right.split('.').next().unwrap_or("")),
        None => (upper, ""),
    }
}

/// Keep the digits of `text`, left-pad with zeros to `width`, and keep the last `width`
pub(crate) fn padded_digits(text: &str, width: usize) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    let padded = format!("{:0>width$}", digits, width = width);
    padded[padded.len() - width..].to_string()
}

/// Strip leading zeros, keeping at least `"0"`
pub(crate) fn trim_leading_zeros(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

/// Exchange letters from a CN code suffix, e.g. `SH` from `600519.SH`
pub(crate) fn exchange_letters(suffix: &str) -> String {
    suffix.chars().filter(char::is_ascii_uppercase).collect()
}

/// Code as shown to users and inserted into prompts
///
/// - HK: `HK` + digits without leading zeros (`00700.HK` → `HK700`)
/// - CN: exchange + 6 digits (`600519.SH` → `SH600519`), digits only without suffix
/// - US: symbol before the first dot
pub fn format_code(item: &StockItem) -> String {
    let upper = item.code.to_uppercase();
    let (left, right) = split_code(&upper);

    match item.market {
        Market::Hk => {
            let digits = padded_digits(left, 5);
            format!("HK{}", trim_leading_zeros(&digits))
        }
        Market::Cn => {
            let digits = padded_digits(left, 6);
            let exchange = exchange_letters(right);
            format!("{}{}", exchange, digits)
        }
        Market::Us => {
            if left.is_empty() {
                upper.clone()
            } else {
                left.to_string()
            }
        }
    }
}

/// `"<name>，<formatted code>"`, the text a picked instrument fills in
pub fn label(item: &StockItem) -> String {
    format!("{}，{}", item.name, format_code(item))
}
