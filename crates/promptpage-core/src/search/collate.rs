//! Chinese-aware name ordering
//!
//! Approximates `zh-Hans-CN` collation: separators, then digits, then Latin
//! letters case-insensitively, then Han characters by toneless pinyin. Names
//! equal at that level order lowercase before uppercase, then by code point, so
//! the ordering is total.

use pinyin::ToPinyin;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
    Separator(char),
    Digit(char),
    Latin(char),
    Han(&'static str, char),
    Other(char),
}

fn unit(c: char) -> Unit {
    if c.is_ascii_digit() {
        Unit::Digit(c)
    } else if c.is_ascii_alphabetic() {
        Unit::Latin(c.to_ascii_lowercase())
    } else if let Some(pinyin) = c.to_pinyin() {
        Unit::Han(pinyin.plain(), c)
    } else if c.is_alphanumeric() {
        Unit::Other(c)
    } else {
        Unit::Separator(c)
    }
}

fn case_rank(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

/// Compare two display names
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(unit)
        .cmp(b.chars().map(unit))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}
