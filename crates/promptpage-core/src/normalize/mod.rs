//! Text normalization shared by catalog matching
//!
//! Two canonical forms are produced from arbitrary user text:
//!
//! - [`free_text_key`] for instrument **names**: NFKC-normalized, then
//!   traditional Han characters are folded to simplified, lowercased, and
//!   reduced to letters and digits.
//! - [`code_key`] for instrument **codes**: NFKC-normalized, uppercased, and
//!   reduced to `[A-Z0-9]`.
//!
//! Both functions are total and idempotent.

mod script;

use unicode_normalization::UnicodeNormalization;

pub use script::fold_script;

/// Canonical form used for name matching
pub fn free_text_key(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    fold_script(&composed)
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace() && c.is_alphanumeric())
        .collect()
}

/// Canonical form used for code matching
pub fn code_key(text: &str) -> String {
    text.nfkc()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}
