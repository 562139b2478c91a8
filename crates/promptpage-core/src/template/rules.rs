//! Acceptance rules for placeholder names

use std::collections::BTreeSet;

/// Longest bracket content, in characters, that is considered at all
pub const DEFAULT_MAX_TOKEN_CHARS: usize = 40;

/// Longest trimmed name, in characters, that becomes a variable
pub const DEFAULT_MAX_NAME_CHARS: usize = 24;

/// Bracketed words that show up in prose and markdown extensions but are
/// never user input
pub const BUILTIN_RESERVED: &[&str] = &[
    "TOC", "toc", "目录", "TODO", "todo", "NOTE", "TIP", "WARNING", "IMPORTANT", "CAUTION", "INFO",
    "!NOTE", "!TIP", "!WARNING", "!IMPORTANT", "!CAUTION",
];

/// Which bracket tokens count as placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRules {
    pub max_token_chars: usize,
    pub max_name_chars: usize,
    reserved: BTreeSet<String>,
}

impl Default for PlaceholderRules {
    fn default() -> Self {
        Self {
            max_token_chars: DEFAULT_MAX_TOKEN_CHARS,
            max_name_chars: DEFAULT_MAX_NAME_CHARS,
            reserved: BUILTIN_RESERVED.iter().map(|name| name.to_string()).collect(),
        }
    }
}

fn allowed_char(c: char) -> bool {
    c.is_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '_' | '-' | '·' | '(' | ')' | '（' | '）')
}

impl PlaceholderRules {
    /// Override the token and name length caps
    pub fn with_caps(mut self, max_token_chars: usize, max_name_chars: usize) -> Self {
        self.max_token_chars = max_token_chars;
        self.max_name_chars = max_name_chars;
        self
    }

    /// Add names to the reserved blocklist
    pub fn with_reserved<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    pub fn reserved(&self) -> impl Iterator<Item = &str> {
        self.reserved.iter().map(String::as_str)
    }

    /// Whether raw bracket content is short enough to be scanned as a token
    pub fn fits_token(&self, content: &str) -> bool {
        let len = content.chars().count();
        len >= 1 && len <= self.max_token_chars
    }

    /// Validate raw bracket content, returning the trimmed variable name
    pub fn accept<'a>(&self, content: &'a str) -> Option<&'a str> {
        let name = content.trim();
        let len = name.chars().count();

        if len == 0 || len > self.max_name_chars {
            return None;
        }
        if matches!(name, "x" | "X" | "*") {
            return None;
        }
        if self.is_reserved(name) {
            return None;
        }
        if !name.chars().all(allowed_char) {
            return None;
        }

        Some(name)
    }
}
