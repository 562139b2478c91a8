//! Placeholder engine
//!
//! Extraction and rendering share one scanner: code is masked, bracket tokens
//! are found by [`BracketStream`](tokenize::BracketStream), and each token's
//! content is checked against [`PlaceholderRules`]. Anything the scanner does
//! not accept is literal text in both directions.

mod mask;
mod tokenize;

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::rules::PlaceholderRules;
use mask::mask_code;
use tokenize::BracketStream;

/// An accepted placeholder occurrence in a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Placeholder<'a> {
    /// Byte position of `[`
    pub start: usize,
    /// Byte position just past `]`
    pub end: usize,
    /// Trimmed variable name
    pub name: &'a str,
}

/// One piece of rendered output
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PromptSegment {
    pub text: String,
    /// Whether `text` is a substituted value
    pub filled: bool,
    /// Set for placeholder segments, filled or not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_name: Option<String>,
}

impl PromptSegment {
    fn literal(text: &str) -> Self {
        Self {
            text: text.to_string(),
            filled: false,
            variable_name: None,
        }
    }
}

/// Values for rendering, keyed by variable name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: HashMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// The value for `name`, if present and non-empty
    pub fn filled(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

impl From<HashMap<String, String>> for TemplateContext {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Scanner and renderer for bracket placeholders
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    rules: PlaceholderRules,
}

impl TemplateEngine {
    pub fn new(rules: PlaceholderRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PlaceholderRules {
        &self.rules
    }

    /// All accepted placeholder occurrences in `body`, in order
    pub(crate) fn scan<'a>(&self, body: &'a str) -> Vec<Placeholder<'a>> {
        let masked = mask_code(body);

        BracketStream::new(&masked)
            .filter_map(|token| {
                let content = &body[token.content_range()];
                if !self.rules.fits_token(content) {
                    return None;
                }
                let name = self.rules.accept(content)?;
                Some(Placeholder {
                    start: token.start,
                    end: token.end(),
                    name,
                })
            })
            .collect()
    }

    /// Distinct placeholder names in first-seen order
    pub fn extract_placeholders(&self, body: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.scan(body)
            .into_iter()
            .filter(|placeholder| seen.insert(placeholder.name))
            .map(|placeholder| placeholder.name.to_string())
            .collect()
    }

    /// Split `body` into literal, filled, and unfilled segments
    ///
    /// An unfilled placeholder keeps its original token text, so rendering
    /// with no values reproduces `body` exactly.
    pub fn render_segments(&self, body: &str, context: &TemplateContext) -> Vec<PromptSegment> {
        let mut segments = Vec::new();
        let mut last = 0;

        for placeholder in self.scan(body) {
            if placeholder.start > last {
                segments.push(PromptSegment::literal(&body[last..placeholder.start]));
            }

            let segment = match context.filled(placeholder.name) {
                Some(value) => PromptSegment {
                    text: value.to_string(),
                    filled: true,
                    variable_name: Some(placeholder.name.to_string()),
                },
                None => PromptSegment {
                    text: body[placeholder.start..placeholder.end].to_string(),
                    filled: false,
                    variable_name: Some(placeholder.name.to_string()),
                },
            };
            segments.push(segment);
            last = placeholder.end;
        }

        if last < body.len() {
            segments.push(PromptSegment::literal(&body[last..]));
        }

        segments
    }

    /// Render `body`, substituting every placeholder that has a value
    pub fn render(&self, body: &str, context: &TemplateContext) -> String {
        self.render_segments(body, context)
            .into_iter()
            .map(|segment| segment.text)
            .collect()
    }
}

/// Distinct placeholder names in `body` under the default rules
pub fn extract_placeholders(body: &str) -> Vec<String> {
    TemplateEngine::default().extract_placeholders(body)
}

/// Render `body` under the default rules
pub fn render(body: &str, context: &TemplateContext) -> String {
    TemplateEngine::default().render(body, context)
}

/// Segment `body` under the default rules
pub fn render_segments(body: &str, context: &TemplateContext) -> Vec<PromptSegment> {
    TemplateEngine::default().render_segments(body, context)
}

#[cfg(test)]
mod tests;
