//! Shared test helpers for engine tests

use crate::template::engine::{PromptSegment, TemplateContext};

/// Context for the stock analysis sample
pub(super) fn stock_context() -> TemplateContext {
    [("股票代码", "腾讯控股，HK700"), ("今天", "2026-03-05")]
        .into_iter()
        .collect()
}

/// Concatenate segment texts
pub(super) fn joined(segments: &[PromptSegment]) -> String {
    segments.iter().map(|segment| segment.text.as_str()).collect()
}
