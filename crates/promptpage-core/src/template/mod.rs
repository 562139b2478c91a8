//! Template module - bracket placeholder templates with YAML frontmatter
//!
//! A template is markdown with an optional leading frontmatter block. Fill-in
//! points are written as `[name]` in the body.
//!
//! ## Syntax
//!
//! - Placeholders: `[股票代码]` or `[ 股票代码 ]` (surrounding spaces ignored)
//! - Markdown links `[text](url)` are never placeholders
//! - Brackets inside fenced code blocks and inline code are ignored
//! - Frontmatter `variables` may be a mapping keyed by name or a list with `id`
//!
//! ## Flow
//!
//! [`parse_template`] → [`ParsedTemplate`] → [`render`] / [`render_segments`]
//! with a [`TemplateContext`], and [`export_markdown`] to write it back.

pub mod engine;
pub mod error;
mod export;
pub mod frontmatter;
mod layers;
mod model;
mod parse;
pub mod rules;

pub use engine::{
    extract_placeholders, render, render_segments, PromptSegment, TemplateContext, TemplateEngine,
};
pub use error::TemplateError;
pub use export::export_markdown;
pub use frontmatter::{parse_frontmatter, Frontmatter, VariableMetaMap};
pub use layers::merge_layers;
pub use model::{ParsedTemplate, SourceKind, StoredTemplate, Variable, VariableMeta, VariableType};
pub use parse::{parse_template, TemplateParser, UNTITLED};
pub use rules::PlaceholderRules;
