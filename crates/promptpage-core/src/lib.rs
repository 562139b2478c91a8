// Core modules
pub mod autofill;
pub mod catalog;
pub mod config;
pub mod error;
pub mod normalize;
pub mod search;
pub mod template;

// Re-export commonly used types
pub use autofill::{resolve_auto_fill, AutoFillKind};
pub use catalog::{build_catalog, CatalogBuild, Market, RawStockItem, StockItem};
pub use config::Config;
pub use error::{PromptpageError, Result};
pub use normalize::{code_key, free_text_key};
pub use search::{search, RankedMatch, Searcher};
pub use template::{
    export_markdown, extract_placeholders, parse_template, render, render_segments,
    ParsedTemplate, PromptSegment, StoredTemplate, TemplateContext, TemplateError,
};
