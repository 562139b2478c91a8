//! promptpage.toml configuration

pub mod consts;
mod model;

pub use model::{CatalogConfig, Config, PlaceholderConfig, SearchConfig, TemplatesConfig};
