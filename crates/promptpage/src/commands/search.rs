//! Search command - fuzzy instrument lookup

use crate::context::Context;
use crate::output::print_json;
use anyhow::{bail, Result};
use colored::Colorize;
use promptpage_core::catalog::{format_code, label};
use promptpage_core::config::consts::search::MAX_LIMIT;
use serde_json::json;
use std::path::PathBuf;

/// Search the configured catalog
///
/// # Arguments
///
/// * `limit` - Maximum results; defaults to `[search] limit` from config
pub fn run(
    config: Option<PathBuf>,
    query: String,
    limit: Option<usize>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let limit = limit.unwrap_or(ctx.config.search.limit);
    if limit == 0 || limit > MAX_LIMIT {
        bail!("--limit must be between 1 and {}", MAX_LIMIT);
    }

    let build = ctx.catalog()?;
    if build.used_full_fallback {
        tracing::warn!("Catalog sources are empty, searching the builtin fallback set");
    }

    let matches = ctx.config.searcher().search(&build.items, &query, limit);

    if json {
        let results: Vec<_> = matches
            .iter()
            .map(|m| {
                json!({
                    "code": m.item.code,
                    "name": m.item.name,
                    "market": m.item.market,
                    "display_code": format_code(m.item),
                    "label": label(m.item),
                    "score": m.score,
                })
            })
            .collect();
        return print_json(&results);
    }

    if matches.is_empty() {
        println!("No matches for '{}'", query.trim());
        return Ok(());
    }

    for m in &matches {
        let mut line = format!(
            "{:<10} {} {}",
            format_code(m.item).bold(),
            m.item.name,
            format!("[{}]", m.item.market.label()).cyan()
        );
        if verbose {
            line.push_str(&format!(" {}", format!("score={}", m.score).dimmed()));
        }
        println!("{}", line);
    }

    Ok(())
}
