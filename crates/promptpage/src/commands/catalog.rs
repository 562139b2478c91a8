//! Catalog command - show the consolidated instrument catalog

use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use promptpage_core::catalog::format_code;
use promptpage_core::Market;
use serde_json::json;
use std::path::PathBuf;

/// Build the catalog from configured sources and report what it contains
pub fn run(config: Option<PathBuf>, items: bool, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let build = ctx.catalog()?;

    if json {
        let mut output = json!({
            "total": build.total(),
            "market_counts": build.market_counts,
            "used_full_fallback": build.used_full_fallback,
            "used_partial_fallback": build.used_partial_fallback,
        });
        if items {
            output["items"] = serde_json::to_value(&build.items)?;
        }
        return print_json(&output);
    }

    println!("{} {} instrument(s)", "→".cyan(), build.total());
    for market in Market::ALL {
        println!("  {:<3} {}", market.as_str(), build.market_counts.get(market));
    }

    if build.used_full_fallback {
        println!("{} Sources empty, using builtin fallback", "⚠".yellow().bold());
    } else if build.used_partial_fallback {
        println!("{} Fallback entries added for empty markets", "⚠".yellow().bold());
    }

    if items {
        println!();
        for item in &build.items {
            let aliases = if item.aliases.is_empty() {
                String::new()
            } else {
                let joined: Vec<&str> = item.aliases.iter().map(String::as_str).collect();
                format!(" ({})", joined.join(", ")).dimmed().to_string()
            };
            println!("{:<10} {}{}", format_code(item), item.name, aliases);
        }
    }

    Ok(())
}
