//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "promptpage")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to promptpage.toml (defaults to ./promptpage.toml)
    #[arg(long, global = true, env = "PROMPTPAGE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a template and list its variables
    Parse {
        /// Template file path or builtin template name
        template: String,

        #[arg(long)]
        json: bool,
    },

    /// Render a template with variable values
    Render {
        /// Template file path or builtin template name
        template: String,

        /// Variable value, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Show filled and unfilled segments
        #[arg(long)]
        segments: bool,

        #[arg(long)]
        json: bool,
    },

    /// Write a template back as markdown with frontmatter
    Export {
        /// Template file path or builtin template name
        template: String,

        /// Variable value stored as the exported default, repeatable
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List builtin templates
    Templates {
        #[arg(long)]
        json: bool,
    },

    /// Search the instrument catalog
    Search {
        /// Name, code, or abbreviation
        query: String,

        /// Maximum number of results (defaults to [search] limit)
        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Show catalog statistics
    Catalog {
        /// Also list every instrument
        #[arg(long)]
        items: bool,

        #[arg(long)]
        json: bool,
    },

    /// Resolve auto-fill values for the current time
    Autofill {
        /// Auto-fill kind (date, time, datetime, weekday, month, quarter, timestamp, trading_day)
        kind: Option<String>,

        /// Infer the kind from a variable name instead
        #[arg(long, conflicts_with = "kind")]
        name: Option<String>,

        #[arg(long)]
        json: bool,
    },
}

/// Parse `NAME=VALUE`; the value may be empty or contain `=`
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty variable name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}
