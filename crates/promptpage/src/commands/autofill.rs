//! Autofill command - preview auto-filled values for the current instant

use crate::context::Context;
use crate::output::print_json;
use anyhow::{bail, Result};
use colored::Colorize;
use promptpage_core::autofill::{infer_meta_by_name, AUTO_FILL_NAMES};
use promptpage_core::AutoFillKind;
use serde_json::json;
use std::path::PathBuf;

/// Resolve an auto-fill kind, a variable name, or every recognized name
pub fn run(
    config: Option<PathBuf>,
    kind: Option<String>,
    name: Option<String>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let now = ctx.now;

    if let Some(kind) = kind {
        let kind = AutoFillKind::from(kind);
        if let AutoFillKind::Other(tag) = &kind {
            bail!("Unknown auto-fill kind '{}'", tag);
        }
        let value = kind.resolve(&now);
        return if json {
            print_json(&json!({ "kind": kind, "value": value }))
        } else {
            println!("{}", value);
            Ok(())
        };
    }

    let names: Vec<&str> = match &name {
        Some(name) => vec![name.as_str()],
        None => AUTO_FILL_NAMES.to_vec(),
    };

    let rows: Vec<_> = names
        .iter()
        .map(|name| {
            let meta = infer_meta_by_name(name);
            let value = meta.auto_fill.as_ref().map(|kind| kind.resolve(&now));
            (name.trim(), meta, value)
        })
        .collect();

    if json {
        let output: Vec<_> = rows
            .iter()
            .map(|(name, meta, value)| {
                json!({
                    "name": name,
                    "type": meta.var_type,
                    "kind": meta.auto_fill,
                    "value": value,
                })
            })
            .collect();
        return print_json(&output);
    }

    for (name, meta, value) in &rows {
        match (&meta.auto_fill, value) {
            (Some(kind), Some(value)) => {
                println!("{:<12} {:<12} {}", name, kind.to_string().cyan(), value.green());
            }
            _ => {
                let inferred = meta
                    .var_type
                    .as_ref()
                    .map(|t| format!("type {}", t))
                    .unwrap_or_else(|| "nothing".to_string());
                println!("{:<12} {} {}", name, "not auto-filled,".dimmed(), inferred);
            }
        }
    }

    Ok(())
}
