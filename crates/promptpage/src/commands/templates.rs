//! Templates command - list builtin templates

use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct TemplateSummary {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    tags: Vec<String>,
    variables: Vec<String>,
    updated_at: i64,
}

/// List the templates found in the configured templates directory
pub fn run(config: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let parser = ctx.config.parser();

    let summaries: Vec<TemplateSummary> = ctx
        .builtin_templates()
        .iter()
        .map(|stored| {
            let parsed = parser.parse(stored, &ctx.now);
            TemplateSummary {
                id: parsed.id,
                title: parsed.title,
                description: parsed.description,
                tags: parsed.frontmatter.tags,
                variables: parsed.variables.into_iter().map(|v| v.name).collect(),
                updated_at: stored.updated_at,
            }
        })
        .collect();

    if json {
        return print_json(&summaries);
    }

    if summaries.is_empty() {
        println!(
            "No templates in {}",
            ctx.config.templates.dir.display().to_string().dimmed()
        );
        return Ok(());
    }

    for summary in &summaries {
        println!("{} {}", "•".cyan(), summary.title.bold());
        if let Some(description) = &summary.description {
            println!("  {}", description);
        }
        if !summary.variables.is_empty() {
            println!("  variables: {}", summary.variables.join(", "));
        }
        if verbose {
            println!("  id: {}", summary.id.dimmed());
        }
    }

    Ok(())
}
