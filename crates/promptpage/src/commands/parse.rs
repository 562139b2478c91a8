//! Parse command - show a template's title and variables

use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use promptpage_core::template::Variable;
use promptpage_core::ParsedTemplate;
use std::path::PathBuf;

/// Parse a template and list its variables
///
/// # Arguments
///
/// * `config` - Optional path to promptpage.toml
/// * `template` - Template file path or builtin template name
/// * `json` - Output as JSON if true
/// * `verbose` - Enable verbose output if true
pub fn run(config: Option<PathBuf>, template: String, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let stored = ctx.template(&template)?;
    let parsed = ctx.config.parser().parse(&stored, &ctx.now);

    if json {
        return print_json(&parsed);
    }

    render_human(&parsed, ctx.verbose);
    Ok(())
}

fn render_human(parsed: &ParsedTemplate, verbose: bool) {
    println!("{} {}", parsed.title.bold(), format!("({})", parsed.id).dimmed());
    if let Some(description) = &parsed.description {
        println!("{}", description);
    }
    if !parsed.frontmatter.tags.is_empty() {
        println!("{} {}", "Tags:".cyan(), parsed.frontmatter.tags.join(", "));
    }

    println!();
    if parsed.variables.is_empty() {
        println!("No variables");
        return;
    }

    println!("{} variable(s):", parsed.variables.len());
    for variable in &parsed.variables {
        render_variable(variable, verbose);
    }
}

fn render_variable(variable: &Variable, verbose: bool) {
    let marker = if variable.required {
        "*".red().bold().to_string()
    } else {
        " ".to_string()
    };

    let value = if variable.value.is_empty() {
        "(empty)".dimmed().to_string()
    } else {
        variable.value.green().to_string()
    };

    println!(
        "{} {} [{}] = {}",
        marker,
        variable.name,
        variable.var_type.to_string().cyan(),
        value
    );

    if let Some(auto_fill) = &variable.auto_fill {
        println!("    auto-fill: {}", auto_fill);
    }
    if let Some(options) = &variable.options {
        println!("    options: {}", options.join(" / "));
    }
    if verbose {
        if let Some(hint) = &variable.hint {
            println!("    hint: {}", hint);
        }
        if let Some(placeholder) = &variable.placeholder {
            println!("    placeholder: {}", placeholder);
        }
    }
}
