//! Export command - write a template back as markdown

use crate::context::Context;
use crate::output::print_raw;
use anyhow::{Context as _, Result};
use colored::Colorize;
use promptpage_core::{export_markdown, PromptpageError};
use std::fs;
use std::path::PathBuf;

/// Export a template with its resolved variables as frontmatter
///
/// `--set` values become the exported defaults. Names the template does not
/// declare are ignored with a warning.
pub fn run(
    config: Option<PathBuf>,
    template: String,
    set: Vec<(String, String)>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let stored = ctx.template(&template)?;
    let mut parsed = ctx.config.parser().parse(&stored, &ctx.now);

    for (name, value) in set {
        match parsed.variables.iter_mut().find(|variable| variable.name == name) {
            Some(variable) => variable.value = value,
            None => tracing::warn!("Template has no variable named '{}', not exported", name),
        }
    }

    let markdown = export_markdown(&parsed).map_err(PromptpageError::from)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &markdown)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Exported {} to {}", "✓".green().bold(), parsed.title, path.display());
        }
        None => print_raw(&markdown)?,
    }

    Ok(())
}
