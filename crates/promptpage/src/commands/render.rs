//! Render command - fill a template's placeholders

use crate::commands::context_with;
use crate::context::Context;
use crate::output::{print_json, print_raw};
use anyhow::Result;
use colored::Colorize;
use promptpage_core::PromptSegment;
use serde_json::json;
use std::path::PathBuf;

/// Render a template body with its initial values and `--set` overrides
///
/// Placeholders left empty stay in the output as written, so an unfilled
/// render reproduces the body exactly.
pub fn run(
    config: Option<PathBuf>,
    template: String,
    set: Vec<(String, String)>,
    segments: bool,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let ctx = Context::new(config, verbose)?;
    let stored = ctx.template(&template)?;
    let parser = ctx.config.parser();
    let parsed = parser.parse(&stored, &ctx.now);
    let context = context_with(&parsed, &set);

    if segments {
        let pieces = parser.engine().render_segments(&parsed.body, &context);
        if json {
            return print_json(&pieces);
        }
        render_segments_human(&pieces);
        return Ok(());
    }

    let prompt = parser.engine().render(&parsed.body, &context);
    if json {
        let unfilled: Vec<&str> = parsed
            .variables
            .iter()
            .filter(|variable| context.filled(&variable.name).is_none())
            .map(|variable| variable.name.as_str())
            .collect();
        return print_json(&json!({
            "id": parsed.id,
            "title": parsed.title,
            "prompt": prompt,
            "unfilled": unfilled,
        }));
    }

    print_raw(&prompt)?;
    Ok(())
}

fn render_segments_human(pieces: &[PromptSegment]) {
    let mut out = String::new();
    for piece in pieces {
        let text = match (&piece.variable_name, piece.filled) {
            (Some(_), true) => piece.text.green().to_string(),
            (Some(_), false) => piece.text.yellow().bold().to_string(),
            (None, _) => piece.text.clone(),
        };
        out.push_str(&text);
    }
    print!("{}", out);
}
