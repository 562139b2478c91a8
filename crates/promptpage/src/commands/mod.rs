//! CLI command implementations

pub mod autofill;
pub mod catalog;
pub mod export;
pub mod parse;
pub mod render;
pub mod search;
pub mod templates;

use promptpage_core::{ParsedTemplate, TemplateContext};

/// Initial variable values overlaid with `--set` assignments
///
/// Assignments for names the template does not declare are still applied and
/// logged at warn level.
pub(crate) fn context_with(parsed: &ParsedTemplate, set: &[(String, String)]) -> TemplateContext {
    let mut context: TemplateContext = parsed
        .variables
        .iter()
        .map(|variable| (variable.name.clone(), variable.value.clone()))
        .collect();

    for (name, value) in set {
        if parsed.variable(name).is_none() {
            tracing::warn!("Template has no variable named '{}'", name);
        }
        context.set(name.clone(), value.clone());
    }

    context
}
