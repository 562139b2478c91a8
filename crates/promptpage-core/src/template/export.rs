//! Markdown export
//!
//! Writes a parsed template back as frontmatter plus body. Current values
//! become declared defaults, so exporting and re-parsing yields the same
//! variables.

use super::error::TemplateError;
use super::frontmatter::{Frontmatter, VariableMetaMap};
use super::model::ParsedTemplate;

/// Serialize `parsed` as `---\n<yaml>---\n<body>`
///
/// Keys are emitted in a fixed order: `title`, `description`, `variables`,
/// `tags`, then any keys carried over from the original frontmatter.
pub fn export_markdown(parsed: &ParsedTemplate) -> Result<String, TemplateError> {
    let mut variables = VariableMetaMap::new();
    for variable in &parsed.variables {
        variables.insert(variable.name.clone(), variable.to_meta());
    }

    let frontmatter = Frontmatter {
        title: Some(parsed.title.clone()),
        description: parsed.description.clone(),
        variables,
        tags: parsed.frontmatter.tags.clone(),
        extra: parsed.frontmatter.extra.clone(),
    };

    let yaml = serde_yaml::to_string(&frontmatter)?;
    Ok(format!("---\n{}---\n{}", yaml, parsed.body))
}
