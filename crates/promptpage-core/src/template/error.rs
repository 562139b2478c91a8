//! Template error types

use std::fmt;

/// Template export errors
///
/// Parsing and rendering are total; only serializing frontmatter back to YAML
/// can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Frontmatter could not be emitted as YAML
    FrontmatterSerialization {
        /// Error message from the YAML emitter
        message: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::FrontmatterSerialization { message } => {
                write!(f, "Failed to serialize frontmatter: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<serde_yaml::Error> for TemplateError {
    fn from(err: serde_yaml::Error) -> Self {
        TemplateError::FrontmatterSerialization {
            message: err.to_string(),
        }
    }
}
