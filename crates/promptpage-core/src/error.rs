use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptpageError {
    // Config errors
    #[error("CONFIG_PARSE_ERROR: failed to parse {path}: {reason}")]
    ConfigParseError { path: PathBuf, reason: String },

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // Catalog errors
    #[error("CATALOG_SOURCE_INVALID: {path}: {reason}")]
    CatalogSourceInvalid { path: PathBuf, reason: String },

    // Template errors
    #[error("TEMPLATE_NOT_FOUND: template '{0}' not found")]
    TemplateNotFound(String),

    #[error("TEMPLATE_EXPORT_FAILED: {0}")]
    TemplateExportFailed(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<crate::template::error::TemplateError> for PromptpageError {
    fn from(err: crate::template::error::TemplateError) -> Self {
        PromptpageError::TemplateExportFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PromptpageError>;
