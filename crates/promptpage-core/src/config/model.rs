use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::consts;
use crate::error::{PromptpageError, Result};
use crate::search::{ScoringWeights, Searcher, DEFAULT_LIMIT};
use crate::template::rules::{DEFAULT_MAX_NAME_CHARS, DEFAULT_MAX_TOKEN_CHARS};
use crate::template::{PlaceholderRules, TemplateParser};

/// promptpage.toml schema; every section is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub placeholders: PlaceholderConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub scoring: ScoringWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            scoring: ScoringWeights::default(),
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceholderConfig {
    #[serde(default = "default_max_token_chars")]
    pub max_token_chars: usize,
    #[serde(default = "default_max_name_chars")]
    pub max_name_chars: usize,
    /// Appended to the builtin blocklist
    #[serde(default)]
    pub reserved: Vec<String>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            max_token_chars: DEFAULT_MAX_TOKEN_CHARS,
            max_name_chars: DEFAULT_MAX_NAME_CHARS,
            reserved: Vec::new(),
        }
    }
}

fn default_max_token_chars() -> usize {
    DEFAULT_MAX_TOKEN_CHARS
}

fn default_max_name_chars() -> usize {
    DEFAULT_MAX_NAME_CHARS
}

/// Catalog source files (JSON arrays of instrument records)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    #[serde(default)]
    pub base: Option<PathBuf>,
    #[serde(default)]
    pub delta: Option<PathBuf>,
    /// Builtin fallback list is used when unset
    #[serde(default)]
    pub fallback: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplatesConfig {
    #[serde(default = "default_templates_dir")]
    pub dir: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: default_templates_dir(),
        }
    }
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(consts::files::TEMPLATES_DIR)
}

fn invalid(field: &str, reason: impl Into<String>) -> PromptpageError {
    PromptpageError::ConfigInvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

impl Config {
    /// Read and validate promptpage.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Config =
            toml::from_str(&content).map_err(|e| PromptpageError::ConfigParseError {
                path: path.to_path_buf(),
                reason: e.message().to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::from_file`], but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.limit == 0 {
            return Err(invalid("search.limit", "must be at least 1"));
        }
        if self.search.limit > consts::search::MAX_LIMIT {
            return Err(invalid(
                "search.limit",
                format!("must be at most {}", consts::search::MAX_LIMIT),
            ));
        }
        if self.placeholders.max_name_chars == 0 {
            return Err(invalid("placeholders.max_name_chars", "must be at least 1"));
        }
        if self.placeholders.max_name_chars > self.placeholders.max_token_chars {
            return Err(invalid(
                "placeholders.max_name_chars",
                "must not exceed placeholders.max_token_chars",
            ));
        }
        Ok(())
    }

    /// Resolve relative source paths against `root` (the config file's directory)
    pub fn rebase(mut self, root: &Path) -> Self {
        let join = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        };
        for path in [
            &mut self.catalog.base,
            &mut self.catalog.delta,
            &mut self.catalog.fallback,
        ]
        .into_iter()
        .flatten()
        {
            join(path);
        }
        join(&mut self.templates.dir);
        self
    }

    pub fn placeholder_rules(&self) -> PlaceholderRules {
        PlaceholderRules::default()
            .with_caps(
                self.placeholders.max_token_chars,
                self.placeholders.max_name_chars,
            )
            .with_reserved(self.placeholders.reserved.iter().cloned())
    }

    pub fn parser(&self) -> TemplateParser {
        TemplateParser::new(self.placeholder_rules())
    }

    pub fn searcher(&self) -> Searcher {
        Searcher::new(self.search.scoring)
    }
}
